//! Per-frame paint list for the keyboard surface.
//!
//! A [`SurfaceFrame`] is built from a single theme reference and a single
//! tilt sample, then flattened into [`PaintOp`]s in the order they must be
//! drawn: background, then each key's base/body/surface, then the overlay.

use serde::Serialize;

use super::geometry::{KeyId, KeyRect};
use crate::animation::{AnimationFrame, BackdropTransforms};
use crate::models::{Argb, Tilt, Vec2};
use crate::theme::{KeyboardColors, ThemeId};

/// Alpha of the socket layer.
pub const BASE_ALPHA: f32 = 0.5;
/// Alpha of the body layer.
pub const BODY_ALPHA: f32 = 0.8;
/// Alpha of the backdrop background layer.
pub const BACKGROUND_ALPHA: f32 = 0.7;
/// Alpha at the rim of the overlay vignette.
pub const VIGNETTE_ALPHA: f32 = 0.4;

/// Colors of the three stacked layers of one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LayerColors {
    /// Socket
    pub base: Argb,
    /// Body
    pub body: Argb,
    /// Top surface
    pub surface: Argb,
    /// Label
    pub text: Argb,
}

impl LayerColors {
    /// Colors for a key given its press state.
    ///
    /// An active Shift key keeps the pressed tint after it is released.
    #[must_use]
    pub fn for_key(colors: &KeyboardColors, pressed: bool, latched_shift: bool) -> Self {
        let surface = if pressed || latched_shift {
            colors.key_background_pressed
        } else {
            colors.key_background
        };
        Self {
            base: Argb::BLACK.with_alpha(BASE_ALPHA),
            body: colors.key_background_pressed.with_alpha(BODY_ALPHA),
            surface,
            text: colors.key_text,
        }
    }
}

/// Everything needed to draw one key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyPaint {
    /// Grid position
    pub id: KeyId,
    /// Untransformed cell
    pub rect: KeyRect,
    /// Text shown on the key
    pub label: String,
    /// Whether the key is held
    pub pressed: bool,
    /// Animated transforms
    pub frame: AnimationFrame,
    /// Layer colors
    pub colors: LayerColors,
}

/// Whole-keyboard background layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BackgroundPaint {
    /// Translation
    pub offset: Vec2,
    /// Uniform scale about the center
    pub scale: f32,
    /// Fill
    pub color: Argb,
}

/// Whole-keyboard foreground vignette.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OverlayPaint {
    /// Translation
    pub offset: Vec2,
    /// Uniform scale about the center
    pub scale: f32,
    /// Color at the center of the radial gradient
    pub center: Argb,
    /// Color at the rim of the radial gradient
    pub edge: Argb,
}

/// A complete frame of the surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceFrame {
    /// Theme every color in this frame came from
    pub theme: ThemeId,
    /// Tilt sample every offset in this frame came from
    pub tilt: Tilt,
    /// Backdrop background
    pub background: BackgroundPaint,
    /// Keys in row-major order
    pub keys: Vec<KeyPaint>,
    /// Foreground overlay
    pub overlay: OverlayPaint,
}

impl SurfaceFrame {
    /// Builds the backdrop layers for `colors` and `backdrop`.
    #[must_use]
    pub fn backdrop(colors: &KeyboardColors, backdrop: BackdropTransforms) -> (BackgroundPaint, OverlayPaint) {
        (
            BackgroundPaint {
                offset: backdrop.background,
                scale: backdrop.scale,
                color: colors.keyboard_background.with_alpha(BACKGROUND_ALPHA),
            },
            OverlayPaint {
                offset: backdrop.overlay,
                scale: backdrop.scale,
                center: Argb::TRANSPARENT,
                edge: Argb::BLACK.with_alpha(VIGNETTE_ALPHA),
            },
        )
    }

    /// The frame flattened into draw order.
    #[must_use]
    pub fn paint_ops(&self) -> Vec<PaintOp> {
        let mut ops = Vec::with_capacity(self.keys.len() * 3 + 2);
        ops.push(PaintOp::Background(self.background));
        for key in &self.keys {
            let frame = &key.frame;
            ops.push(PaintOp::KeyBase {
                id: key.id,
                rect: key.rect.translated(frame.base_offset),
                color: key.colors.base,
            });
            ops.push(PaintOp::KeyBody {
                id: key.id,
                rect: key.rect.translated(frame.body_offset).scaled(frame.scale),
                color: key.colors.body,
            });
            ops.push(PaintOp::KeySurface {
                id: key.id,
                rect: key.rect.translated(frame.surface_offset).scaled(frame.scale),
                elevation: frame.elevation,
                color: key.colors.surface,
                label: key.label.clone(),
                text_color: key.colors.text,
            });
        }
        ops.push(PaintOp::Overlay(self.overlay));
        ops
    }
}

/// One draw call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "layer", rename_all = "snake_case")]
pub enum PaintOp {
    /// Backdrop background, drawn first
    Background(BackgroundPaint),
    /// Key socket
    KeyBase {
        /// Key
        id: KeyId,
        /// Placed rectangle
        rect: KeyRect,
        /// Fill
        color: Argb,
    },
    /// Key body
    KeyBody {
        /// Key
        id: KeyId,
        /// Placed rectangle
        rect: KeyRect,
        /// Fill
        color: Argb,
    },
    /// Key top with label and shadow
    KeySurface {
        /// Key
        id: KeyId,
        /// Placed rectangle
        rect: KeyRect,
        /// Shadow height
        elevation: f32,
        /// Fill
        color: Argb,
        /// Label
        label: String,
        /// Label color
        text_color: Argb,
    },
    /// Foreground vignette, drawn last
    Overlay(OverlayPaint),
}

impl PaintOp {
    /// Short layer name, for logs and `--json` output.
    #[must_use]
    pub const fn layer_name(&self) -> &'static str {
        match self {
            Self::Background(_) => "background",
            Self::KeyBase { .. } => "base",
            Self::KeyBody { .. } => "body",
            Self::KeySurface { .. } => "surface",
            Self::Overlay(_) => "overlay",
        }
    }
}
