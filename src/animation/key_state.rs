//! Per-key animation state and the frame it produces.

use serde::Serialize;
use std::time::Duration;

use super::animated::Animated;
use super::curve::{AnimationCurve, Easing};
use super::parallax::{compute_layer_offsets, LayerSensitivities};
use crate::models::{Tilt, Vec2};
use crate::theme::KeyAnimation;

/// Height of an unpressed key, in surface units.
pub const DEFAULT_IDLE_ELEVATION: f32 = 6.0;

/// Elevation uses a short eased tween rather than the theme's spring.
pub const ELEVATION_CURVE: AnimationCurve = AnimationCurve::tween(150, Easing::EaseOut);

/// Everything needed to draw one key for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnimationFrame {
    /// Socket layer offset
    pub base_offset: Vec2,
    /// Body layer offset
    pub body_offset: Vec2,
    /// Surface layer offset
    pub surface_offset: Vec2,
    /// Scale of body and surface
    pub scale: Vec2,
    /// Shadow height under the surface
    pub elevation: f32,
    /// Sink progress the offsets were computed from
    pub press_progress: f32,
}

/// Builds a frame from already-animated values. Pure.
#[must_use]
pub fn compose_frame(
    tilt: Tilt,
    press_progress: f32,
    scale: Vec2,
    elevation: f32,
    sensitivities: &LayerSensitivities,
) -> AnimationFrame {
    let offsets = compute_layer_offsets(tilt, press_progress, sensitivities);
    AnimationFrame {
        base_offset: offsets.base,
        body_offset: offsets.body,
        surface_offset: offsets.surface,
        scale,
        elevation,
        press_progress,
    }
}

/// Animation records for one key instance.
///
/// Press progress, scale and elevation each animate independently towards
/// targets derived from the press state.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyAnimationState {
    pressed: bool,
    idle_elevation: f32,
    progress: Animated,
    scale_x: Animated,
    scale_y: Animated,
    elevation: Animated,
}

impl KeyAnimationState {
    /// A key at rest.
    #[must_use]
    pub fn new(animation: &KeyAnimation, idle_elevation: f32) -> Self {
        Self {
            pressed: false,
            idle_elevation,
            progress: Animated::new(0.0, animation.press_curve),
            scale_x: Animated::new(1.0, animation.scale_curve),
            scale_y: Animated::new(1.0, animation.scale_curve),
            elevation: Animated::new(idle_elevation, ELEVATION_CURVE),
        }
    }

    /// Whether the key is currently held.
    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Current sink progress (0 = idle, 1 = fully sunk).
    #[must_use]
    pub const fn press_progress(&self) -> f32 {
        self.progress.value()
    }

    /// Flips the press state and retargets every animation.
    pub fn set_pressed(&mut self, pressed: bool, animation: &KeyAnimation) {
        self.pressed = pressed;
        self.retarget(animation);
    }

    /// Recomputes targets for the current press state, e.g. after a theme change.
    pub fn retarget(&mut self, animation: &KeyAnimation) {
        let (progress, scale_x, scale_y, elevation) = if self.pressed {
            (1.0, animation.press_scale_x, animation.press_scale_y, 0.0)
        } else {
            (0.0, 1.0, 1.0, self.idle_elevation)
        };
        self.progress.animate_to(progress, animation.press_curve);
        self.scale_x.animate_to(scale_x, animation.scale_curve);
        self.scale_y.animate_to(scale_y, animation.scale_curve);
        self.elevation.animate_to(elevation, ELEVATION_CURVE);
    }

    /// Advances all animations by `dt`.
    pub fn step(&mut self, dt: Duration) {
        self.progress.step(dt);
        self.scale_x.step(dt);
        self.scale_y.step(dt);
        self.elevation.step(dt);
    }

    /// True when nothing is moving.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.progress.is_settled()
            && self.scale_x.is_settled()
            && self.scale_y.is_settled()
            && self.elevation.is_settled()
    }

    /// The frame for the given tilt.
    #[must_use]
    pub fn frame(&self, tilt: Tilt, sensitivities: &LayerSensitivities) -> AnimationFrame {
        compose_frame(
            tilt,
            self.progress.value(),
            Vec2::new(self.scale_x.value(), self.scale_y.value()),
            self.elevation.value(),
            sensitivities,
        )
    }
}
