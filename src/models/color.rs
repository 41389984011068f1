//! ARGB color handling for theme palettes and layer compositing.

// Allow intentional type casts for color math
#![allow(clippy::cast_lossless)]

use serde::{Serialize, Serializer};
use std::fmt;

/// Color value with an alpha channel.
///
/// Theme palettes are authored as packed `0xAARRGGBB` literals, the same
/// notation the palette tables use. Compositing is done with straight
/// (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Argb {
    /// Alpha channel (0 = transparent, 255 = opaque)
    pub a: u8,
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Argb {
    /// Opaque black.
    pub const BLACK: Self = Self::from_argb(0xFF00_0000);
    /// Opaque white.
    pub const WHITE: Self = Self::from_argb(0xFFFF_FFFF);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::from_argb(0x0000_0000);

    /// Creates a new color from individual channel values.
    #[must_use]
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    /// Unpacks a `0xAARRGGBB` literal.
    ///
    /// # Examples
    ///
    /// ```
    /// use asmr_keyboard::models::Argb;
    ///
    /// let wood = Argb::from_argb(0xFF8D_6E63);
    /// assert_eq!(wood, Argb::new(0xFF, 0x8D, 0x6E, 0x63));
    /// ```
    #[must_use]
    pub const fn from_argb(packed: u32) -> Self {
        Self {
            a: (packed >> 24) as u8,
            r: (packed >> 16) as u8,
            g: (packed >> 8) as u8,
            b: packed as u8,
        }
    }

    /// Packs the color back into `0xAARRGGBB`.
    #[must_use]
    pub const fn to_argb(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Converts the color to a hex string in the format "#AARRGGBB" (uppercase).
    ///
    /// # Examples
    ///
    /// ```
    /// use asmr_keyboard::models::Argb;
    ///
    /// assert_eq!(Argb::from_argb(0x99FF_FFFF).to_hex(), "#99FFFFFF");
    /// ```
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:08X}", self.to_argb())
    }

    /// Returns the same color with its alpha replaced by `alpha` (0.0-1.0).
    ///
    /// This mirrors `copy(alpha = ..)` on the palette side: the stored alpha
    /// is overwritten, not multiplied.
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    /// Composites `self` over an opaque `backdrop` and returns an opaque color.
    ///
    /// # Examples
    ///
    /// ```
    /// use asmr_keyboard::models::Argb;
    ///
    /// let half_black = Argb::BLACK.with_alpha(0.5);
    /// let result = half_black.over(Argb::WHITE);
    /// assert_eq!(result.a, 255);
    /// assert!((i32::from(result.r) - 127).abs() <= 1);
    /// ```
    #[must_use]
    pub fn over(self, backdrop: Self) -> Self {
        let alpha = f32::from(self.a) / 255.0;
        let mix = |top: u8, bottom: u8| {
            (f32::from(top) * alpha + f32::from(bottom) * (1.0 - alpha)).round() as u8
        };
        Self {
            a: 0xFF,
            r: mix(self.r, backdrop.r),
            g: mix(self.g, backdrop.g),
            b: mix(self.b, backdrop.b),
        }
    }

    /// Converts the color to a Ratatui Color for terminal rendering.
    ///
    /// The terminal has no alpha, so callers composite with [`Argb::over`]
    /// first; the alpha channel is dropped here.
    #[cfg(feature = "ratatui")]
    #[must_use]
    pub const fn to_ratatui_color(self) -> ratatui::style::Color {
        ratatui::style::Color::Rgb(self.r, self.g, self.b)
    }
}

impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Argb {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}
