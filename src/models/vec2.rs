//! Two-component vectors used for tilt, offsets and scales.

use serde::Serialize;
use std::ops::{Add, Mul, Sub};

/// A 2D value in surface units (or radians, for tilt).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Vec2 {
    /// Horizontal component
    pub x: f32,
    /// Vertical component
    pub y: f32,
}

impl Vec2 {
    /// The zero vector.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    /// The identity scale.
    pub const ONE: Self = Self { x: 1.0, y: 1.0 };

    /// Creates a new vector.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Same value on both axes.
    #[must_use]
    pub const fn splat(value: f32) -> Self {
        Self { x: value, y: value }
    }

    /// Linear interpolation towards `to`.
    ///
    /// `t` is not clamped: values outside `[0, 1]` extrapolate, which is what
    /// an overshooting spring needs.
    ///
    /// # Examples
    ///
    /// ```
    /// use asmr_keyboard::models::Vec2;
    ///
    /// let from = Vec2::new(0.0, 10.0);
    /// let to = Vec2::new(4.0, 2.0);
    /// assert_eq!(from.lerp(to, 0.5), Vec2::new(2.0, 6.0));
    /// ```
    #[must_use]
    pub fn lerp(self, to: Self, t: f32) -> Self {
        // Weighted form so both endpoints are reproduced exactly
        let keep = 1.0 - t;
        Self {
            x: self.x * keep + to.x * t,
            y: self.y * keep + to.y * t,
        }
    }
}

impl Add for Vec2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        let from = Vec2::new(3.6, -2.4);
        let to = Vec2::new(-4.5, 3.0);
        assert_eq!(from.lerp(to, 0.0), from);
        assert_eq!(from.lerp(to, 1.0), to);
    }

    #[test]
    fn test_lerp_extrapolates() {
        let from = Vec2::ZERO;
        let to = Vec2::new(1.0, -1.0);
        assert_eq!(from.lerp(to, 2.0), Vec2::new(2.0, -2.0));
    }

    #[test]
    fn test_scalar_mul() {
        assert_eq!(Vec2::new(0.5, -0.25) * -40.0, Vec2::new(-20.0, 10.0));
    }
}
