//! Tilt-to-offset mapping for key layers and the keyboard backdrop.
//!
//! Every offset here is a pure linear function of tilt. Nothing is clamped:
//! near-vertical orientations give large offsets and that is accepted.

use serde::Serialize;

use crate::models::{Tilt, Vec2};

/// Per-layer tilt multipliers for a single key.
///
/// The surface moves with the tilt, the body slightly against it and the
/// base (the socket the key sinks into) strongly against it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayerSensitivities {
    /// Top layer the user touches
    pub surface: f32,
    /// Middle layer that gives the key its thickness
    pub body: f32,
    /// Bottom layer, stationary during a press
    pub base: f32,
}

impl LayerSensitivities {
    /// Surface multiplier
    pub const DEFAULT_SURFACE: f32 = 12.0;
    /// Body multiplier
    pub const DEFAULT_BODY: f32 = -4.0;
    /// Base multiplier
    pub const DEFAULT_BASE: f32 = -15.0;
}

impl Default for LayerSensitivities {
    fn default() -> Self {
        Self {
            surface: Self::DEFAULT_SURFACE,
            body: Self::DEFAULT_BODY,
            base: Self::DEFAULT_BASE,
        }
    }
}

/// Tilt multipliers for the two whole-keyboard layers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BackdropSensitivities {
    /// Background layer, moves against the tilt
    pub background: f32,
    /// Foreground overlay, moves with the tilt
    pub overlay: f32,
    /// Uniform scale applied to both layers so their edges stay hidden
    pub scale: f32,
}

impl Default for BackdropSensitivities {
    fn default() -> Self {
        Self {
            background: -40.0,
            overlay: 50.0,
            scale: 1.2,
        }
    }
}

/// Offsets of the three key layers for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayerOffsets {
    /// Socket position; depends on tilt only
    pub base: Vec2,
    /// Body position
    pub body: Vec2,
    /// Surface position
    pub surface: Vec2,
}

/// Position of a layer at rest: `tilt * sensitivity`, componentwise.
#[must_use]
pub fn idle_offset(tilt: Tilt, sensitivity: f32) -> Vec2 {
    tilt * sensitivity
}

/// Computes the three key layer offsets.
///
/// Body and surface slide from their idle positions to the base position as
/// `press_progress` goes from 0 to 1; at 1 all three layers coincide.
///
/// # Examples
///
/// ```
/// use asmr_keyboard::animation::{compute_layer_offsets, LayerSensitivities};
/// use asmr_keyboard::models::Tilt;
///
/// let sens = LayerSensitivities::default();
/// let sunk = compute_layer_offsets(Tilt::new(0.3, -0.2), 1.0, &sens);
/// assert_eq!(sunk.surface, sunk.base);
/// assert_eq!(sunk.body, sunk.base);
/// ```
#[must_use]
pub fn compute_layer_offsets(
    tilt: Tilt,
    press_progress: f32,
    sensitivities: &LayerSensitivities,
) -> LayerOffsets {
    let base = idle_offset(tilt, sensitivities.base);
    let body = idle_offset(tilt, sensitivities.body).lerp(base, press_progress);
    let surface = idle_offset(tilt, sensitivities.surface).lerp(base, press_progress);
    LayerOffsets {
        base,
        body,
        surface,
    }
}

/// Transforms of the backdrop layers. These ignore press state entirely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BackdropTransforms {
    /// Background offset
    pub background: Vec2,
    /// Overlay offset
    pub overlay: Vec2,
    /// Scale shared by both layers
    pub scale: f32,
}

/// Computes the backdrop offsets for the given tilt.
#[must_use]
pub fn backdrop_transforms(tilt: Tilt, sensitivities: &BackdropSensitivities) -> BackdropTransforms {
    BackdropTransforms {
        background: idle_offset(tilt, sensitivities.background),
        overlay: idle_offset(tilt, sensitivities.overlay),
        scale: sensitivities.scale,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-5 && (a.y - b.y).abs() < 1e-5
    }

    #[test]
    fn test_default_sign_conventions() {
        let sens = LayerSensitivities::default();
        assert!(sens.surface > 0.0);
        assert!(sens.body < 0.0);
        assert!(sens.base < sens.body);
    }

    #[test]
    fn test_idle_offsets_are_linear_in_tilt() {
        let sens = LayerSensitivities::default();
        for tilt in [
            Tilt::new(0.0, 0.0),
            Tilt::new(0.3, -0.2),
            Tilt::new(-1.2, 0.7),
            Tilt::new(3.0, -3.0),
        ] {
            let offsets = compute_layer_offsets(tilt, 0.0, &sens);
            assert!(close(offsets.surface, Vec2::new(tilt.x * 12.0, tilt.y * 12.0)));
            assert!(close(offsets.body, Vec2::new(tilt.x * -4.0, tilt.y * -4.0)));
            assert!(close(offsets.base, Vec2::new(tilt.x * -15.0, tilt.y * -15.0)));
        }
    }

    #[test]
    fn test_full_sink_convergence() {
        let sens = LayerSensitivities::default();
        let tilt = Tilt::new(0.3, -0.2);

        let idle = compute_layer_offsets(tilt, 0.0, &sens);
        assert!(close(idle.surface, Vec2::new(3.6, -2.4)));
        assert!(close(idle.body, Vec2::new(-1.2, 0.8)));
        assert!(close(idle.base, Vec2::new(-4.5, 3.0)));

        let sunk = compute_layer_offsets(tilt, 1.0, &sens);
        assert!(close(sunk.surface, sunk.base));
        assert!(close(sunk.body, sunk.base));
        assert!(close(sunk.base, Vec2::new(-4.5, 3.0)));
    }

    #[test]
    fn test_base_ignores_press_progress() {
        let sens = LayerSensitivities::default();
        let tilt = Tilt::new(0.5, 0.1);
        let bases: Vec<Vec2> = [0.0, 0.25, 0.5, 1.0]
            .iter()
            .map(|p| compute_layer_offsets(tilt, *p, &sens).base)
            .collect();
        assert!(bases.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn test_half_press_is_midpoint() {
        let sens = LayerSensitivities::default();
        let tilt = Tilt::new(1.0, 0.0);
        let half = compute_layer_offsets(tilt, 0.5, &sens);
        // surface halfway from 12 to -15
        assert!(close(half.surface, Vec2::new(-1.5, 0.0)));
        // body halfway from -4 to -15
        assert!(close(half.body, Vec2::new(-9.5, 0.0)));
    }

    #[test]
    fn test_extreme_tilt_is_not_clamped() {
        let sens = LayerSensitivities::default();
        let offsets = compute_layer_offsets(Tilt::new(100.0, -100.0), 0.0, &sens);
        assert!(close(offsets.surface, Vec2::new(1200.0, -1200.0)));
    }

    #[test]
    fn test_backdrop_moves_in_opposite_directions() {
        let backdrop = backdrop_transforms(Tilt::new(0.5, -0.25), &BackdropSensitivities::default());
        assert!(close(backdrop.background, Vec2::new(-20.0, 10.0)));
        assert!(close(backdrop.overlay, Vec2::new(25.0, -12.5)));
        assert_eq!(backdrop.scale, 1.2);
    }
}
