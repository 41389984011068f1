//! Animation curves: damped springs and fixed-duration eased tweens.

use serde::Serialize;
use std::time::Duration;

/// Spring stiffness presets.
pub mod stiffness {
    /// Slow, soft settle. Used for the sink animation.
    pub const MEDIUM_LOW: f32 = 400.0;
    /// Default spring stiffness.
    pub const MEDIUM: f32 = 1500.0;
}

/// Spring damping ratio presets.
pub mod damping {
    /// Critically damped: no overshoot.
    pub const NO_BOUNCY: f32 = 1.0;
    /// Visible wobble around the target.
    pub const MEDIUM_BOUNCY: f32 = 0.5;
}

/// Easing functions for tweens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant speed
    Linear,
    /// Cubic, slow start
    EaseIn,
    /// Cubic, slow end
    EaseOut,
    /// Cubic, slow start and end
    EaseInOut,
}

impl Easing {
    /// Maps linear progress `t` in `[0, 1]` to eased progress.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t * t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
        }
    }
}

/// How an animated value approaches its target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnimationCurve {
    /// Unit-mass damped spring.
    Spring {
        /// 1.0 is critically damped, below 1.0 overshoots
        damping_ratio: f32,
        /// Spring constant
        stiffness: f32,
    },
    /// Fixed-duration interpolation from the value at retarget time.
    Tween {
        /// Total duration in milliseconds
        duration_ms: u32,
        /// Easing applied to linear progress
        easing: Easing,
    },
}

impl AnimationCurve {
    /// A spring with the given damping ratio and stiffness.
    #[must_use]
    pub const fn spring(damping_ratio: f32, stiffness: f32) -> Self {
        Self::Spring {
            damping_ratio,
            stiffness,
        }
    }

    /// A tween of the given duration.
    #[must_use]
    pub const fn tween(duration_ms: u32, easing: Easing) -> Self {
        Self::Tween {
            duration_ms,
            easing,
        }
    }

    /// Tween duration, if this is a tween.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        match self {
            Self::Spring { .. } => None,
            Self::Tween { duration_ms, .. } => Some(Duration::from_millis(u64::from(*duration_ms))),
        }
    }
}

impl Default for AnimationCurve {
    fn default() -> Self {
        Self::spring(damping::NO_BOUNCY, stiffness::MEDIUM_LOW)
    }
}
