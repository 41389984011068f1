//! Per-value animation records advanced once per frame.

use std::time::Duration;

use super::curve::AnimationCurve;

/// Largest integration step for springs, in seconds.
const MAX_SPRING_STEP: f32 = 1.0 / 240.0;
/// Distance from target below which a spring may come to rest.
const REST_DISPLACEMENT: f32 = 5e-4;
/// Speed below which a spring may come to rest.
const REST_VELOCITY: f32 = 5e-3;

/// A scalar that animates towards a target along a curve.
///
/// The record owns no clock: callers feed it elapsed time through
/// [`Animated::step`]. Retargeting keeps the current value (and, for springs,
/// the current velocity) so an interrupted animation continues smoothly.
#[derive(Debug, Clone, PartialEq)]
pub struct Animated {
    value: f32,
    target: f32,
    velocity: f32,
    curve: AnimationCurve,
    origin: f32,
    elapsed: Duration,
}

impl Animated {
    /// A value at rest.
    #[must_use]
    pub fn new(value: f32, curve: AnimationCurve) -> Self {
        Self {
            value,
            target: value,
            velocity: 0.0,
            curve,
            origin: value,
            elapsed: Duration::ZERO,
        }
    }

    /// Current value.
    #[must_use]
    pub const fn value(&self) -> f32 {
        self.value
    }

    /// Value being approached.
    #[must_use]
    pub const fn target(&self) -> f32 {
        self.target
    }

    /// Curve currently in use.
    #[must_use]
    pub const fn curve(&self) -> AnimationCurve {
        self.curve
    }

    /// True once the value has reached its target and stopped.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.value == self.target && self.velocity == 0.0
    }

    /// Sets a new target (and curve). A no-op when nothing changed.
    pub fn animate_to(&mut self, target: f32, curve: AnimationCurve) {
        self.curve = curve;
        if target == self.target {
            return;
        }
        self.target = target;
        self.origin = self.value;
        self.elapsed = Duration::ZERO;
    }

    /// Jumps straight to `value` with no motion.
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.origin = value;
        self.velocity = 0.0;
        self.elapsed = Duration::ZERO;
    }

    /// Advances the animation by `dt`.
    pub fn step(&mut self, dt: Duration) {
        if self.is_settled() || dt.is_zero() {
            return;
        }

        match self.curve {
            AnimationCurve::Spring {
                damping_ratio,
                stiffness,
            } => self.step_spring(dt.as_secs_f32(), damping_ratio, stiffness),
            AnimationCurve::Tween {
                duration_ms,
                easing,
            } => {
                self.elapsed += dt;
                let duration = Duration::from_millis(u64::from(duration_ms));
                if duration.is_zero() || self.elapsed >= duration {
                    self.value = self.target;
                    self.velocity = 0.0;
                } else {
                    let t = self.elapsed.as_secs_f32() / duration.as_secs_f32();
                    self.value = self.origin + (self.target - self.origin) * easing.apply(t);
                }
            }
        }
    }

    fn step_spring(&mut self, dt: f32, damping_ratio: f32, stiffness: f32) {
        let target = self.target;
        let damping = 2.0 * damping_ratio * stiffness.sqrt();
        let accel = |x: f32, v: f32| -stiffness * (x - target) - damping * v;

        let steps = (dt / MAX_SPRING_STEP).ceil().max(1.0) as u32;
        let h = dt / steps as f32;
        let (mut x, mut v) = (self.value, self.velocity);

        // RK4 on (position, velocity)
        for _ in 0..steps {
            let (k1x, k1v) = (v, accel(x, v));
            let (k2x, k2v) = (
                v + 0.5 * h * k1v,
                accel(x + 0.5 * h * k1x, v + 0.5 * h * k1v),
            );
            let (k3x, k3v) = (
                v + 0.5 * h * k2v,
                accel(x + 0.5 * h * k2x, v + 0.5 * h * k2v),
            );
            let (k4x, k4v) = (v + h * k3v, accel(x + h * k3x, v + h * k3v));

            x += h / 6.0 * (k1x + 2.0 * k2x + 2.0 * k3x + k4x);
            v += h / 6.0 * (k1v + 2.0 * k2v + 2.0 * k3v + k4v);
        }

        if (x - target).abs() < REST_DISPLACEMENT && v.abs() < REST_VELOCITY {
            self.value = target;
            self.velocity = 0.0;
        } else {
            self.value = x;
            self.velocity = v;
        }
    }
}
