//! Device tilt and the process-wide tilt signal.
//!
//! The sensor side writes from its own thread while the UI reads once per
//! frame. Both components are packed into a single `AtomicU64` so a reader
//! can never observe the `x` of one sample with the `y` of another.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::Vec2;

/// Device orientation as `(roll, pitch)` in radians.
///
/// No bounds are enforced: near-vertical orientations produce large values
/// and those flow straight through to the parallax offsets.
pub type Tilt = Vec2;

/// Shared handle to the latest tilt sample.
///
/// Cloning the handle shares the underlying value; the sensor keeps one
/// clone as its sink and the keyboard surface reads another.
#[derive(Debug, Clone, Default)]
pub struct TiltSignal {
    bits: Arc<AtomicU64>,
}

impl TiltSignal {
    /// Creates a signal at rest (zero tilt).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes a new sample. Single writer, single store.
    pub fn set(&self, tilt: Tilt) {
        let packed = (u64::from(tilt.x.to_bits()) << 32) | u64::from(tilt.y.to_bits());
        self.bits.store(packed, Ordering::Release);
    }

    /// Reads the latest sample.
    #[must_use]
    pub fn get(&self) -> Tilt {
        let packed = self.bits.load(Ordering::Acquire);
        Tilt::new(
            f32::from_bits((packed >> 32) as u32),
            f32::from_bits(packed as u32),
        )
    }

    /// Returns true if both handles observe the same value.
    #[must_use]
    pub fn shares_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.bits, &other.bits)
    }
}
