//! Repeat-fire timing for held keys.
//!
//! A [`RepeatFire`] is created when a repeating key goes down and dropped
//! when it comes up. It has no thread or task of its own: the surface polls
//! it from the frame loop, so dropping it is the cancellation and no fire
//! can be observed after the release that dropped it.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Hold-to-repeat schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatTiming {
    /// Wait after the initial press before the first repeat
    pub delay: Duration,
    /// Gap between subsequent repeats
    pub interval: Duration,
}

impl RepeatTiming {
    /// Creates a schedule. A zero interval is bumped to one millisecond.
    #[must_use]
    pub fn new(delay: Duration, interval: Duration) -> Self {
        Self {
            delay,
            interval: interval.max(Duration::from_millis(1)),
        }
    }
}

impl Default for RepeatTiming {
    fn default() -> Self {
        Self::new(Duration::from_millis(500), Duration::from_millis(100))
    }
}

/// Repeat schedule for one held key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatFire {
    timing: RepeatTiming,
    pressed_at: Duration,
    fired: u64,
}

impl RepeatFire {
    /// Arms a schedule for a key that went down at `pressed_at`.
    ///
    /// The initial press itself is dispatched by the caller; this only
    /// tracks the repeats that follow.
    #[must_use]
    pub const fn arm(pressed_at: Duration, timing: RepeatTiming) -> Self {
        Self {
            timing,
            pressed_at,
            fired: 0,
        }
    }

    /// When the next repeat is due.
    #[must_use]
    pub fn next_fire(&self) -> Duration {
        self.pressed_at + self.timing.delay + self.timing.interval * self.fired as u32
    }

    /// Number of repeats fired so far.
    #[must_use]
    pub const fn fired(&self) -> u64 {
        self.fired
    }

    /// Returns how many repeats became due up to and including `now`.
    ///
    /// Frames can be late, so several repeats may be due at once.
    pub fn poll(&mut self, now: Duration) -> u64 {
        let first = self.pressed_at + self.timing.delay;
        if now < first {
            return 0;
        }
        let since_first = (now - first).as_nanos();
        let due = 1 + (since_first / self.timing.interval.as_nanos()) as u64;
        let new = due.saturating_sub(self.fired);
        self.fired = due.max(self.fired);
        new
    }

    /// Returns how many repeats became due strictly before `released_at`.
    ///
    /// Used when the key comes up between frames. A repeat due at the very
    /// instant of the release does not fire.
    pub fn poll_before(&mut self, released_at: Duration) -> u64 {
        released_at
            .checked_sub(Duration::from_nanos(1))
            .map_or(0, |last| self.poll(last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_nothing_before_delay() {
        let mut repeat = RepeatFire::arm(ms(0), RepeatTiming::default());
        for t in [0, 100, 250, 499] {
            assert_eq!(repeat.poll(ms(t)), 0, "at {t}ms");
        }
    }

    #[test]
    fn test_fires_at_delay_then_every_interval() {
        let mut repeat = RepeatFire::arm(ms(0), RepeatTiming::default());
        assert_eq!(repeat.poll(ms(500)), 1);
        assert_eq!(repeat.poll(ms(550)), 0);
        assert_eq!(repeat.poll(ms(599)), 0);
        assert_eq!(repeat.poll(ms(600)), 1);
        assert_eq!(repeat.poll(ms(700)), 1);
        assert_eq!(repeat.fired(), 3);
        assert_eq!(repeat.next_fire(), ms(800));
    }

    #[test]
    fn test_late_frame_catches_up() {
        let mut repeat = RepeatFire::arm(ms(0), RepeatTiming::default());
        // 500, 600, 700, 800
        assert_eq!(repeat.poll(ms(820)), 4);
        assert_eq!(repeat.poll(ms(820)), 0);
    }

    #[test]
    fn test_offset_press_time() {
        let mut repeat = RepeatFire::arm(ms(1_000), RepeatTiming::default());
        assert_eq!(repeat.poll(ms(1_499)), 0);
        assert_eq!(repeat.poll(ms(1_500)), 1);
    }

    #[test]
    fn test_time_going_backwards_fires_nothing() {
        let mut repeat = RepeatFire::arm(ms(0), RepeatTiming::default());
        assert_eq!(repeat.poll(ms(700)), 3);
        assert_eq!(repeat.poll(ms(600)), 0);
        assert_eq!(repeat.poll(ms(800)), 1);
    }

    #[test]
    fn test_poll_before_release() {
        let mut repeat = RepeatFire::arm(ms(0), RepeatTiming::default());
        assert_eq!(repeat.poll(ms(496)), 0);
        assert_eq!(repeat.poll_before(ms(505)), 1);

        let mut repeat = RepeatFire::arm(ms(0), RepeatTiming::default());
        assert_eq!(repeat.poll(ms(592)), 1);
        // Due at 600, released at 600
        assert_eq!(repeat.poll_before(ms(600)), 0);
        assert_eq!(repeat.poll_before(ms(601)), 1);
        assert_eq!(RepeatFire::arm(ms(0), RepeatTiming::default()).poll_before(ms(0)), 0);
    }

    #[test]
    fn test_custom_timing_and_zero_interval_guard() {
        let timing = RepeatTiming::new(ms(200), Duration::ZERO);
        assert_eq!(timing.interval, ms(1));

        let mut repeat = RepeatFire::arm(ms(0), RepeatTiming::new(ms(200), ms(50)));
        assert_eq!(repeat.poll(ms(300)), 3);
    }
}
