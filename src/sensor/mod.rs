//! Orientation sources that feed the tilt signal.
//!
//! A sensor is registered against a [`TiltSignal`] sink while the keyboard
//! is visible and unregistered when it hides. Sources write from whatever
//! thread they like; the signal itself is lock-free.

pub mod rotation;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::models::{Tilt, TiltSignal};

pub use rotation::{rotation_matrix, rotation_vector_from_tilt, tilt_from_rotation_vector};

/// A subscribable orientation source.
pub trait OrientationSensor {
    /// Starts delivering samples into `sink`.
    fn register(&mut self, sink: TiltSignal);

    /// Stops delivering samples. Calling it while unregistered does nothing.
    fn unregister(&mut self);

    /// Whether a sink is currently attached.
    fn is_registered(&self) -> bool;
}

/// Which orientation source to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SensorSource {
    /// Slow synthetic wobble on a background thread
    #[default]
    Simulated,
    /// Tilt set by hand (arrow keys in the terminal UI)
    Manual,
}

impl fmt::Display for SensorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simulated => write!(f, "simulated"),
            Self::Manual => write!(f, "manual"),
        }
    }
}

/// Tilt driven by explicit calls.
///
/// Nudges made while unregistered are remembered and published on the next
/// registration.
#[derive(Debug, Default)]
pub struct ManualSensor {
    tilt: Tilt,
    sink: Option<TiltSignal>,
}

impl ManualSensor {
    /// Step applied by a single nudge, in radians.
    pub const STEP: f32 = 0.05;

    /// A level sensor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current orientation.
    #[must_use]
    pub const fn tilt(&self) -> Tilt {
        self.tilt
    }

    /// Sets the orientation and publishes it if registered.
    pub fn set(&mut self, tilt: Tilt) {
        self.tilt = tilt;
        if let Some(sink) = &self.sink {
            sink.set(tilt);
        }
    }

    /// Adds `delta` to the current orientation.
    pub fn nudge(&mut self, delta: Tilt) {
        self.set(self.tilt + delta);
    }

    /// Returns to level.
    pub fn level(&mut self) {
        self.set(Tilt::ZERO);
    }
}

impl OrientationSensor for ManualSensor {
    fn register(&mut self, sink: TiltSignal) {
        sink.set(self.tilt);
        self.sink = Some(sink);
    }

    fn unregister(&mut self) {
        self.sink = None;
    }

    fn is_registered(&self) -> bool {
        self.sink.is_some()
    }
}

/// Produces a slow Lissajous wobble from a background thread.
///
/// Each sample goes through the rotation-vector path, the same way a real
/// device sample would.
#[derive(Debug)]
pub struct SimulatedSensor {
    amplitude: Tilt,
    period: Duration,
    sample_interval: Duration,
    worker: Option<Worker>,
}

#[derive(Debug)]
struct Worker {
    stop: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl SimulatedSensor {
    /// A sensor swinging ±0.35 rad roll and ±0.25 rad pitch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            amplitude: Tilt::new(0.35, 0.25),
            period: Duration::from_secs(6),
            sample_interval: Duration::from_millis(16),
            worker: None,
        }
    }

    /// Overrides how often samples are produced.
    #[must_use]
    pub fn with_sample_interval(mut self, interval: Duration) -> Self {
        self.sample_interval = interval;
        self
    }

    /// Orientation at `elapsed` into the wobble.
    #[must_use]
    pub fn sample_at(amplitude: Tilt, period: Duration, elapsed: Duration) -> Tilt {
        let phase = std::f32::consts::TAU * elapsed.as_secs_f32() / period.as_secs_f32();
        let wanted = Tilt::new(amplitude.x * phase.sin(), amplitude.y * (2.0 * phase).sin());
        tilt_from_rotation_vector(&rotation_vector_from_tilt(wanted))
    }
}

impl Default for SimulatedSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl OrientationSensor for SimulatedSensor {
    fn register(&mut self, sink: TiltSignal) {
        if self.worker.is_some() {
            tracing::warn!("Simulated sensor registered twice; replacing the running worker");
            self.unregister();
        }

        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        let (amplitude, period, interval) = (self.amplitude, self.period, self.sample_interval);

        let handle = thread::spawn(move || {
            let started = Instant::now();
            while !stop_flag.load(Ordering::Acquire) {
                sink.set(Self::sample_at(amplitude, period, started.elapsed()));
                thread::sleep(interval);
            }
        });

        self.worker = Some(Worker { stop, handle });
    }

    fn unregister(&mut self) {
        if let Some(worker) = self.worker.take() {
            worker.stop.store(true, Ordering::Release);
            if worker.handle.join().is_err() {
                tracing::warn!("Simulated sensor thread panicked");
            }
        }
    }

    fn is_registered(&self) -> bool {
        self.worker.is_some()
    }
}

impl Drop for SimulatedSensor {
    fn drop(&mut self) {
        self.unregister();
    }
}

/// Either built-in source, chosen at startup.
#[derive(Debug)]
pub enum AnySensor {
    /// See [`SimulatedSensor`]
    Simulated(SimulatedSensor),
    /// See [`ManualSensor`]
    Manual(ManualSensor),
}

impl AnySensor {
    /// Builds the sensor for `source`.
    #[must_use]
    pub fn from_source(source: SensorSource) -> Self {
        match source {
            SensorSource::Simulated => Self::Simulated(SimulatedSensor::new()),
            SensorSource::Manual => Self::Manual(ManualSensor::new()),
        }
    }

    /// The manual sensor, if that is what is running.
    pub fn as_manual_mut(&mut self) -> Option<&mut ManualSensor> {
        match self {
            Self::Manual(sensor) => Some(sensor),
            Self::Simulated(_) => None,
        }
    }
}

impl OrientationSensor for AnySensor {
    fn register(&mut self, sink: TiltSignal) {
        match self {
            Self::Simulated(sensor) => sensor.register(sink),
            Self::Manual(sensor) => sensor.register(sink),
        }
    }

    fn unregister(&mut self) {
        match self {
            Self::Simulated(sensor) => sensor.unregister(),
            Self::Manual(sensor) => sensor.unregister(),
        }
    }

    fn is_registered(&self) -> bool {
        match self {
            Self::Simulated(sensor) => sensor.is_registered(),
            Self::Manual(sensor) => sensor.is_registered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_publishes_only_while_registered() {
        let signal = TiltSignal::new();
        let mut sensor = ManualSensor::new();

        sensor.nudge(Tilt::new(0.1, 0.0));
        assert_eq!(signal.get(), Tilt::ZERO);

        sensor.register(signal.clone());
        assert!(sensor.is_registered());
        assert_eq!(signal.get(), Tilt::new(0.1, 0.0));

        sensor.nudge(Tilt::new(0.0, -0.2));
        assert_eq!(signal.get(), Tilt::new(0.1, -0.2));

        sensor.unregister();
        sensor.level();
        assert_eq!(signal.get(), Tilt::new(0.1, -0.2));
        assert_eq!(sensor.tilt(), Tilt::ZERO);
    }

    #[test]
    fn test_manual_unregister_twice_is_harmless() {
        let mut sensor = ManualSensor::new();
        sensor.unregister();
        sensor.register(TiltSignal::new());
        sensor.unregister();
        sensor.unregister();
        assert!(!sensor.is_registered());
    }

    #[test]
    fn test_wobble_starts_level_and_stays_in_amplitude() {
        let amplitude = Tilt::new(0.35, 0.25);
        let period = Duration::from_secs(6);
        let start = SimulatedSensor::sample_at(amplitude, period, Duration::ZERO);
        assert!(start.x.abs() < 1e-5 && start.y.abs() < 1e-5);

        for ms in (0..6_000).step_by(250) {
            let tilt = SimulatedSensor::sample_at(amplitude, period, Duration::from_millis(ms));
            assert!(tilt.x.abs() <= 0.35 + 1e-3, "roll {} at {ms}ms", tilt.x);
            assert!(tilt.y.abs() <= 0.25 + 1e-3, "pitch {} at {ms}ms", tilt.y);
        }
    }

    #[test]
    fn test_simulated_thread_writes_and_stops() {
        let signal = TiltSignal::new();
        let mut sensor = SimulatedSensor::new().with_sample_interval(Duration::from_millis(1));
        sensor.register(signal.clone());
        assert!(sensor.is_registered());

        let deadline = Instant::now() + Duration::from_secs(2);
        while signal.get() == Tilt::ZERO && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(5));
        }
        assert_ne!(signal.get(), Tilt::ZERO);

        sensor.unregister();
        assert!(!sensor.is_registered());
        let frozen = signal.get();
        thread::sleep(Duration::from_millis(20));
        assert_eq!(signal.get(), frozen);
    }

    #[test]
    fn test_any_sensor_dispatch() {
        let mut sensor = AnySensor::from_source(SensorSource::Manual);
        let signal = TiltSignal::new();
        sensor.register(signal.clone());
        if let Some(manual) = sensor.as_manual_mut() {
            manual.nudge(Tilt::new(0.2, 0.2));
        }
        assert_eq!(signal.get(), Tilt::new(0.2, 0.2));
        sensor.unregister();
        assert!(!sensor.is_registered());

        assert!(AnySensor::from_source(SensorSource::Simulated)
            .as_manual_mut()
            .is_none());
    }
}
