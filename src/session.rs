//! Host lifecycle adapter.
//!
//! Bridges show / hide / start-input / destroy callbacks to the surface and
//! the orientation sensor. The sensor is registered exactly once per shown
//! window and unregistered exactly once per hide, so registrations always
//! balance.

use crate::sensor::OrientationSensor;
use crate::surface::KeyboardSurface;

/// One keyboard session: a surface plus the sensor feeding its tilt.
#[derive(Debug)]
pub struct KeyboardSession<S: OrientationSensor> {
    surface: KeyboardSurface,
    sensor: S,
    visible: bool,
}

impl<S: OrientationSensor> KeyboardSession<S> {
    /// Wraps `surface` and `sensor`. Nothing is registered until the window shows.
    pub fn new(surface: KeyboardSurface, sensor: S) -> Self {
        Self {
            surface,
            sensor,
            visible: false,
        }
    }

    /// The keyboard surface.
    #[must_use]
    pub const fn surface(&self) -> &KeyboardSurface {
        &self.surface
    }

    /// Mutable access to the keyboard surface.
    pub fn surface_mut(&mut self) -> &mut KeyboardSurface {
        &mut self.surface
    }

    /// The orientation sensor.
    #[must_use]
    pub const fn sensor(&self) -> &S {
        &self.sensor
    }

    /// Mutable access to the orientation sensor.
    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    /// Whether the keyboard window is showing.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// The keyboard window became visible. Repeated calls while visible are ignored.
    pub fn on_window_shown(&mut self) {
        if self.visible {
            tracing::debug!("Window already shown, sensor stays registered");
            return;
        }
        self.visible = true;
        self.sensor.register(self.surface.tilt_signal().clone());
        tracing::info!("Keyboard shown, sensor registered");
    }

    /// The keyboard window was hidden.
    ///
    /// Unregisters the sensor and releases every held key, which also
    /// cancels any pending repeat.
    pub fn on_window_hidden(&mut self) {
        if !self.visible {
            tracing::debug!("Window already hidden");
            return;
        }
        self.visible = false;
        self.sensor.unregister();
        self.surface.release_all();
        tracing::info!("Keyboard hidden, sensor unregistered");
    }

    /// A new text field gained focus: layout and shift start fresh.
    pub fn on_start_input(&mut self) {
        self.surface.reset_session();
        tracing::debug!("Input session started");
    }
}

impl<S: OrientationSensor> Drop for KeyboardSession<S> {
    fn drop(&mut self) {
        if self.visible {
            self.visible = false;
            self.sensor.unregister();
            tracing::info!("Keyboard destroyed while shown, sensor unregistered");
        }
    }
}
