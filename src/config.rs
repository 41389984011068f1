//! Configuration management for the application.
//!
//! This module handles loading and validating the keyboard configuration in
//! TOML format with platform-specific directory resolution. Settings are
//! read-only: nothing is ever written back.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::animation::{BackdropSensitivities, LayerSensitivities, DEFAULT_IDLE_ELEVATION};
use crate::constants::APP_DATA_DIR;
use crate::input::RepeatTiming;
use crate::sensor::SensorSource;
use crate::surface::SurfaceSettings;
use crate::theme::ThemeId;

/// Theme selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// Theme shown at startup
    pub initial: ThemeId,
}

/// Tilt multipliers for every parallax layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    /// Key surface (moves with the tilt)
    pub surface: f32,
    /// Key body (moves slightly against the tilt)
    pub body: f32,
    /// Key socket (moves strongly against the tilt)
    pub base: f32,
    /// Keyboard background layer
    pub background: f32,
    /// Keyboard foreground overlay
    pub overlay: f32,
    /// Scale applied to both backdrop layers
    pub backdrop_scale: f32,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        let layers = LayerSensitivities::default();
        let backdrop = BackdropSensitivities::default();
        Self {
            surface: layers.surface,
            body: layers.body,
            base: layers.base,
            background: backdrop.background,
            overlay: backdrop.overlay,
            backdrop_scale: backdrop.scale,
        }
    }
}

/// Key press behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeysConfig {
    /// Height of a key at rest
    pub idle_elevation: f32,
    /// Hold time before Backspace starts repeating
    pub repeat_delay_ms: u64,
    /// Gap between Backspace repeats
    pub repeat_interval_ms: u64,
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            idle_elevation: DEFAULT_IDLE_ELEVATION,
            repeat_delay_ms: 500,
            repeat_interval_ms: 100,
        }
    }
}

/// Orientation input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SensorConfig {
    /// Which tilt source drives the parallax
    pub source: SensorSource,
}

/// Terminal UI preferences.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Frame interval in milliseconds
    pub tick_ms: u64,
    /// Surface units per terminal column
    pub units_per_column: f32,
    /// Surface units per terminal row
    pub units_per_row: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: 16,
            units_per_column: 2.0,
            units_per_row: 4.0,
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/AsmrKeyboard/config.toml`
/// - macOS: `~/Library/Application Support/AsmrKeyboard/config.toml`
/// - Windows: `%APPDATA%\AsmrKeyboard\config.toml`
///
/// Every section and every field is optional.
///
/// # Validation
///
/// - `parallax.surface` must be positive, `parallax.body` negative and
///   `parallax.base` below `parallax.body`
/// - `parallax.backdrop_scale` must be at least 1
/// - `keys.idle_elevation` must not be negative
/// - `keys.repeat_interval_ms` and `ui.tick_ms` must be positive
/// - `ui.units_per_column` and `ui.units_per_row` must be positive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Theme selection
    pub theme: ThemeConfig,
    /// Parallax multipliers
    pub parallax: ParallaxConfig,
    /// Key behaviour
    pub keys: KeysConfig,
    /// Orientation input
    pub sensor: SensorConfig,
    /// Terminal UI
    pub ui: UiConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    ///
    /// - Linux: `~/.config/AsmrKeyboard/`
    /// - macOS: `~/Library/Application Support/AsmrKeyboard/`
    /// - Windows: `%APPDATA%\AsmrKeyboard\`
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_DATA_DIR);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the default config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::new());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    ///
    /// Unlike [`Config::load`], a missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .context(format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .context(format!("Invalid config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        let parallax = &self.parallax;
        let all_finite = [
            parallax.surface,
            parallax.body,
            parallax.base,
            parallax.background,
            parallax.overlay,
            parallax.backdrop_scale,
            self.keys.idle_elevation,
            self.ui.units_per_column,
            self.ui.units_per_row,
        ]
        .iter()
        .all(|value| value.is_finite());
        if !all_finite {
            anyhow::bail!("Config values must be finite numbers");
        }

        if parallax.surface <= 0.0 {
            anyhow::bail!(
                "parallax.surface must be positive (got {})",
                parallax.surface
            );
        }
        if parallax.body >= 0.0 {
            anyhow::bail!("parallax.body must be negative (got {})", parallax.body);
        }
        if parallax.base >= parallax.body {
            anyhow::bail!(
                "parallax.base ({}) must be below parallax.body ({})",
                parallax.base,
                parallax.body
            );
        }
        if parallax.backdrop_scale < 1.0 {
            anyhow::bail!(
                "parallax.backdrop_scale must be at least 1.0 (got {})",
                parallax.backdrop_scale
            );
        }

        if self.keys.idle_elevation < 0.0 {
            anyhow::bail!(
                "keys.idle_elevation must not be negative (got {})",
                self.keys.idle_elevation
            );
        }
        if self.keys.repeat_interval_ms == 0 {
            anyhow::bail!("keys.repeat_interval_ms must be greater than 0");
        }

        if self.ui.tick_ms == 0 {
            anyhow::bail!("ui.tick_ms must be greater than 0");
        }
        if self.ui.units_per_column <= 0.0 || self.ui.units_per_row <= 0.0 {
            anyhow::bail!("ui.units_per_column and ui.units_per_row must be positive");
        }

        Ok(())
    }

    /// Surface tunables derived from this configuration.
    #[must_use]
    pub fn surface_settings(&self) -> SurfaceSettings {
        SurfaceSettings {
            layers: LayerSensitivities {
                surface: self.parallax.surface,
                body: self.parallax.body,
                base: self.parallax.base,
            },
            backdrop: BackdropSensitivities {
                background: self.parallax.background,
                overlay: self.parallax.overlay,
                scale: self.parallax.backdrop_scale,
            },
            idle_elevation: self.keys.idle_elevation,
            repeat: RepeatTiming::new(
                Duration::from_millis(self.keys.repeat_delay_ms),
                Duration::from_millis(self.keys.repeat_interval_ms),
            ),
        }
    }

    /// Frame interval for the terminal UI.
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.ui.tick_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.theme.initial, ThemeId::Wood);
        assert_eq!(config.parallax.surface, 12.0);
        assert_eq!(config.parallax.body, -4.0);
        assert_eq!(config.parallax.base, -15.0);
        assert_eq!(config.parallax.background, -40.0);
        assert_eq!(config.parallax.overlay, 50.0);
        assert_eq!(config.keys.repeat_delay_ms, 500);
        assert_eq!(config.keys.repeat_interval_ms, 100);
        assert_eq!(config.sensor.source, SensorSource::Simulated);
        assert_eq!(config.ui.tick_ms, 16);
    }

    #[test]
    fn test_config_validate() {
        assert!(Config::new().validate().is_ok());
    }

    #[test]
    fn test_config_validate_parallax_signs() {
        let mut config = Config::new();
        config.parallax.surface = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.parallax.body = 1.0;
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.parallax.base = -2.0;
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("parallax.base"));
    }

    #[test]
    fn test_config_validate_timing() {
        let mut config = Config::new();
        config.keys.repeat_interval_ms = 0;
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.ui.tick_ms = 0;
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.keys.idle_elevation = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"
[theme]
initial = "SlimePop"

[keys]
repeat_delay_ms = 300

[sensor]
source = "manual"
"#,
        );

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.theme.initial, ThemeId::SlimePop);
        assert_eq!(config.keys.repeat_delay_ms, 300);
        assert_eq!(config.keys.repeat_interval_ms, 100);
        assert_eq!(config.sensor.source, SensorSource::Manual);
        assert_eq!(config.parallax, ParallaxConfig::default());
    }

    #[test]
    fn test_load_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "");
        assert_eq!(Config::load_from(&path).unwrap(), Config::new());
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[parallax]\nbody = 3.0\n");
        let err = format!("{:#}", Config::load_from(&path).unwrap_err());
        assert!(err.contains("Invalid config file"));
        assert!(err.contains("parallax.body"));
    }

    #[test]
    fn test_load_rejects_bad_toml() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[theme\ninitial = ");
        let err = Config::load_from(&path).unwrap_err().to_string();
        assert!(err.contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Config::load_from(&dir.path().join("nope.toml"))
            .unwrap_err()
            .to_string();
        assert!(err.contains("Failed to read config file"));
    }

    #[test]
    fn test_surface_settings() {
        let mut config = Config::new();
        config.keys.repeat_delay_ms = 250;
        config.parallax.surface = 8.0;
        let settings = config.surface_settings();
        assert_eq!(settings.layers.surface, 8.0);
        assert_eq!(settings.repeat.delay, Duration::from_millis(250));
        assert_eq!(settings.repeat.interval, Duration::from_millis(100));
        assert_eq!(settings.idle_elevation, 6.0);
        assert_eq!(config.tick_interval(), Duration::from_millis(16));
    }

    #[test]
    fn test_config_dir_name() {
        if let Ok(dir) = Config::config_dir() {
            assert!(dir.ends_with(APP_DATA_DIR));
        }
    }
}
