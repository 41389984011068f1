//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the on-disk directory name.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "ASMR Keyboard";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "asmr-keyboard";

/// The directory name for application data (config, logs).
///
/// Used in platform-specific paths:
/// - Linux: `~/.config/{APP_DATA_DIR}/`
/// - macOS: `~/Library/Application Support/{APP_DATA_DIR}/`
/// - Windows: `%APPDATA%\{APP_DATA_DIR}\`
pub const APP_DATA_DIR: &str = "AsmrKeyboard";

/// File name of the terminal UI log inside the cache directory.
pub const LOG_FILE_NAME: &str = "asmr-keyboard.log";
