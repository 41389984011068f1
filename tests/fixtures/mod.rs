//! Shared helpers for CLI end-to-end tests.
#![allow(dead_code)]

use std::path::PathBuf;
use tempfile::TempDir;

/// Path to the asmr-keyboard binary
pub fn asmr_bin() -> &'static str {
    env!("CARGO_BIN_EXE_asmr-keyboard")
}

/// Writes `content` as config.toml in a fresh temp dir.
///
/// The returned `TempDir` must be kept alive for the path to stay valid.
pub fn create_temp_config(content: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.toml");
    std::fs::write(&path, content).expect("Failed to write config");
    (path, temp_dir)
}

/// A config file with every default spelled out.
pub fn default_config() -> (PathBuf, TempDir) {
    create_temp_config(
        r#"
[theme]
initial = "Wood"

[keys]
repeat_delay_ms = 500
repeat_interval_ms = 100
"#,
    )
}
