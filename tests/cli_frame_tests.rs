//! End-to-end tests for `asmr-keyboard frame`.
#![allow(unused_variables)] // Temp dirs must be kept alive even if not directly accessed

use std::process::Command;

mod fixtures;

use fixtures::*;

fn run_frame(config: &str, args: &[&str]) -> std::process::Output {
    let (config_path, config_temp) = create_temp_config(config);
    let mut full = vec!["--config", config_path.to_str().unwrap(), "frame"];
    full.extend_from_slice(args);
    Command::new(asmr_bin())
        .args(&full)
        .output()
        .expect("Failed to execute command")
}

fn vec_of(value: &serde_json::Value) -> (f64, f64) {
    (value["x"].as_f64().unwrap(), value["y"].as_f64().unwrap())
}

#[test]
fn test_frame_full_sink_layers_coincide() {
    let output = run_frame(
        "",
        &["--tilt-x", "0.3", "--tilt-y=-0.2", "--progress", "1", "--json"],
    );
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let result: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Should parse JSON");
    let key = &result["key"];
    assert_eq!(vec_of(&key["surface_offset"]), vec_of(&key["base_offset"]));
    assert_eq!(vec_of(&key["body_offset"]), vec_of(&key["base_offset"]));
    assert_eq!(key["elevation"].as_f64().unwrap(), 0.0);
}

#[test]
fn test_frame_idle_offsets_follow_tilt() {
    let output = run_frame("", &["--tilt-x", "0.5", "--json"]);
    assert_eq!(output.status.code(), Some(0));

    let result: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Should parse JSON");
    let key = &result["key"];
    assert_eq!(vec_of(&key["surface_offset"]), (6.0, 0.0));
    assert_eq!(vec_of(&key["body_offset"]), (-2.0, 0.0));
    assert_eq!(vec_of(&key["base_offset"]), (-7.5, 0.0));
    assert_eq!(key["elevation"].as_f64().unwrap(), 6.0);
    assert_eq!(vec_of(&result["backdrop"]["background"]), (-20.0, 0.0));
    assert_eq!(vec_of(&result["backdrop"]["overlay"]), (25.0, 0.0));
}

#[test]
fn test_frame_uses_configured_sensitivity() {
    let output = run_frame("[parallax]\nsurface = 20.0\n", &["--tilt-x", "0.5", "--json"]);
    assert_eq!(output.status.code(), Some(0));

    let result: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Should parse JSON");
    assert_eq!(vec_of(&result["key"]["surface_offset"]), (10.0, 0.0));
}

#[test]
fn test_frame_slime_pop_squash() {
    let output = run_frame("", &["--progress", "1", "--theme", "slime-pop", "--json"]);
    assert_eq!(output.status.code(), Some(0));

    let result: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Should parse JSON");
    assert_eq!(result["theme"], "SlimePop");
    let (x, y) = vec_of(&result["key"]["scale"]);
    assert_eq!(x as f32, 1.1);
    assert_eq!(y as f32, 0.9);
}

#[test]
fn test_frame_unknown_theme_is_validation_error() {
    let output = run_frame("", &["--theme", "neon", "--json"]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown theme 'neon'"));
}

#[test]
fn test_frame_invalid_config_is_validation_error() {
    let output = run_frame("[parallax]\nbody = 3.0\n", &["--json"]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("parallax.body must be negative"));
}

#[test]
fn test_frame_missing_config_is_io_error() {
    let output = Command::new(asmr_bin())
        .args(["--config", "/nonexistent/asmr/config.toml", "frame"])
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(2));
}
