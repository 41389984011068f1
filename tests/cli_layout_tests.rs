//! End-to-end tests for `asmr-keyboard layout`.
#![allow(unused_variables)] // Temp dirs must be kept alive even if not directly accessed

use std::process::Command;

mod fixtures;

use fixtures::*;

fn run_layout(args: &[&str]) -> std::process::Output {
    let (config_path, config_temp) = default_config();
    let mut full = vec!["--config", config_path.to_str().unwrap(), "layout"];
    full.extend_from_slice(args);
    Command::new(asmr_bin())
        .args(&full)
        .output()
        .expect("Failed to execute command")
}

fn labels(row: &serde_json::Value) -> Vec<String> {
    row.as_array()
        .unwrap()
        .iter()
        .map(|key| key["label"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_layout_alphabetic_json() {
    let output = run_layout(&["--json"]);
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let result: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Should parse JSON");
    assert_eq!(result["mode"], "alphabetic");
    assert_eq!(result["toggles_to"], "symbolic");

    let rows = result["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(labels(&rows[0]).concat(), "qwertyuiop");
    assert_eq!(
        labels(&rows[2]),
        vec!["SFT", "z", "x", "c", "v", "b", "n", "m", "BS"]
    );
    assert_eq!(labels(&rows[3]), vec!["?123", "SPACE", "ENTER"]);
    assert_eq!(rows[2][0]["action"], "shift");
    assert_eq!(rows[3][0]["action"], "mode_change");
}

#[test]
fn test_layout_widths_are_proportional() {
    let output = run_layout(&["--width", "85", "--json"]);
    assert_eq!(output.status.code(), Some(0));

    let result: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Should parse JSON");
    let bottom = result["rows"][3].as_array().unwrap();
    let widths: Vec<f64> = bottom
        .iter()
        .map(|key| key["rect"]["width"].as_f64().unwrap())
        .collect();
    for (actual, expected) in widths.iter().zip([15.0, 50.0, 20.0]) {
        assert!((actual - expected).abs() < 1e-3, "{actual} != {expected}");
    }
}

#[test]
fn test_layout_symbolic_shifted_labels_unchanged_for_symbols() {
    let output = run_layout(&["--mode", "symbolic", "--shifted", "--json"]);
    assert_eq!(output.status.code(), Some(0));

    let result: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Should parse JSON");
    assert_eq!(result["mode"], "symbolic");
    assert_eq!(labels(&result["rows"][0]).concat(), "1234567890");
    assert_eq!(labels(&result["rows"][3])[0], "ABC");
}

#[test]
fn test_layout_rejects_zero_width() {
    let output = run_layout(&["--width", "0"]);
    assert_eq!(output.status.code(), Some(1));
}
