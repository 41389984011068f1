//! End-to-end tests for `asmr-keyboard themes`.
#![allow(unused_variables)] // Temp dirs must be kept alive even if not directly accessed

use std::process::Command;

mod fixtures;

use fixtures::*;

#[test]
fn test_themes_json_lists_cycle_in_order() {
    let (config_path, config_temp) = default_config();

    let output = Command::new(asmr_bin())
        .args(["--config", config_path.to_str().unwrap(), "themes", "--json"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let result: serde_json::Value = serde_json::from_str(&stdout).expect("Should parse JSON");
    let themes = result.as_array().expect("Should be an array");

    let names: Vec<&str> = themes.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Wood", "FrozenSerenity", "SlimePop", "CozyEmber"]);

    let nexts: Vec<&str> = themes.iter().map(|t| t["next"].as_str().unwrap()).collect();
    assert_eq!(nexts, vec!["FrozenSerenity", "SlimePop", "CozyEmber", "Wood"]);
}

#[test]
fn test_themes_json_colors_and_squash() {
    let (config_path, config_temp) = default_config();

    let output = Command::new(asmr_bin())
        .args(["--config", config_path.to_str().unwrap(), "themes", "--json"])
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(0));

    let result: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("Should parse JSON");

    assert_eq!(result[0]["colors"]["key_background"], "#FF8D6E63");
    assert_eq!(result[1]["colors"]["key_background"], "#99FFFFFF");
    assert_eq!(result[2]["animation"]["press_scale_x"].as_f64().unwrap() as f32, 1.1);
    assert_eq!(result[2]["animation"]["press_scale_y"].as_f64().unwrap() as f32, 0.9);
    assert_eq!(result[3]["colors"]["key_text"], "#FFFF9800");
}

#[test]
fn test_themes_text_output() {
    let (config_path, config_temp) = default_config();

    let output = Command::new(asmr_bin())
        .args(["--config", config_path.to_str().unwrap(), "themes"])
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("CozyEmber  →  Wood"));
    assert!(stdout.contains("#FF5D4037"));
}
