//! Unit tests for TOML configuration parsing.

use plotter_motion::config::{load_config, MachineConfig, MillimetersPerMinute};
use plotter_motion::error::{ConfigError, Error};

/// Test parsing a full plotter configuration from TOML.
#[test]
fn test_parse_machine_config() {
    let toml_str = r#"
[x]
max_travel = 20000
steps_per_mm = 100.0
speed_mm_per_min = 1800
homing_slack = 120

[y]
max_travel = 16000

[calibration]
expected_x = 17500
expected_y = 12000
tolerance = 80
escape_steps_a = 150
escape_steps_b = 300
probe_speed_mm_per_min = 200
seek_speed_mm_per_min = 3000

[switches]
normally_closed = true
"#;

    let config: MachineConfig = toml::from_str(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.x.max_travel, 20_000);
    assert_eq!(config.x.steps_per_mm, 100.0);
    assert_eq!(config.x.speed, MillimetersPerMinute(1800));
    assert_eq!(config.x.homing_slack, 120);
    assert_eq!(config.y.max_travel, 16_000);
    assert_eq!(config.y.steps_per_mm, 80.0);

    assert_eq!(config.calibration.expected_x, 17_500);
    assert_eq!(config.calibration.tolerance, 80);
    assert_eq!(config.calibration.escape_steps_b, 300);
    assert_eq!(config.calibration.probe_speed, MillimetersPerMinute(200));
    assert_eq!(config.calibration.seek_speed, MillimetersPerMinute(3000));
    assert!(config.switches.normally_closed);
}

/// Test that every table may be left out.
#[test]
fn test_missing_tables_use_defaults() {
    let config: MachineConfig = toml::from_str("").expect("Failed to parse TOML");
    assert_eq!(config, MachineConfig::default());
    assert_eq!(config.x.max_travel, 16_000);
    assert_eq!(config.calibration.expected_y, 10_764);
    assert!(!config.switches.normally_closed);
}

/// Test that a mistyped value is rejected during parsing.
#[test]
fn test_wrong_type_rejected() {
    let toml_str = r#"
[x]
max_travel = "far"
"#;

    let result: Result<MachineConfig, _> = toml::from_str(toml_str);
    assert!(result.is_err(), "Should reject a string travel bound");

    let result = plotter_motion::parse_config(toml_str);
    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::ParseError(_)))
    ));
}

/// Test loading from a file on disk.
#[test]
fn test_load_config_from_file() {
    let path = std::env::temp_dir().join(format!(
        "plotter-motion-{}-load.toml",
        std::process::id()
    ));
    std::fs::write(&path, "[x]\nmax_travel = 20000\n").expect("Failed to write config");

    let config = load_config(&path).expect("Failed to load config");
    let _ = std::fs::remove_file(&path);

    assert_eq!(config.x.max_travel, 20_000);
    assert_eq!(config.y.max_travel, 16_000);
}

/// Test that a missing file surfaces as an I/O error.
#[test]
fn test_load_missing_file() {
    let result = load_config("/nonexistent/plotter.toml");
    assert!(matches!(result, Err(Error::Config(ConfigError::IoError(_)))));
}
