//! Unit tests for configuration validation.

use plotter_motion::axis::AxisLabel;
use plotter_motion::config::{validate_config, MachineConfig};
use plotter_motion::error::{ConfigError, Error};
use plotter_motion::motor::MotorId;

/// Test validation of the stock configuration.
#[test]
fn test_default_config_passes_validation() {
    assert!(validate_config(&MachineConfig::default()).is_ok());
}

/// Test validation fails for a zero travel bound.
#[test]
fn test_zero_max_travel() {
    let toml_str = r#"
[y]
max_travel = 0
"#;

    let config: MachineConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidMaxTravel(AxisLabel::Y)))
    );
}

/// Test validation fails for non-positive steps/mm.
#[test]
fn test_negative_steps_per_mm() {
    let toml_str = r#"
[x]
steps_per_mm = -80.0
"#;

    let config: MachineConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidStepsPerMm {
            axis: AxisLabel::X,
            ..
        }))
    ));
}

/// Test validation fails when the expected length does not fit the travel bound.
#[test]
fn test_budget_exceeds_travel() {
    let toml_str = r#"
[x]
max_travel = 13800

[calibration]
expected_x = 13791
tolerance = 50
"#;

    let config: MachineConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::BudgetExceedsTravel {
            axis: AxisLabel::X,
            budget: 13_841,
            max_travel: 13_800,
        }))
    );
}

/// Test validation fails for a zero expected length.
#[test]
fn test_zero_expected_length() {
    let toml_str = r#"
[calibration]
expected_y = 0
"#;

    let config: MachineConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidExpectedLength(AxisLabel::Y)))
    );
}

/// Test validation fails for an escape probe that could cross an axis.
#[test]
fn test_escape_longer_than_axis() {
    let toml_str = r#"
[calibration]
expected_y = 500
escape_steps_b = 500
"#;

    let config: MachineConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert_eq!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidEscapeSteps {
            motor: MotorId::B,
            steps: 500,
        }))
    );
}

/// Test that parse_config runs validation.
#[test]
fn test_parse_config_validates() {
    let result = plotter_motion::parse_config("[calibration]\nescape_steps_a = 0\n");
    assert_eq!(
        result,
        Err(Error::Config(ConfigError::InvalidEscapeSteps {
            motor: MotorId::A,
            steps: 0,
        }))
    );
}
