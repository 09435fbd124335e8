//! Configuration validation.

use crate::axis::AxisLabel;
use crate::error::{ConfigError, Error, Result};
use crate::motor::MotorId;

use super::MachineConfig;

/// Validate a machine configuration.
///
/// Checks:
/// - Travel bounds and steps/mm are positive
/// - Expected travel plus tolerance fits inside each axis' travel bound
/// - Escape probes are non-zero and shorter than the axis they may land on
pub fn validate_config(config: &MachineConfig) -> Result<()> {
    for label in [AxisLabel::X, AxisLabel::Y] {
        validate_axis(label, config)?;
    }

    let shortest = config
        .calibration
        .expected_x
        .min(config.calibration.expected_y);
    for motor in [MotorId::A, MotorId::B] {
        let steps = config.calibration.escape_steps(motor);
        // The probe must not be able to cross a whole axis.
        if steps == 0 || steps >= shortest {
            return Err(Error::Config(ConfigError::InvalidEscapeSteps { motor, steps }));
        }
    }

    Ok(())
}

fn validate_axis(label: AxisLabel, config: &MachineConfig) -> Result<()> {
    let axis = config.axis(label);

    if axis.max_travel == 0 {
        return Err(Error::Config(ConfigError::InvalidMaxTravel(label)));
    }

    if !axis.steps_per_mm.is_finite() || axis.steps_per_mm <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidStepsPerMm {
            axis: label,
            value: axis.steps_per_mm,
        }));
    }

    let expected = config.calibration.expected(label);
    if expected == 0 {
        return Err(Error::Config(ConfigError::InvalidExpectedLength(label)));
    }

    let budget = config.calibration.budget(label);
    if budget > axis.max_travel {
        return Err(Error::Config(ConfigError::BudgetExceedsTravel {
            axis: label,
            budget,
            max_travel: axis.max_travel,
        }));
    }

    Ok(())
}
