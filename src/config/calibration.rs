//! Calibration constants.

use serde::Deserialize;

use super::units::MillimetersPerMinute;
use crate::axis::AxisLabel;
use crate::motor::MotorId;

/// Tuning for the discovery and measurement passes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Expected X travel in steps.
    pub expected_x: u32,

    /// Expected Y travel in steps.
    pub expected_y: u32,

    /// Slack added to the expected travel before a seek counts as jammed.
    pub tolerance: u32,

    /// Probe distance for motor A while looking for switch changes.
    pub escape_steps_a: u32,

    /// Probe distance for motor B while looking for switch changes.
    pub escape_steps_b: u32,

    /// Feed rate used while probing pre-triggered switches.
    #[serde(rename = "probe_speed_mm_per_min")]
    pub probe_speed: MillimetersPerMinute,

    /// Feed rate used for seeks and travel measurement.
    #[serde(rename = "seek_speed_mm_per_min")]
    pub seek_speed: MillimetersPerMinute,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            expected_x: 13_791,
            expected_y: 10_764,
            tolerance: 50,
            escape_steps_a: 200,
            escape_steps_b: 200,
            probe_speed: MillimetersPerMinute(250),
            seek_speed: MillimetersPerMinute(2500),
        }
    }
}

impl CalibrationConfig {
    /// Expected travel for an axis.
    #[inline]
    pub fn expected(&self, axis: AxisLabel) -> u32 {
        match axis {
            AxisLabel::X => self.expected_x,
            AxisLabel::Y => self.expected_y,
        }
    }

    /// Step budget for a seek along `axis`: expected travel plus tolerance.
    #[inline]
    pub fn budget(&self, axis: AxisLabel) -> u32 {
        self.expected(axis).saturating_add(self.tolerance)
    }

    /// Budget for a seek whose axis is not known yet.
    #[inline]
    pub fn discovery_budget(&self) -> u32 {
        self.budget(AxisLabel::X).max(self.budget(AxisLabel::Y))
    }

    /// Probe distance for a motor.
    #[inline]
    pub fn escape_steps(&self, motor: MotorId) -> u32 {
        match motor {
            MotorId::A => self.escape_steps_a,
            MotorId::B => self.escape_steps_b,
        }
    }
}
