//! Machine configuration - root configuration structure.

use serde::Deserialize;

use super::axis::AxisConfig;
use super::calibration::CalibrationConfig;
use super::switches::SwitchConfig;
use crate::axis::AxisLabel;

/// Root configuration structure from TOML.
///
/// Every table is optional; missing values fall back to the stock plotter.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// X axis settings.
    pub x: AxisConfig,

    /// Y axis settings.
    pub y: AxisConfig,

    /// Discovery and measurement tuning.
    pub calibration: CalibrationConfig,

    /// Limit switch wiring.
    pub switches: SwitchConfig,
}

impl MachineConfig {
    /// Get the configuration of an axis.
    pub fn axis(&self, label: AxisLabel) -> &AxisConfig {
        match label {
            AxisLabel::X => &self.x,
            AxisLabel::Y => &self.y,
        }
    }
}
