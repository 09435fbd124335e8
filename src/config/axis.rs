//! Per-axis configuration.

use serde::Deserialize;

use super::units::{Millimeters, MillimetersPerMinute, Steps};

/// Configuration for one travel axis.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    /// Upper bound for commanded positions, in steps.
    ///
    /// Known hardware revisions use 16000 or 20000.
    pub max_travel: u32,

    /// Motor steps per millimetre of carriage travel.
    pub steps_per_mm: f32,

    /// Feed rate applied when the axis is created.
    #[serde(rename = "speed_mm_per_min")]
    pub speed: MillimetersPerMinute,

    /// Extra steps a homing seek may take beyond `max_travel` before giving up.
    pub homing_slack: u32,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            max_travel: 16_000,
            steps_per_mm: 80.0,
            speed: MillimetersPerMinute(1000),
            homing_slack: 50,
        }
    }
}

impl AxisConfig {
    /// Config with a different travel bound and defaults elsewhere.
    pub fn with_max_travel(max_travel: u32) -> Self {
        Self {
            max_travel,
            ..Self::default()
        }
    }

    /// Maximum number of steps a homing seek may take.
    #[inline]
    pub fn homing_budget(&self) -> u32 {
        self.max_travel.saturating_add(self.homing_slack)
    }

    /// Convert millimetres to steps.
    #[inline]
    pub fn to_steps(&self, mm: Millimeters) -> Steps {
        mm.to_steps(self.steps_per_mm)
    }

    /// Convert steps to millimetres.
    #[inline]
    pub fn to_millimeters(&self, steps: u32) -> Millimeters {
        Steps::from(steps).to_millimeters(self.steps_per_mm)
    }
}
