//! Limit switch wiring.

use serde::Deserialize;

/// Electrical configuration shared by all four limit switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct SwitchConfig {
    /// Switches are normally closed: a low input means triggered.
    pub normally_closed: bool,
}
