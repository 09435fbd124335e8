//! Configuration module for plotter-motion.
//!
//! Provides types for loading and validating axis, calibration, and switch
//! configuration from TOML files (with `std` feature) or built in code.

mod axis;
mod calibration;
mod machine;
mod switches;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use axis::AxisConfig;
pub use calibration::CalibrationConfig;
pub use machine::MachineConfig;
pub use switches::SwitchConfig;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Millimeters, MillimetersPerMinute, Steps};
