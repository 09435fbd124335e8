//! # plotter-motion
//!
//! Axis motion and self-discovering calibration for a two-axis stepper plotter.
//!
//! ## Features
//!
//! - **Self-discovering calibration**: Learns which motor drives which axis,
//!   each motor's polarity, and both travel lengths from four limit switches
//! - **Cooperative motion**: Each axis issues at most one step per tick and
//!   never blocks outside homing
//! - **Bounded travel**: Targets are clamped to `[0, max_travel]` and steps
//!   toward a closed switch are refused
//! - **embedded-hal 1.0**: `OutputPin` for STEP/DIR, `InputPin` for switches,
//!   `DelayNs` for pulse timing
//! - **no_std compatible**: Core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use plotter_motion::{CalibrationContext, CalibrationEngine, MemoryStore};
//!
//! let config = plotter_motion::load_config("plotter.toml")?;
//!
//! let mut ctx = CalibrationContext::new(&mut motor_a, &mut motor_b, &switches);
//! let mut engine = CalibrationEngine::new(config.calibration.clone());
//! engine.calibrate_or_restore(&mut ctx, &mut store)?;
//!
//! let mut gantry = ctx.into_gantry(&config)?;
//! gantry.home()?;
//! gantry.move_absolute(4_000, 2_500);
//! while gantry.moving() {
//!     gantry.tick();
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables TOML file loading, `StdClock`, and the bench simulator
//! - `log` (default): Emits events through the `log` facade
//! - `defmt`: Emits events through `defmt` for embedded targets

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

// This mod MUST go first, so that the others see its macros.
#[macro_use]
mod fmt;

// Core modules
pub mod axis;
pub mod calibration;
pub mod config;
pub mod error;
pub mod motor;
pub mod switches;

#[cfg(feature = "std")]
pub mod sim;

// Re-exports for ergonomic API
pub use axis::{Axis, AxisLabel, Gantry, MotorMapping, StepDirection, TargetStatus};
pub use calibration::{
    AxisCalibration, CalibrationContext, CalibrationData, CalibrationEngine, CalibrationStore,
    MemoryStore,
};
pub use config::{validate_config, AxisConfig, CalibrationConfig, MachineConfig, SwitchConfig};
pub use error::{Error, Result};
pub use motor::{MotorId, PinStepper, PinStepperBuilder, Rotation, Stepper};
pub use switches::{LimitMask, LimitSwitches, PinLimitSwitches};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Millimeters, MillimetersPerMinute, Steps};
