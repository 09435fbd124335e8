//! Calibration module for plotter-motion.
//!
//! Discovers which motor drives which axis, which way each motor turns, and
//! how long each axis is, using nothing but the four limit switches.
//!
//! # Example
//!
//! ```rust,ignore
//! use plotter_motion::calibration::{CalibrationContext, CalibrationEngine};
//!
//! let mut ctx = CalibrationContext::new(&mut motor_a, &mut motor_b, &switches);
//! let mut engine = CalibrationEngine::new(config.calibration.clone());
//! let data = engine.calibrate(&mut ctx)?;
//! let mut gantry = ctx.into_gantry(&config)?;
//! ```

mod context;
mod data;
mod engine;
mod probe;

pub use context::CalibrationContext;
pub use data::{AxisCalibration, CalibrationData, CalibrationStore, MemoryStore};
pub use engine::{CalibrationEngine, EngineState};
pub use probe::{resolve, Probe, Resolution};

/// Calibration pass, reported with a jam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Motor A seeking any switch to learn its axis.
    Discovery,
    /// Both motors seeking their negative switch to learn their polarity.
    Polarity,
    /// Both axes running toward the positive corner.
    PositiveCorner,
    /// X finishing toward its positive switch.
    PositiveX,
    /// Y finishing toward its positive switch.
    PositiveY,
    /// Both axes running toward the negative corner.
    NegativeCorner,
    /// X finishing toward its negative switch.
    NegativeX,
    /// Y finishing toward its negative switch.
    NegativeY,
}
