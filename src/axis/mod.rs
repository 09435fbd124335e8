//! Axis module for plotter-motion.
//!
//! Provides the per-axis motion state machine and the two-axis gantry built
//! on top of it.

mod direction;
mod gantry;
mod motion;

pub use direction::{AxisLabel, MotorMapping, StepDirection};
pub use gantry::{Gantry, Tick};
pub use motion::{Axis, TargetStatus};
