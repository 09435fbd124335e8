//! Motor module for plotter-motion.
//!
//! Defines the [`Stepper`] capability and an embedded-hal implementation of it.

mod builder;
mod clock;
mod driver;
mod stepper;

pub use builder::PinStepperBuilder;
#[cfg(feature = "std")]
pub use clock::StdClock;
pub use clock::Monotonic;
pub use driver::PinStepper;
pub use stepper::{MotorId, Rotation, Stepper};
