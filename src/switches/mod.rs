//! Limit switch capability.
//!
//! All queries are answered from a fresh [`LimitSwitches::sample`]; nothing is
//! cached between calls.

mod mask;
mod pins;

pub use mask::LimitMask;
pub use pins::PinLimitSwitches;

use crate::axis::{AxisLabel, StepDirection};

/// A bank of four limit switches, two per axis.
pub trait LimitSwitches {
    /// Read the current state of every switch.
    fn sample(&self) -> LimitMask;

    /// Any switch is active.
    fn any_limit(&self) -> bool {
        !self.sample().is_empty()
    }

    /// Either X switch is active.
    fn x_limit(&self) -> bool {
        self.sample().intersects(LimitMask::X)
    }

    /// Either Y switch is active.
    fn y_limit(&self) -> bool {
        self.sample().intersects(LimitMask::Y)
    }

    /// X positive-end switch is active.
    fn x_pos_limit(&self) -> bool {
        self.sample().contains(LimitMask::X_POS)
    }

    /// X negative-end switch is active.
    fn x_neg_limit(&self) -> bool {
        self.sample().contains(LimitMask::X_NEG)
    }

    /// Y positive-end switch is active.
    fn y_pos_limit(&self) -> bool {
        self.sample().contains(LimitMask::Y_POS)
    }

    /// Y negative-end switch is active.
    fn y_neg_limit(&self) -> bool {
        self.sample().contains(LimitMask::Y_NEG)
    }

    /// The carriage touches the positive corner: either positive-end switch is active.
    fn pos_limit(&self) -> bool {
        self.sample().intersects(LimitMask::POSITIVE)
    }

    /// The carriage touches the negative corner: either negative-end switch is active.
    fn neg_limit(&self) -> bool {
        self.sample().intersects(LimitMask::NEGATIVE)
    }

    /// Either switch of `axis` is active.
    fn axis_limit(&self, axis: AxisLabel) -> bool {
        self.sample().intersects(LimitMask::axis(axis))
    }

    /// The switch at the `direction` end of `axis` is active.
    fn limit(&self, axis: AxisLabel, direction: StepDirection) -> bool {
        self.sample().contains(LimitMask::switch(axis, direction))
    }
}

impl<T: LimitSwitches + ?Sized> LimitSwitches for &T {
    fn sample(&self) -> LimitMask {
        (**self).sample()
    }
}
