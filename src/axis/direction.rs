//! Axis naming and the logical-to-physical direction table.

use core::fmt;

use crate::motor::Rotation;

/// Logical travel axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AxisLabel {
    /// Horizontal axis (bed width).
    X,
    /// Vertical axis (bed depth).
    Y,
}

impl AxisLabel {
    /// Single-letter name.
    #[inline]
    pub fn as_char(self) -> char {
        match self {
            AxisLabel::X => 'X',
            AxisLabel::Y => 'Y',
        }
    }

    /// The other axis.
    #[inline]
    pub fn other(self) -> Self {
        match self {
            AxisLabel::X => AxisLabel::Y,
            AxisLabel::Y => AxisLabel::X,
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            AxisLabel::X => 0,
            AxisLabel::Y => 1,
        }
    }
}

impl fmt::Display for AxisLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Logical direction of travel along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepDirection {
    /// Away from the origin.
    Positive,
    /// Toward the origin.
    Negative,
}

impl StepDirection {
    /// Direction needed to get from `from` to `to`. Equal positions count as negative.
    #[inline]
    pub fn between(from: u32, to: u32) -> Self {
        if to > from {
            StepDirection::Positive
        } else {
            StepDirection::Negative
        }
    }
}

/// Which physical rotation moves the carriage in the positive direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorMapping {
    /// Clockwise moves positive.
    #[default]
    CwPositive,
    /// Clockwise moves negative.
    CwNegative,
}

impl MotorMapping {
    /// Mapping for a motor whose positive sense was found to be reversed.
    #[inline]
    pub fn from_flipped(flipped: bool) -> Self {
        if flipped {
            MotorMapping::CwNegative
        } else {
            MotorMapping::CwPositive
        }
    }

    /// Rotation to command for a logical direction.
    #[inline]
    pub fn rotation(self, direction: StepDirection) -> Rotation {
        match (direction, self) {
            (StepDirection::Positive, MotorMapping::CwPositive) => Rotation::Clockwise,
            (StepDirection::Positive, MotorMapping::CwNegative) => Rotation::CounterClockwise,
            (StepDirection::Negative, MotorMapping::CwNegative) => Rotation::Clockwise,
            (StepDirection::Negative, MotorMapping::CwPositive) => Rotation::CounterClockwise,
        }
    }
}
