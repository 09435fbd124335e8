//! Limit switch bitmask.

use core::ops::{BitAnd, BitOr, Not};

use crate::axis::{AxisLabel, StepDirection};

/// Snapshot of the four limit switches, one bit per (axis, polarity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LimitMask(u8);

impl LimitMask {
    /// No switch active.
    pub const NONE: Self = Self(0);
    /// X positive-end switch.
    pub const X_POS: Self = Self(1 << 0);
    /// X negative-end switch.
    pub const X_NEG: Self = Self(1 << 1);
    /// Y positive-end switch.
    pub const Y_POS: Self = Self(1 << 2);
    /// Y negative-end switch.
    pub const Y_NEG: Self = Self(1 << 3);

    /// Both X switches.
    pub const X: Self = Self(Self::X_POS.0 | Self::X_NEG.0);
    /// Both Y switches.
    pub const Y: Self = Self(Self::Y_POS.0 | Self::Y_NEG.0);
    /// Both positive-end switches.
    pub const POSITIVE: Self = Self(Self::X_POS.0 | Self::Y_POS.0);
    /// Both negative-end switches.
    pub const NEGATIVE: Self = Self(Self::X_NEG.0 | Self::Y_NEG.0);
    /// Every switch.
    pub const ALL: Self = Self(Self::X.0 | Self::Y.0);

    /// Build from raw bits, dropping unknown ones.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    /// Raw bits.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// The switch at one end of an axis.
    #[inline]
    pub const fn switch(axis: AxisLabel, direction: StepDirection) -> Self {
        match (axis, direction) {
            (AxisLabel::X, StepDirection::Positive) => Self::X_POS,
            (AxisLabel::X, StepDirection::Negative) => Self::X_NEG,
            (AxisLabel::Y, StepDirection::Positive) => Self::Y_POS,
            (AxisLabel::Y, StepDirection::Negative) => Self::Y_NEG,
        }
    }

    /// Both switches of an axis.
    #[inline]
    pub const fn axis(axis: AxisLabel) -> Self {
        match axis {
            AxisLabel::X => Self::X,
            AxisLabel::Y => Self::Y,
        }
    }

    /// Both switches at one polarity.
    #[inline]
    pub const fn polarity(direction: StepDirection) -> Self {
        match direction {
            StepDirection::Positive => Self::POSITIVE,
            StepDirection::Negative => Self::NEGATIVE,
        }
    }

    /// No bit set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// At least one bit shared with `other`.
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Every bit of `other` is set.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Number of active switches.
    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Switches active in `self` but not in `after`.
    #[inline]
    pub const fn released_by(self, after: Self) -> Self {
        Self(self.0 & !after.0)
    }

    /// Switches active in `after` but not in `self`.
    #[inline]
    pub const fn triggered_by(self, after: Self) -> Self {
        Self(after.0 & !self.0)
    }

    /// Set or clear the switches in `other`.
    #[inline]
    pub fn set(&mut self, other: Self, active: bool) {
        if active {
            self.0 |= other.0;
        } else {
            self.0 &= !other.0;
        }
    }
}

impl BitOr for LimitMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitAnd for LimitMask {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl Not for LimitMask {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self(!self.0 & Self::ALL.0)
    }
}
