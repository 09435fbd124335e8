//! Stepper capability consumed by axes and the calibration engine.

use core::fmt;

use crate::config::units::MillimetersPerMinute;

/// Rotation sense commanded to a stepper.
///
/// `Clockwise` is the motor's forward sense and counts as a positive step.
/// An inverted stepper turns the other way physically but still counts it
/// as positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    /// Forward, positive step count.
    Clockwise,
    /// Backward, negative step count.
    CounterClockwise,
}

impl Rotation {
    /// Get rotation from signed step count.
    #[inline]
    pub fn from_steps(steps: i64) -> Self {
        if steps >= 0 {
            Rotation::Clockwise
        } else {
            Rotation::CounterClockwise
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i64 {
        match self {
            Rotation::Clockwise => 1,
            Rotation::CounterClockwise => -1,
        }
    }

    /// The opposite rotation.
    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Rotation::Clockwise => Rotation::CounterClockwise,
            Rotation::CounterClockwise => Rotation::Clockwise,
        }
    }
}

/// Identity of a physical stepper channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorId {
    /// First driver channel.
    A,
    /// Second driver channel.
    B,
}

impl MotorId {
    /// The other channel.
    #[inline]
    pub fn other(self) -> Self {
        match self {
            MotorId::A => MotorId::B,
            MotorId::B => MotorId::A,
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        match self {
            MotorId::A => 0,
            MotorId::B => 1,
        }
    }
}

impl fmt::Display for MotorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorId::A => write!(f, "A"),
            MotorId::B => write!(f, "B"),
        }
    }
}

/// A single stepper motor.
///
/// Implementations own pulse timing: [`Stepper::step`] returns `false` when
/// called before the minimum step interval for the current speed has elapsed.
pub trait Stepper {
    /// Attempt one step in the current rotation. Returns whether a pulse was issued.
    fn step(&mut self) -> bool;

    /// Set the rotation used by subsequent steps.
    fn set_direction(&mut self, rotation: Rotation);

    /// Rotation used by subsequent steps.
    fn direction(&self) -> Rotation;

    /// Set the feed rate. Zero removes the rate limit.
    fn set_speed(&mut self, speed: MillimetersPerMinute);

    /// Swap the physical meaning of the two rotations.
    fn set_inverted(&mut self, inverted: bool);

    /// Whether the physical rotation is swapped.
    fn is_inverted(&self) -> bool;

    /// Signed steps taken since the last reset.
    fn position(&self) -> i64;

    /// Set the step counter back to zero.
    fn reset_position(&mut self);

    /// Move `steps` steps, blocking until every one has been issued.
    ///
    /// The sign selects the rotation. Rejected attempts are retried, so this
    /// spins for as long as the rate limit demands.
    fn move_steps(&mut self, steps: i64) {
        if steps == 0 {
            return;
        }

        self.set_direction(Rotation::from_steps(steps));

        let mut remaining = steps.unsigned_abs();
        while remaining > 0 {
            if self.step() {
                remaining -= 1;
            }
        }
    }
}
