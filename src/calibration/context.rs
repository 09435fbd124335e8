//! Ownership of the two steppers while their axes are still unknown.

use crate::axis::{Axis, AxisLabel, Gantry};
use crate::config::{AxisConfig, MachineConfig};
use crate::error::{CalibrationError, Result};
use crate::motor::{MotorId, Stepper};
use crate::switches::LimitSwitches;

use super::data::CalibrationData;

/// Both steppers plus the switch bank, with a reassignable X/Y slot table.
///
/// Calibration drives motors through this context. Once the slots are known
/// the context is consumed to build the axes, so nothing can swap motors
/// behind a running [`Axis`]. A jam during calibration marks the context
/// halted and it will no longer hand out axes.
pub struct CalibrationContext<'a, S, L>
where
    S: Stepper,
    L: LimitSwitches,
{
    a: &'a mut S,
    b: &'a mut S,
    limits: &'a L,
    x: MotorId,
    halted: bool,
}

impl<'a, S, L> CalibrationContext<'a, S, L>
where
    S: Stepper,
    L: LimitSwitches,
{
    /// Start with motor A tentatively driving X.
    pub fn new(a: &'a mut S, b: &'a mut S, limits: &'a L) -> Self {
        Self {
            a,
            b,
            limits,
            x: MotorId::A,
            halted: false,
        }
    }

    /// Whether a jam stopped all motion on these motors.
    #[inline]
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub(crate) fn halt(&mut self) {
        self.halted = true;
    }

    /// The switch bank.
    #[inline]
    pub fn limits(&self) -> &'a L {
        self.limits
    }

    /// Motor currently assigned to `axis`.
    #[inline]
    pub fn motor_for(&self, axis: AxisLabel) -> MotorId {
        match axis {
            AxisLabel::X => self.x,
            AxisLabel::Y => self.x.other(),
        }
    }

    /// Axis currently assigned to `motor`.
    #[inline]
    pub fn axis_of(&self, motor: MotorId) -> AxisLabel {
        if motor == self.x {
            AxisLabel::X
        } else {
            AxisLabel::Y
        }
    }

    /// A motor by channel.
    pub fn motor(&mut self, id: MotorId) -> &mut S {
        match id {
            MotorId::A => &mut *self.a,
            MotorId::B => &mut *self.b,
        }
    }

    /// The motor in an axis slot.
    pub fn axis_motor(&mut self, axis: AxisLabel) -> &mut S {
        let id = self.motor_for(axis);
        self.motor(id)
    }

    /// Put `x` in the X slot and the other motor in the Y slot.
    pub fn assign(&mut self, x: MotorId) {
        self.x = x;
    }

    /// Exchange the X and Y slots.
    pub fn swap(&mut self) {
        self.x = self.x.other();
    }

    /// Apply a stored record: slots and inversion flags.
    pub fn apply(&mut self, data: &CalibrationData) {
        self.assign(data.x_axis.motor);
        for axis in [data.x_axis, data.y_axis] {
            let motor = self.motor(axis.motor);
            motor.set_inverted(axis.flipped);
            motor.reset_position();
        }
    }

    /// Build the two axes from the current slots. Positions start at zero.
    ///
    /// Fails with [`CalibrationError::Halted`] after a jam.
    pub fn into_axes(
        self,
        x_config: AxisConfig,
        y_config: AxisConfig,
    ) -> Result<(Axis<'a, S, L>, Axis<'a, S, L>)> {
        if self.halted {
            error!("Motion is halted, refusing to build axes");
            return Err(CalibrationError::Halted.into());
        }

        let (x_motor, y_motor) = match self.x {
            MotorId::A => (self.a, self.b),
            MotorId::B => (self.b, self.a),
        };
        Ok((
            Axis::new(AxisLabel::X, x_motor, self.limits, x_config),
            Axis::new(AxisLabel::Y, y_motor, self.limits, y_config),
        ))
    }

    /// Build the gantry using the machine's axis settings.
    pub fn into_gantry(self, config: &MachineConfig) -> Result<Gantry<'a, S, L>> {
        let (x, y) = self.into_axes(config.x.clone(), config.y.clone())?;
        Ok(Gantry::new(x, y))
    }
}
