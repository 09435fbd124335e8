//! Single-axis motion state machine.

use crate::config::units::{Millimeters, MillimetersPerMinute};
use crate::config::AxisConfig;
use crate::error::{MotorError, Result};
use crate::motor::Stepper;
use crate::switches::LimitSwitches;

use super::direction::{AxisLabel, MotorMapping, StepDirection};

/// How a move request was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TargetStatus {
    /// The target was in range and became the desired position.
    Accepted,
    /// The target was already the desired position.
    Unchanged,
    /// The target was out of range; the nearest bound was used instead.
    Clamped {
        /// Position that was asked for, in steps.
        requested: i64,
        /// Position that was applied, in steps.
        applied: u32,
    },
}

/// One travel axis driving one stepper.
///
/// The axis is idle when `current_position == desired_position` and moving
/// otherwise. [`Axis::run`] is called once per scheduler tick and issues at
/// most one step. Both positions stay within `[0, max_travel]`.
pub struct Axis<'a, S, L>
where
    S: Stepper,
    L: LimitSwitches,
{
    label: AxisLabel,
    motor: &'a mut S,
    limits: &'a L,
    config: AxisConfig,
    direction: StepDirection,
    motor_mapping: MotorMapping,
    current_position: u32,
    desired_position: u32,
}

impl<'a, S, L> Axis<'a, S, L>
where
    S: Stepper,
    L: LimitSwitches,
{
    /// Wrap a resolved stepper. Positions start at zero.
    pub fn new(label: AxisLabel, motor: &'a mut S, limits: &'a L, config: AxisConfig) -> Self {
        let motor_mapping = MotorMapping::default();
        let direction = StepDirection::Positive;

        motor.set_speed(config.speed);
        motor.set_direction(motor_mapping.rotation(direction));

        info!("Axis created for: {}", label.as_char());

        Self {
            label,
            motor,
            limits,
            config,
            direction,
            motor_mapping,
            current_position: 0,
            desired_position: 0,
        }
    }

    /// Axis name.
    #[inline]
    pub fn label(&self) -> AxisLabel {
        self.label
    }

    /// Axis configuration.
    #[inline]
    pub fn config(&self) -> &AxisConfig {
        &self.config
    }

    /// Position in steps.
    #[inline]
    pub fn current_position(&self) -> u32 {
        self.current_position
    }

    /// Target in steps.
    #[inline]
    pub fn desired_position(&self) -> u32 {
        self.desired_position
    }

    /// Position in millimetres.
    #[inline]
    pub fn current_position_mm(&self) -> Millimeters {
        self.config.to_millimeters(self.current_position)
    }

    /// Target in millimetres.
    #[inline]
    pub fn desired_position_mm(&self) -> Millimeters {
        self.config.to_millimeters(self.desired_position)
    }

    /// Logical direction currently configured on the motor.
    #[inline]
    pub fn direction(&self) -> StepDirection {
        self.direction
    }

    /// Rotation sense that moves this axis positive.
    #[inline]
    pub fn motor_mapping(&self) -> MotorMapping {
        self.motor_mapping
    }

    /// Whether the axis still has distance to cover.
    #[inline]
    pub fn moving(&self) -> bool {
        self.current_position != self.desired_position
    }

    /// Change which rotation counts as positive and re-command the motor.
    pub fn set_motor_mapping(&mut self, mapping: MotorMapping) {
        if mapping == self.motor_mapping {
            return;
        }
        self.motor_mapping = mapping;
        self.motor.set_direction(mapping.rotation(self.direction));
    }

    /// Set the feed rate of the motor.
    pub fn set_speed(&mut self, speed: MillimetersPerMinute) {
        self.motor.set_speed(speed);
    }

    /// Move to an absolute position in steps.
    ///
    /// Targets outside `[0, max_travel]` are logged as errors and clamped. A
    /// target equal to the current position leaves the axis untouched.
    pub fn move_absolute(&mut self, target: i64) -> TargetStatus {
        let max_travel = self.config.max_travel;

        let (position, status) = if target < 0 {
            error!(
                "{} axis: target {} is below 0, clamping to 0",
                self.label.as_char(),
                target
            );
            (
                0,
                TargetStatus::Clamped {
                    requested: target,
                    applied: 0,
                },
            )
        } else if target > i64::from(max_travel) {
            error!(
                "{} axis: target {} exceeds max travel {}, clamping",
                self.label.as_char(),
                target,
                max_travel
            );
            (
                max_travel,
                TargetStatus::Clamped {
                    requested: target,
                    applied: max_travel,
                },
            )
        } else {
            (target as u32, TargetStatus::Accepted)
        };

        if !self.retarget(position) && status == TargetStatus::Accepted {
            return TargetStatus::Unchanged;
        }
        status
    }

    /// Move relative to the current target, in steps.
    ///
    /// A result below zero is logged as an error and clamped to 0.
    pub fn move_incremental(&mut self, delta: i64) -> TargetStatus {
        let requested = i64::from(self.desired_position).saturating_add(delta);

        if requested < 0 {
            error!(
                "{} axis: incremental move of {} would reach {}, clamping to 0",
                self.label.as_char(),
                delta,
                requested
            );
            self.retarget(0);
            return TargetStatus::Clamped {
                requested,
                applied: 0,
            };
        }

        self.move_absolute(requested)
    }

    /// Move to an absolute position in millimetres.
    pub fn move_absolute_mm(&mut self, target: Millimeters) -> TargetStatus {
        let steps = self.config.to_steps(target);
        debug!(
            "{} axis: move_to({}) -> move_to({})",
            self.label.as_char(),
            target.value(),
            steps.value()
        );
        self.move_absolute(steps.value())
    }

    /// Move relative to the current target, in millimetres.
    pub fn move_incremental_mm(&mut self, delta: Millimeters) -> TargetStatus {
        let steps = self.config.to_steps(delta);
        self.move_incremental(steps.value())
    }

    /// Attempt one step toward the target.
    ///
    /// Returns `true` only if the motor actually stepped. Stepping toward an
    /// active limit switch holds the axis instead.
    pub fn run(&mut self) -> bool {
        if !self.moving() {
            return false;
        }

        let toward = StepDirection::between(self.current_position, self.desired_position);
        debug_assert_eq!(toward, self.direction);

        if self.limits.limit(self.label, toward) {
            warn!(
                "{} tried to step in a limited direction, holding.",
                self.label.as_char()
            );
            self.hold();
            return false;
        }

        if !self.motor.step() {
            return false;
        }

        self.advance(toward);

        if !self.moving() {
            info!(
                "Axis {} reached goal position: {}",
                self.label.as_char(),
                self.desired_position
            );
        }
        true
    }

    /// Drive positive until the positive switch closes, then hold.
    ///
    /// Blocking; only for homing and calibration.
    pub fn move_to_positive(&mut self) -> Result<u32> {
        self.seek(StepDirection::Positive)
    }

    /// Drive negative until the negative switch closes, then hold.
    ///
    /// Blocking; only for homing and calibration.
    pub fn move_to_negative(&mut self) -> Result<u32> {
        self.seek(StepDirection::Negative)
    }

    /// Seek the negative switch and make that position the origin.
    pub fn home(&mut self) -> Result<()> {
        self.move_to_negative()?;
        self.zero();
        Ok(())
    }

    /// Make the current position the origin.
    pub fn zero(&mut self) {
        self.current_position = 0;
        self.desired_position = 0;
    }

    /// Stop where the axis is.
    pub fn hold(&mut self) {
        self.desired_position = self.current_position;
    }

    fn retarget(&mut self, position: u32) -> bool {
        if position == self.desired_position || position == self.current_position {
            return false;
        }

        self.desired_position = position;
        debug!(
            "{} axis: setting new desired position to {}",
            self.label.as_char(),
            position
        );

        if self.moving() {
            self.set_direction(StepDirection::between(
                self.current_position,
                self.desired_position,
            ));
        }
        true
    }

    fn set_direction(&mut self, direction: StepDirection) {
        if direction == self.direction {
            return;
        }

        self.direction = direction;
        self.motor.set_direction(self.motor_mapping.rotation(direction));

        debug!(
            "{} axis: setting direction to {}",
            self.label.as_char(),
            match direction {
                StepDirection::Positive => "positive",
                StepDirection::Negative => "negative",
            }
        );
    }

    fn advance(&mut self, direction: StepDirection) {
        self.current_position = match direction {
            StepDirection::Positive => self
                .current_position
                .saturating_add(1)
                .min(self.config.max_travel),
            StepDirection::Negative => self.current_position.saturating_sub(1),
        };
    }

    fn seek(&mut self, direction: StepDirection) -> Result<u32> {
        self.set_direction(direction);
        // Re-command in case the motor was moved by someone else since.
        self.motor
            .set_direction(self.motor_mapping.rotation(direction));

        let budget = self.config.homing_budget();
        let mut steps = 0u32;

        while !self.limits.limit(self.label, direction) {
            if steps >= budget {
                self.hold();
                error!(
                    "{} axis: no limit switch after {} steps",
                    self.label.as_char(),
                    steps
                );
                return Err(MotorError::LimitNotReached {
                    axis: self.label,
                    steps,
                }
                .into());
            }

            if self.motor.step() {
                steps += 1;
                self.advance(direction);
            }
        }

        self.hold();
        info!(
            "{} axis: limit reached after {} steps",
            self.label.as_char(),
            steps
        );
        Ok(steps)
    }
}
