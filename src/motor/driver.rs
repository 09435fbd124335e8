//! Stepper motor driver.
//!
//! Generic over embedded-hal 1.0 pin types and a [`Monotonic`] clock.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::units::MillimetersPerMinute;

use super::clock::Monotonic;
use super::stepper::{Rotation, Stepper};

/// STEP/DIR stepper driver with step-rate limiting.
///
/// Generic over:
/// - `STEP`: STEP pin type (must implement `OutputPin`)
/// - `DIR`: DIR pin type (must implement `OutputPin`)
/// - `DELAY`: Delay provider for the STEP pulse width (must implement `DelayNs`)
/// - `CLOCK`: Time source for the minimum step interval
pub struct PinStepper<STEP, DIR, DELAY, CLOCK>
where
    STEP: OutputPin,
    DIR: OutputPin,
    DELAY: DelayNs,
    CLOCK: Monotonic,
{
    /// STEP pin (pulse to move one step).
    step_pin: STEP,

    /// DIR pin (high = physical clockwise).
    dir_pin: DIR,

    /// Delay provider for the pulse width.
    delay: DELAY,

    /// Time source for rate limiting.
    clock: CLOCK,

    /// Motor name for logging/debugging.
    name: heapless::String<32>,

    /// Steps per millimetre, used to turn feed rates into intervals.
    steps_per_mm: f32,

    /// Current feed rate.
    speed: MillimetersPerMinute,

    /// Minimum microseconds between two pulses.
    min_interval_us: u64,

    /// Timestamp of the last accepted step.
    last_step_us: Option<u64>,

    /// STEP pulse width in microseconds.
    pulse_width_us: u32,

    /// Logical rotation for the next step.
    rotation: Rotation,

    /// Whether DIR pin logic is inverted.
    inverted: bool,

    /// Level last written to DIR (cached to avoid unnecessary pin writes).
    dir_level: Option<bool>,

    /// Signed step counter.
    position: i64,
}

impl<STEP, DIR, DELAY, CLOCK> PinStepper<STEP, DIR, DELAY, CLOCK>
where
    STEP: OutputPin,
    DIR: OutputPin,
    DELAY: DelayNs,
    CLOCK: Monotonic,
{
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        step_pin: STEP,
        dir_pin: DIR,
        delay: DELAY,
        clock: CLOCK,
        name: heapless::String<32>,
        steps_per_mm: f32,
        speed: MillimetersPerMinute,
        pulse_width_us: u32,
        inverted: bool,
    ) -> Self {
        Self {
            step_pin,
            dir_pin,
            delay,
            clock,
            name,
            steps_per_mm,
            speed,
            min_interval_us: speed.step_interval_us(steps_per_mm),
            last_step_us: None,
            pulse_width_us,
            rotation: Rotation::Clockwise,
            inverted,
            dir_level: None,
            position: 0,
        }
    }

    /// Get the motor name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Current feed rate.
    #[inline]
    pub fn speed(&self) -> MillimetersPerMinute {
        self.speed
    }

    /// Minimum interval between pulses at the current feed rate.
    #[inline]
    pub fn min_interval_us(&self) -> u64 {
        self.min_interval_us
    }

    /// Give the pins, delay, and clock back.
    pub fn release(self) -> (STEP, DIR, DELAY, CLOCK) {
        (self.step_pin, self.dir_pin, self.delay, self.clock)
    }

    fn write_direction(&mut self) -> core::result::Result<(), ()> {
        let level = (self.rotation == Rotation::Clockwise) != self.inverted;
        if self.dir_level == Some(level) {
            return Ok(());
        }

        // Forget the cached level until the write succeeds.
        self.dir_level = None;
        if level {
            self.dir_pin.set_high().map_err(|_| ())?;
        } else {
            self.dir_pin.set_low().map_err(|_| ())?;
        }

        self.dir_level = Some(level);
        Ok(())
    }

    fn pulse(&mut self) -> core::result::Result<(), ()> {
        self.step_pin.set_high().map_err(|_| ())?;
        self.delay.delay_us(self.pulse_width_us);
        self.step_pin.set_low().map_err(|_| ())
    }
}

impl<STEP, DIR, DELAY, CLOCK> Stepper for PinStepper<STEP, DIR, DELAY, CLOCK>
where
    STEP: OutputPin,
    DIR: OutputPin,
    DELAY: DelayNs,
    CLOCK: Monotonic,
{
    fn step(&mut self) -> bool {
        let now = self.clock.now_us();
        if let Some(last) = self.last_step_us {
            if now.saturating_sub(last) < self.min_interval_us {
                return false;
            }
        }

        if self.write_direction().is_err() {
            error!("{}: DIR pin write failed", self.name.as_str());
            return false;
        }

        if self.pulse().is_err() {
            error!("{}: STEP pin write failed", self.name.as_str());
            return false;
        }

        self.position += self.rotation.sign();
        self.last_step_us = Some(now);
        true
    }

    fn set_direction(&mut self, rotation: Rotation) {
        self.rotation = rotation;
        if self.write_direction().is_err() {
            error!("{}: DIR pin write failed", self.name.as_str());
        }
    }

    fn direction(&self) -> Rotation {
        self.rotation
    }

    fn set_speed(&mut self, speed: MillimetersPerMinute) {
        self.speed = speed;
        self.min_interval_us = speed.step_interval_us(self.steps_per_mm);
    }

    fn set_inverted(&mut self, inverted: bool) {
        if self.inverted == inverted {
            return;
        }
        self.inverted = inverted;
        if self.write_direction().is_err() {
            error!("{}: DIR pin write failed", self.name.as_str());
        }
    }

    fn is_inverted(&self) -> bool {
        self.inverted
    }

    fn position(&self) -> i64 {
        self.position
    }

    fn reset_position(&mut self) {
        self.position = 0;
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    use super::*;
    use crate::motor::PinStepperBuilder;

    struct ManualClock(Cell<u64>);

    impl Monotonic for ManualClock {
        fn now_us(&self) -> u64 {
            self.0.get()
        }
    }

    #[test]
    fn test_step_rate_limit() {
        let step_expectations = [
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ];
        let dir_expectations = [PinTransaction::set(PinState::High)];
        let mut step_pin = PinMock::new(&step_expectations);
        let mut dir_pin = PinMock::new(&dir_expectations);
        let clock = ManualClock(Cell::new(1_000));

        let mut motor = PinStepperBuilder::new()
            .step_pin(step_pin.clone())
            .dir_pin(dir_pin.clone())
            .delay(NoopDelay::new())
            .clock(&clock)
            .steps_per_mm(80.0)
            .speed(MillimetersPerMinute(1000))
            .build()
            .unwrap();

        assert_eq!(motor.min_interval_us(), 750);
        assert!(motor.step());

        // 749 us later is still too early
        clock.0.set(1_749);
        assert!(!motor.step());

        clock.0.set(1_750);
        assert!(motor.step());
        assert_eq!(motor.position(), 2);

        step_pin.done();
        dir_pin.done();
    }

    #[test]
    fn test_inverted_direction_level() {
        let step_expectations = [
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ];
        // Clockwise on an inverted motor drives DIR low, un-inverting drives it high.
        let dir_expectations = [
            PinTransaction::set(PinState::Low),
            PinTransaction::set(PinState::High),
        ];
        let mut step_pin = PinMock::new(&step_expectations);
        let mut dir_pin = PinMock::new(&dir_expectations);
        let clock = ManualClock(Cell::new(0));

        let mut motor = PinStepperBuilder::new()
            .step_pin(step_pin.clone())
            .dir_pin(dir_pin.clone())
            .delay(NoopDelay::new())
            .clock(&clock)
            .inverted(true)
            .speed(MillimetersPerMinute(0))
            .build()
            .unwrap();

        motor.set_direction(Rotation::Clockwise);
        // Same level again: cached, no pin write
        assert!(motor.step());
        motor.set_inverted(false);
        assert!(!motor.is_inverted());
        assert_eq!(motor.position(), 1);

        step_pin.done();
        dir_pin.done();
    }
}
