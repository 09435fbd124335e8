//! Builder pattern for PinStepper.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::units::MillimetersPerMinute;
use crate::config::AxisConfig;
use crate::error::{ConfigError, Error, Result};

use super::clock::Monotonic;
use super::driver::PinStepper;

/// Default STEP pulse width (typically 1-10 microseconds is sufficient).
const DEFAULT_PULSE_WIDTH_US: u32 = 2;

/// Builder for creating PinStepper instances.
pub struct PinStepperBuilder<STEP, DIR, DELAY, CLOCK>
where
    STEP: OutputPin,
    DIR: OutputPin,
    DELAY: DelayNs,
    CLOCK: Monotonic,
{
    step_pin: Option<STEP>,
    dir_pin: Option<DIR>,
    delay: Option<DELAY>,
    clock: Option<CLOCK>,
    name: Option<heapless::String<32>>,
    steps_per_mm: f32,
    speed: MillimetersPerMinute,
    pulse_width_us: u32,
    inverted: bool,
}

impl<STEP, DIR, DELAY, CLOCK> Default for PinStepperBuilder<STEP, DIR, DELAY, CLOCK>
where
    STEP: OutputPin,
    DIR: OutputPin,
    DELAY: DelayNs,
    CLOCK: Monotonic,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<STEP, DIR, DELAY, CLOCK> PinStepperBuilder<STEP, DIR, DELAY, CLOCK>
where
    STEP: OutputPin,
    DIR: OutputPin,
    DELAY: DelayNs,
    CLOCK: Monotonic,
{
    /// Create a new builder.
    pub fn new() -> Self {
        let defaults = AxisConfig::default();
        Self {
            step_pin: None,
            dir_pin: None,
            delay: None,
            clock: None,
            name: None,
            steps_per_mm: defaults.steps_per_mm,
            speed: defaults.speed,
            pulse_width_us: DEFAULT_PULSE_WIDTH_US,
            inverted: false,
        }
    }

    /// Set the STEP pin.
    pub fn step_pin(mut self, pin: STEP) -> Self {
        self.step_pin = Some(pin);
        self
    }

    /// Set the DIR pin.
    pub fn dir_pin(mut self, pin: DIR) -> Self {
        self.dir_pin = Some(pin);
        self
    }

    /// Set the delay provider.
    pub fn delay(mut self, delay: DELAY) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Set the time source.
    pub fn clock(mut self, clock: CLOCK) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set the motor name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = heapless::String::try_from(name).ok();
        self
    }

    /// Set steps per millimetre.
    pub fn steps_per_mm(mut self, steps_per_mm: f32) -> Self {
        self.steps_per_mm = steps_per_mm;
        self
    }

    /// Set the initial feed rate.
    pub fn speed(mut self, speed: MillimetersPerMinute) -> Self {
        self.speed = speed;
        self
    }

    /// Set the STEP pulse width in microseconds.
    pub fn pulse_width_us(mut self, pulse_width_us: u32) -> Self {
        self.pulse_width_us = pulse_width_us;
        self
    }

    /// Set direction inversion.
    pub fn inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    /// Take steps/mm and feed rate from an axis configuration.
    pub fn from_axis_config(mut self, config: &AxisConfig) -> Self {
        self.steps_per_mm = config.steps_per_mm;
        self.speed = config.speed;
        self
    }

    /// Build the PinStepper.
    ///
    /// # Errors
    ///
    /// Returns an error if a pin, the delay, or the clock is missing.
    pub fn build(self) -> Result<PinStepper<STEP, DIR, DELAY, CLOCK>> {
        let step_pin = self
            .step_pin
            .ok_or(Error::Config(ConfigError::MissingField("step_pin")))?;
        let dir_pin = self
            .dir_pin
            .ok_or(Error::Config(ConfigError::MissingField("dir_pin")))?;
        let delay = self
            .delay
            .ok_or(Error::Config(ConfigError::MissingField("delay")))?;
        let clock = self
            .clock
            .ok_or(Error::Config(ConfigError::MissingField("clock")))?;

        let name = self.name.unwrap_or_else(|| {
            let mut name = heapless::String::new();
            let _ = name.push_str("motor");
            name
        });

        Ok(PinStepper::new(
            step_pin,
            dir_pin,
            delay,
            clock,
            name,
            self.steps_per_mm,
            self.speed,
            self.pulse_width_us,
            self.inverted,
        ))
    }
}
