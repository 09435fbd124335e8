//! Bench simulation of the plotter mechanics (std only).
//!
//! A [`Bench`] holds two carriages with hard stops at `0` and `length`, a
//! switch at each end, and optional obstructions. [`SimStepper`]s drive a
//! carriage through configurable wiring; [`SimSwitches`] read the switches.
//! All handles share the same bench state.

use std::cell::RefCell;
use std::rc::Rc;

use crate::axis::AxisLabel;
use crate::config::units::MillimetersPerMinute;
use crate::motor::{Rotation, Stepper};
use crate::switches::{LimitMask, LimitSwitches};

#[derive(Debug, Clone)]
struct Carriage {
    position: i64,
    length: i64,
    wall: Option<i64>,
}

impl Carriage {
    fn nudge(&mut self, delta: i64) {
        let next = (self.position + delta).clamp(0, self.length);
        if let Some(wall) = self.wall {
            // The wall sits between `wall` and `wall + 1`.
            if (self.position <= wall && next > wall) || (self.position > wall && next <= wall) {
                return;
            }
        }
        self.position = next;
    }
}

#[derive(Debug)]
struct World {
    carriages: [Carriage; 2],
    samples: u64,
}

impl World {
    fn carriage(&mut self, axis: AxisLabel) -> &mut Carriage {
        match axis {
            AxisLabel::X => &mut self.carriages[0],
            AxisLabel::Y => &mut self.carriages[1],
        }
    }

    fn mask(&self) -> LimitMask {
        let mut mask = LimitMask::NONE;
        let [x, y] = &self.carriages;
        mask.set(LimitMask::X_NEG, x.position <= 0);
        mask.set(LimitMask::X_POS, x.position >= x.length);
        mask.set(LimitMask::Y_NEG, y.position <= 0);
        mask.set(LimitMask::Y_POS, y.position >= y.length);
        mask
    }
}

/// Shared plotter mechanics.
#[derive(Debug, Clone)]
pub struct Bench {
    world: Rc<RefCell<World>>,
}

impl Bench {
    /// Two carriages of the given travel, both parked mid-way.
    pub fn new(x_length: u32, y_length: u32) -> Self {
        let carriage = |length: u32| Carriage {
            position: i64::from(length / 2),
            length: i64::from(length),
            wall: None,
        };
        Self {
            world: Rc::new(RefCell::new(World {
                carriages: [carriage(x_length), carriage(y_length)],
                samples: 0,
            })),
        }
    }

    /// Put a carriage at `position`, clamped to its travel.
    pub fn place(&self, axis: AxisLabel, position: u32) {
        let mut world = self.world.borrow_mut();
        let carriage = world.carriage(axis);
        carriage.position = i64::from(position).min(carriage.length);
    }

    /// Put an obstruction right after `position`; the carriage cannot cross it.
    pub fn jam(&self, axis: AxisLabel, position: u32) {
        self.world.borrow_mut().carriage(axis).wall = Some(i64::from(position));
    }

    /// Physical position of a carriage.
    pub fn position(&self, axis: AxisLabel) -> i64 {
        self.world.borrow_mut().carriage(axis).position
    }

    /// How many times the switches have been read.
    pub fn samples(&self) -> u64 {
        self.world.borrow().samples
    }

    /// A stepper driving `axis`. With `reversed` wiring a clockwise step moves
    /// the carriage toward 0.
    pub fn stepper(&self, axis: AxisLabel, reversed: bool) -> SimStepper {
        SimStepper {
            world: Rc::clone(&self.world),
            axis,
            reversed,
            rotation: Rotation::Clockwise,
            inverted: false,
            speed: MillimetersPerMinute::default(),
            position: 0,
            attempts: 0,
            steps: 0,
            reject_every: 0,
        }
    }

    /// Switch bank reading this bench.
    pub fn switches(&self) -> SimSwitches {
        SimSwitches {
            world: Rc::clone(&self.world),
        }
    }
}

/// Simulated stepper. Steps always succeed unless a rejection pattern is set;
/// a carriage pushed against a stop or obstruction simply does not move.
#[derive(Debug)]
pub struct SimStepper {
    world: Rc<RefCell<World>>,
    axis: AxisLabel,
    reversed: bool,
    rotation: Rotation,
    inverted: bool,
    speed: MillimetersPerMinute,
    position: i64,
    attempts: u64,
    steps: u64,
    reject_every: u64,
}

impl SimStepper {
    /// Reject every `n`th step attempt, as a rate limit would.
    pub fn rejecting_every(mut self, n: u64) -> Self {
        self.reject_every = n;
        self
    }

    /// Carriage this stepper drives.
    pub fn axis(&self) -> AxisLabel {
        self.axis
    }

    /// Pulses issued so far.
    pub fn steps_issued(&self) -> u64 {
        self.steps
    }

    /// Last feed rate set.
    pub fn speed(&self) -> MillimetersPerMinute {
        self.speed
    }
}

impl Stepper for SimStepper {
    fn step(&mut self) -> bool {
        self.attempts += 1;
        if self.reject_every > 0 && self.attempts % self.reject_every == 0 {
            return false;
        }

        let mut delta = self.rotation.sign();
        if self.inverted != self.reversed {
            delta = -delta;
        }
        self.world.borrow_mut().carriage(self.axis).nudge(delta);

        self.position += self.rotation.sign();
        self.steps += 1;
        true
    }

    fn set_direction(&mut self, rotation: Rotation) {
        self.rotation = rotation;
    }

    fn direction(&self) -> Rotation {
        self.rotation
    }

    fn set_speed(&mut self, speed: MillimetersPerMinute) {
        self.speed = speed;
    }

    fn set_inverted(&mut self, inverted: bool) {
        self.inverted = inverted;
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

/// Simulated switch bank.
#[derive(Debug, Clone)]
pub struct SimSwitches {
    world: Rc<RefCell<World>>,
}

impl LimitSwitches for SimSwitches {
    fn sample(&self) -> LimitMask {
        let mut world = self.world.borrow_mut();
        world.samples += 1;
        world.mask()
    }
}
