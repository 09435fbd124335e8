//! The pair of resolved axes driven together by the scheduler loop.

use crate::error::Result;
use crate::motor::Stepper;
use crate::switches::LimitSwitches;

use super::direction::AxisLabel;
use super::motion::{Axis, TargetStatus};

/// Outcome of one scheduler tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tick {
    /// X issued a step.
    pub x: bool,
    /// Y issued a step.
    pub y: bool,
}

/// X and Y axes of the plotter.
///
/// Each [`Gantry::tick`] gives every axis one step attempt. Moves are not
/// interpolated: both axes run at their own pace toward their own target.
pub struct Gantry<'a, S, L>
where
    S: Stepper,
    L: LimitSwitches,
{
    x: Axis<'a, S, L>,
    y: Axis<'a, S, L>,
}

impl<'a, S, L> Gantry<'a, S, L>
where
    S: Stepper,
    L: LimitSwitches,
{
    /// Pair two axes.
    pub fn new(x: Axis<'a, S, L>, y: Axis<'a, S, L>) -> Self {
        debug_assert_eq!(x.label(), AxisLabel::X);
        debug_assert_eq!(y.label(), AxisLabel::Y);
        Self { x, y }
    }

    /// Split back into the two axes.
    pub fn into_axes(self) -> (Axis<'a, S, L>, Axis<'a, S, L>) {
        (self.x, self.y)
    }

    /// X axis.
    pub fn x(&self) -> &Axis<'a, S, L> {
        &self.x
    }

    /// Y axis.
    pub fn y(&self) -> &Axis<'a, S, L> {
        &self.y
    }

    /// Mutable access to one axis.
    pub fn axis_mut(&mut self, label: AxisLabel) -> &mut Axis<'a, S, L> {
        match label {
            AxisLabel::X => &mut self.x,
            AxisLabel::Y => &mut self.y,
        }
    }

    /// Set both targets, in steps.
    pub fn move_absolute(&mut self, x: i64, y: i64) -> (TargetStatus, TargetStatus) {
        (self.x.move_absolute(x), self.y.move_absolute(y))
    }

    /// One step attempt per axis, X first.
    pub fn tick(&mut self) -> Tick {
        Tick {
            x: self.x.run(),
            y: self.y.run(),
        }
    }

    /// Either axis still has distance to cover.
    pub fn moving(&self) -> bool {
        self.x.moving() || self.y.moving()
    }

    /// Tick until both axes are idle. Blocking; only for homing and calibration.
    pub fn wait_for_move(&mut self) {
        while self.moving() {
            self.tick();
        }
    }

    /// Stop both axes where they are.
    pub fn hold(&mut self) {
        self.x.hold();
        self.y.hold();
    }

    /// Home X then Y against their negative switches.
    pub fn home(&mut self) -> Result<()> {
        self.x.home()?;
        self.y.home()
    }
}
