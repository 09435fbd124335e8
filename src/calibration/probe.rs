//! Short probing moves that read motor wiring off switch transitions.

use crate::motor::Stepper;
use crate::switches::{LimitMask, LimitSwitches};

/// What a single switch change says about the probed motor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Resolution {
    /// The switch that changed belongs to the axis the motor was tested against.
    pub axis_correct: bool,
    /// The motor's positive rotation moves its carriage positive.
    pub direction_correct: bool,
}

/// Outcome of [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Probe {
    /// No switch changed.
    Unresolved,
    /// Exactly one switch changed.
    Resolved(Resolution),
    /// Several switches changed at once.
    Ambiguous {
        /// Switches that opened.
        released: LimitMask,
        /// Switches that closed.
        triggered: LimitMask,
    },
}

/// Move `motor` by `steps` and compare the switches before and after.
///
/// A newly triggered switch means the carriage now sits on a limit, so the
/// move is undone. `axis_mask` selects the switches of the axis under test and
/// `direction_mask` the switches at the end the move was aimed at. Leaving a
/// switch proves the opposite of reaching it, so the direction verdict is
/// negated for a release.
pub fn resolve<S, L>(
    motor: &mut S,
    limits: &L,
    steps: i64,
    axis_mask: LimitMask,
    direction_mask: LimitMask,
) -> Probe
where
    S: Stepper + ?Sized,
    L: LimitSwitches + ?Sized,
{
    let before = limits.sample();
    motor.move_steps(steps);
    let after = limits.sample();

    let released = before.released_by(after);
    let triggered = before.triggered_by(after);

    if !triggered.is_empty() {
        motor.move_steps(-steps);
    }

    let changed = released | triggered;
    if changed.is_empty() {
        return Probe::Unresolved;
    }
    if changed.count() > 1 {
        return Probe::Ambiguous {
            released,
            triggered,
        };
    }

    let axis_correct = changed.intersects(axis_mask);
    let mut direction_correct = changed.intersects(direction_mask);
    if !released.is_empty() {
        direction_correct = !direction_correct;
    }

    Probe::Resolved(Resolution {
        axis_correct,
        direction_correct,
    })
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use core::cell::Cell;

    use super::*;
    use crate::axis::AxisLabel;
    use crate::sim::Bench;

    /// Replays a fixed sequence of samples.
    struct Script<'a> {
        samples: &'a [LimitMask],
        next: Cell<usize>,
    }

    impl<'a> Script<'a> {
        fn new(samples: &'a [LimitMask]) -> Self {
            Self {
                samples,
                next: Cell::new(0),
            }
        }
    }

    impl LimitSwitches for Script<'_> {
        fn sample(&self) -> LimitMask {
            let i = self.next.get();
            self.next.set(i + 1);
            self.samples[i.min(self.samples.len() - 1)]
        }
    }

    #[test]
    fn test_release_inverts_direction() {
        let bench = Bench::new(1000, 1000);
        let mut motor = bench.stepper(AxisLabel::X, false);
        let script = Script::new(&[LimitMask::X_NEG, LimitMask::NONE]);

        let probe = resolve(&mut motor, &script, 200, LimitMask::X, LimitMask::POSITIVE);

        assert_eq!(
            probe,
            Probe::Resolved(Resolution {
                axis_correct: true,
                direction_correct: true,
            })
        );
        // Release: no undo
        assert_eq!(motor.position(), 200);
    }

    #[test]
    fn test_trigger_is_undone() {
        let bench = Bench::new(1000, 1000);
        let mut motor = bench.stepper(AxisLabel::Y, false);
        let script = Script::new(&[LimitMask::NONE, LimitMask::Y_POS]);

        let probe = resolve(&mut motor, &script, 200, LimitMask::X, LimitMask::POSITIVE);

        assert_eq!(
            probe,
            Probe::Resolved(Resolution {
                axis_correct: false,
                direction_correct: true,
            })
        );
        assert_eq!(motor.position(), 0);
        assert_eq!(motor.steps_issued(), 400);
    }

    #[test]
    fn test_trigger_on_wrong_end() {
        let bench = Bench::new(1000, 1000);
        let mut motor = bench.stepper(AxisLabel::X, false);
        let script = Script::new(&[LimitMask::NONE, LimitMask::X_NEG]);

        let probe = resolve(&mut motor, &script, 200, LimitMask::X, LimitMask::POSITIVE);

        assert_eq!(
            probe,
            Probe::Resolved(Resolution {
                axis_correct: true,
                direction_correct: false,
            })
        );
    }

    #[test]
    fn test_no_change() {
        let bench = Bench::new(1000, 1000);
        let mut motor = bench.stepper(AxisLabel::X, false);
        let script = Script::new(&[LimitMask::X_POS, LimitMask::X_POS]);

        let probe = resolve(&mut motor, &script, -200, LimitMask::X, LimitMask::NEGATIVE);

        assert_eq!(probe, Probe::Unresolved);
        assert_eq!(motor.position(), -200);
    }

    #[test]
    fn test_two_changes_are_ambiguous() {
        let bench = Bench::new(1000, 1000);
        let mut motor = bench.stepper(AxisLabel::X, false);
        let script = Script::new(&[LimitMask::X_NEG, LimitMask::Y_NEG]);

        let probe = resolve(&mut motor, &script, 200, LimitMask::X, LimitMask::POSITIVE);

        assert_eq!(
            probe,
            Probe::Ambiguous {
                released: LimitMask::X_NEG,
                triggered: LimitMask::Y_NEG,
            }
        );
        assert_eq!(motor.position(), 0);
    }
}
