//! Property tests for the axis state machine.

use proptest::prelude::*;

use plotter_motion::axis::{Axis, AxisLabel, MotorMapping, StepDirection};
use plotter_motion::config::AxisConfig;
use plotter_motion::motor::Stepper;
use plotter_motion::sim::Bench;

const MAX_TRAVEL: u32 = 16_000;

proptest! {
    /// Positions never leave `[0, max_travel]`, whatever the requests.
    #[test]
    fn positions_stay_in_bounds(
        moves in prop::collection::vec((-40_000i64..40_000, any::<bool>(), 0usize..400), 1..8),
    ) {
        let bench = Bench::new(MAX_TRAVEL, MAX_TRAVEL);
        bench.place(AxisLabel::X, 0);
        let mut motor = bench.stepper(AxisLabel::X, false);
        let switches = bench.switches();
        let mut axis = Axis::new(
            AxisLabel::X,
            &mut motor,
            &switches,
            AxisConfig::with_max_travel(MAX_TRAVEL),
        );

        for (request, incremental, ticks) in moves {
            if incremental {
                axis.move_incremental(request);
            } else {
                axis.move_absolute(request);
            }
            prop_assert!(axis.desired_position() <= MAX_TRAVEL);

            for _ in 0..ticks {
                axis.run();
                prop_assert!(axis.current_position() <= MAX_TRAVEL);
            }
        }
    }

    /// After a target change the direction points at the target and the motor
    /// rotation matches the mapping table.
    #[test]
    fn direction_follows_target(
        start in 0u32..2_000,
        target in 0i64..2_000,
        flipped in any::<bool>(),
    ) {
        let bench = Bench::new(MAX_TRAVEL, MAX_TRAVEL);
        bench.place(AxisLabel::Y, 0);
        let mut motor = bench.stepper(AxisLabel::Y, flipped);
        let switches = bench.switches();
        let mapping = MotorMapping::from_flipped(flipped);

        let mut axis = Axis::new(
            AxisLabel::Y,
            &mut motor,
            &switches,
            AxisConfig::with_max_travel(MAX_TRAVEL),
        );
        axis.set_motor_mapping(mapping);
        axis.move_absolute(i64::from(start));
        while axis.run() {}
        prop_assert_eq!(axis.current_position(), start);

        axis.move_absolute(target);
        let direction = axis.direction();
        if target != i64::from(start) {
            prop_assert_eq!(
                direction,
                StepDirection::between(start, target as u32)
            );
        }
        drop(axis);
        prop_assert_eq!(motor.direction(), mapping.rotation(direction));
    }

    /// Each tick moves by at most one step, and only when a step was issued.
    #[test]
    fn run_moves_one_step_at_most(
        target in 1i64..3_000,
        reject_every in 2u64..6,
        ticks in 1usize..4_000,
    ) {
        let bench = Bench::new(MAX_TRAVEL, MAX_TRAVEL);
        bench.place(AxisLabel::X, 0);
        let mut motor = bench.stepper(AxisLabel::X, false).rejecting_every(reject_every);
        let switches = bench.switches();
        let mut axis = Axis::new(
            AxisLabel::X,
            &mut motor,
            &switches,
            AxisConfig::with_max_travel(MAX_TRAVEL),
        );

        axis.move_absolute(target);
        for _ in 0..ticks {
            let before = axis.current_position();
            let stepped = axis.run();
            let after = axis.current_position();

            if stepped {
                prop_assert_eq!(after, before + 1);
            } else {
                prop_assert_eq!(after, before);
            }
        }
    }
}
