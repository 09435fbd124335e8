//! Discovery and measurement passes.

use crate::axis::{AxisLabel, StepDirection};
use crate::config::units::MillimetersPerMinute;
use crate::config::CalibrationConfig;
use crate::error::{CalibrationError, Error, Result};
use crate::motor::{MotorId, Rotation, Stepper};
use crate::switches::{LimitMask, LimitSwitches};

use super::context::CalibrationContext;
use super::data::{AxisCalibration, CalibrationData, CalibrationStore};
use super::probe::{resolve, Probe, Resolution};
use super::Phase;

/// Lifecycle of a [`CalibrationEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EngineState {
    /// No usable calibration yet.
    Ready,
    /// Motors are assigned and the axes measured.
    Calibrated(CalibrationData),
    /// A seek jammed. Every further request is refused until the engine is
    /// rebuilt.
    Halted,
}

/// Runs calibration against a [`CalibrationContext`].
///
/// The protocol, in order:
///
/// 1. If switches are already closed, probe each motor a few steps each way
///    and read its axis and polarity from the switch that changes.
/// 2. If that told us nothing, drive the X slot negative until any switch
///    closes, swapping slots if it was a Y switch.
/// 3. Drive every axis with unknown polarity negative until one of its
///    switches closes. Closing the positive one means the motor is inverted.
/// 4. Run to the positive corner, then to the negative corner, counting steps.
///    A seek that overruns the expected length plus tolerance is a jam.
/// 5. Zero both motors at the negative corner.
#[derive(Debug, Clone)]
pub struct CalibrationEngine {
    config: CalibrationConfig,
    state: EngineState,
}

impl CalibrationEngine {
    /// New engine in the [`EngineState::Ready`] state.
    pub fn new(config: CalibrationConfig) -> Self {
        Self {
            config,
            state: EngineState::Ready,
        }
    }

    /// Tuning in use.
    #[inline]
    pub fn config(&self) -> &CalibrationConfig {
        &self.config
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Whether a jam stopped the engine.
    #[inline]
    pub fn is_halted(&self) -> bool {
        self.state == EngineState::Halted
    }

    /// Last successful calibration, if any.
    pub fn data(&self) -> Option<&CalibrationData> {
        match &self.state {
            EngineState::Calibrated(data) => Some(data),
            _ => None,
        }
    }

    /// Discover the motor wiring and measure both axes.
    ///
    /// Leaves both carriages at the negative corner with their step counters
    /// at zero. A jam halts the engine and the context for good.
    pub fn calibrate<S, L>(
        &mut self,
        ctx: &mut CalibrationContext<'_, S, L>,
    ) -> Result<CalibrationData>
    where
        S: Stepper,
        L: LimitSwitches,
    {
        self.check_running(ctx)?;

        match Pass::new(&self.config, ctx).run() {
            Ok(data) => {
                self.state = EngineState::Calibrated(data);
                Ok(data)
            }
            Err(e) => {
                self.state = match e {
                    Error::Calibration(CalibrationError::Jammed { .. }) => {
                        ctx.halt();
                        EngineState::Halted
                    }
                    _ => EngineState::Ready,
                };
                Err(e)
            }
        }
    }

    /// Apply a stored calibration without moving anything.
    ///
    /// The carriages are wherever they were left; home the axes before use.
    pub fn restore<S, L>(
        &mut self,
        ctx: &mut CalibrationContext<'_, S, L>,
        data: &CalibrationData,
    ) -> Result<()>
    where
        S: Stepper,
        L: LimitSwitches,
    {
        self.check_running(ctx)?;

        if data.x_axis.motor == data.y_axis.motor {
            return Err(CalibrationError::ConflictingAssignment.into());
        }

        ctx.apply(data);
        for id in [MotorId::A, MotorId::B] {
            ctx.motor(id).set_speed(self.config.seek_speed);
        }
        info!(
            "Calibration restored: X on motor {} ({} steps), Y on motor {} ({} steps)",
            data.x_axis.motor,
            data.x_axis.length,
            data.y_axis.motor,
            data.y_axis.length
        );

        self.state = EngineState::Calibrated(*data);
        Ok(())
    }

    /// Restore from `store` if it holds a record, otherwise calibrate and save.
    pub fn calibrate_or_restore<S, L, C>(
        &mut self,
        ctx: &mut CalibrationContext<'_, S, L>,
        store: &mut C,
    ) -> Result<CalibrationData>
    where
        S: Stepper,
        L: LimitSwitches,
        C: CalibrationStore + ?Sized,
    {
        self.check_running(ctx)?;

        if let Some(data) = store.load()? {
            self.restore(ctx, &data)?;
            return Ok(data);
        }

        info!("No stored calibration");
        let data = self.calibrate(ctx)?;
        store.save(&data)?;
        Ok(data)
    }

    fn check_running<S, L>(&self, ctx: &CalibrationContext<'_, S, L>) -> Result<()>
    where
        S: Stepper,
        L: LimitSwitches,
    {
        if self.is_halted() || ctx.is_halted() {
            return Err(CalibrationError::Halted.into());
        }
        Ok(())
    }
}

/// Steps counted per axis during a measurement leg.
#[derive(Debug, Default, Clone, Copy)]
struct Odometer([u32; 2]);

impl Odometer {
    fn get(&self, axis: AxisLabel) -> u32 {
        self.0[axis.index()]
    }

    fn bump(&mut self, axis: AxisLabel) {
        self.0[axis.index()] += 1;
    }
}

/// One calibration attempt.
struct Pass<'p, 'a, S, L>
where
    S: Stepper,
    L: LimitSwitches,
{
    config: &'p CalibrationConfig,
    ctx: &'p mut CalibrationContext<'a, S, L>,
    /// Axis each motor resolved to while probing.
    probed: [Option<AxisLabel>; 2],
    /// Polarity known per axis.
    settled: [bool; 2],
    /// Motor has reached a switch while driven negative.
    seeked: [bool; 2],
}

impl<'p, 'a, S, L> Pass<'p, 'a, S, L>
where
    S: Stepper,
    L: LimitSwitches,
{
    fn new(config: &'p CalibrationConfig, ctx: &'p mut CalibrationContext<'a, S, L>) -> Self {
        Self {
            config,
            ctx,
            probed: [None; 2],
            settled: [false; 2],
            seeked: [false; 2],
        }
    }

    fn run(mut self) -> Result<CalibrationData> {
        info!("Calibration beginning.");

        self.ctx.assign(MotorId::A);
        for id in [MotorId::A, MotorId::B] {
            let motor = self.ctx.motor(id);
            motor.set_inverted(false);
            motor.set_direction(Rotation::Clockwise);
        }
        self.set_speed(self.config.probe_speed);

        let resolved = self.escape()?;

        self.set_speed(self.config.seek_speed);

        if !resolved {
            info!("Resolved nothing, finding X");
            self.discover()?;
        }

        self.polarity()?;
        let lengths = self.measure()?;

        for id in [MotorId::A, MotorId::B] {
            self.ctx.motor(id).reset_position();
        }

        let data = CalibrationData {
            x_axis: self.describe(AxisLabel::X, lengths),
            y_axis: self.describe(AxisLabel::Y, lengths),
        };
        info!(
            "Calibrated: X on motor {} ({} steps{}), Y on motor {} ({} steps{})",
            data.x_axis.motor,
            data.x_axis.length,
            if data.x_axis.flipped { ", flipped" } else { "" },
            data.y_axis.motor,
            data.y_axis.length,
            if data.y_axis.flipped { ", flipped" } else { "" }
        );
        Ok(data)
    }

    fn set_speed(&mut self, speed: MillimetersPerMinute) {
        for id in [MotorId::A, MotorId::B] {
            self.ctx.motor(id).set_speed(speed);
        }
    }

    fn describe(&mut self, axis: AxisLabel, lengths: Odometer) -> AxisCalibration {
        let motor = self.ctx.motor_for(axis);
        AxisCalibration {
            motor,
            flipped: self.ctx.motor(motor).is_inverted(),
            length: lengths.get(axis),
        }
    }

    /// Probe both motors against switches that are already closed.
    fn escape(&mut self) -> Result<bool> {
        if !self.ctx.limits().any_limit() {
            info!("No switches are initially triggered.");
            return Ok(false);
        }

        let a = self.probe(MotorId::A, AxisLabel::X)?;
        let b = self.probe(MotorId::B, AxisLabel::Y)?;
        Ok(a || b)
    }

    /// Probe `motor` positive, then negative, assuming it drives `home`.
    fn probe(&mut self, motor: MotorId, home: AxisLabel) -> Result<bool> {
        let limits = self.ctx.limits();
        let escape = i64::from(self.config.escape_steps(motor));

        for (steps, toward) in [(escape, LimitMask::POSITIVE), (-escape, LimitMask::NEGATIVE)] {
            let probe = resolve(
                self.ctx.motor(motor),
                limits,
                steps,
                LimitMask::axis(home),
                toward,
            );
            match probe {
                Probe::Unresolved => {
                    debug!("Motor {}: no switch change over {} steps", motor, steps);
                }
                Probe::Resolved(resolution) => {
                    self.settle(motor, home, resolution)?;
                    return Ok(true);
                }
                Probe::Ambiguous {
                    released,
                    triggered,
                } => {
                    error!(
                        "Motor {}: probe changed several switches (released {}, triggered {})",
                        motor,
                        released.bits(),
                        triggered.bits()
                    );
                    return Err(CalibrationError::AmbiguousProbe {
                        motor,
                        released,
                        triggered,
                    }
                    .into());
                }
            }
        }
        Ok(false)
    }

    fn settle(&mut self, motor: MotorId, home: AxisLabel, resolution: Resolution) -> Result<()> {
        let axis = if resolution.axis_correct {
            home
        } else {
            home.other()
        };

        if let Some(previous) = self.probed[motor.other().index()] {
            if previous == axis {
                error!("Motors A and B both resolved to {}", axis.as_char());
                return Err(CalibrationError::ConflictingAssignment.into());
            }
        }
        self.probed[motor.index()] = Some(axis);

        let x_motor = match axis {
            AxisLabel::X => motor,
            AxisLabel::Y => motor.other(),
        };
        self.ctx.assign(x_motor);
        self.settled[axis.index()] = true;
        info!("Found {} = {}", motor, axis.as_char());

        if resolution.direction_correct {
            info!("Found + = +");
        } else {
            info!("Found + = -");
            self.ctx.motor(motor).set_inverted(true);
        }
        Ok(())
    }

    /// Drive the X slot negative until any switch closes.
    fn discover(&mut self) -> Result<()> {
        let limits = self.ctx.limits();
        let budget = self.config.discovery_budget();
        let mut steps = 0;

        while !limits.any_limit() {
            if steps >= budget {
                return Err(self.jam(AxisLabel::X, Phase::Discovery, steps));
            }
            self.ctx.axis_motor(AxisLabel::X).move_steps(-1);
            steps += 1;
        }
        if steps > 0 {
            self.seeked[self.ctx.motor_for(AxisLabel::X).index()] = true;
        }

        if limits.y_limit() {
            warn!("First switch belongs to Y, swapping motors");
            self.ctx.swap();
        }
        Ok(())
    }

    /// Drive each unsettled axis negative until one of its switches closes.
    fn polarity(&mut self) -> Result<()> {
        let limits = self.ctx.limits();
        let mut steps = Odometer::default();

        while !self.settled.iter().all(|settled| *settled) {
            for axis in [AxisLabel::X, AxisLabel::Y] {
                if self.settled[axis.index()] {
                    continue;
                }

                let motor = self.ctx.motor_for(axis);
                if limits.axis_limit(axis) {
                    if !self.seeked[motor.index()] {
                        error!("{} axis is on a switch it was never driven into", axis.as_char());
                        return Err(CalibrationError::PolarityUnresolvable(axis).into());
                    }
                    self.settled[axis.index()] = true;
                    if limits.limit(axis, StepDirection::Positive) {
                        info!("{} motor runs backwards, inverting", axis.as_char());
                        self.ctx.motor(motor).set_inverted(true);
                    }
                    continue;
                }

                if steps.get(axis) >= self.config.budget(axis) {
                    return Err(self.jam(axis, Phase::Polarity, steps.get(axis)));
                }
                self.ctx.motor(motor).move_steps(-1);
                steps.bump(axis);
                self.seeked[motor.index()] = true;
            }
        }
        Ok(())
    }

    /// Measure both axes corner to corner.
    fn measure(&mut self) -> Result<Odometer> {
        info!("Homing:");
        let both = [AxisLabel::X, AxisLabel::Y];

        let mut odometer = Odometer::default();
        self.travel(Phase::PositiveCorner, 1, &both, &mut odometer, |l| l.pos_limit())?;
        self.travel(Phase::PositiveX, 1, &[AxisLabel::X], &mut odometer, |l| l.x_pos_limit())?;
        self.travel(Phase::PositiveY, 1, &[AxisLabel::Y], &mut odometer, |l| l.y_pos_limit())?;

        let mut odometer = Odometer::default();
        self.travel(Phase::NegativeCorner, -1, &both, &mut odometer, |l| l.neg_limit())?;
        self.travel(Phase::NegativeX, -1, &[AxisLabel::X], &mut odometer, |l| l.x_neg_limit())?;
        self.travel(Phase::NegativeY, -1, &[AxisLabel::Y], &mut odometer, |l| l.y_neg_limit())?;

        Ok(odometer)
    }

    /// Step `axes` together until `reached` holds or a budget runs out.
    fn travel<F>(
        &mut self,
        phase: Phase,
        sense: i64,
        axes: &[AxisLabel],
        odometer: &mut Odometer,
        reached: F,
    ) -> Result<()>
    where
        F: Fn(&L) -> bool,
    {
        let limits = self.ctx.limits();
        debug!("Homing: {:?}", phase);

        while !reached(limits) {
            if let Some(&axis) = axes
                .iter()
                .find(|axis| odometer.get(**axis) >= self.config.budget(**axis))
            {
                return Err(self.jam(axis, phase, odometer.get(axis)));
            }
            for &axis in axes {
                self.ctx.axis_motor(axis).move_steps(sense);
                odometer.bump(axis);
            }
        }
        Ok(())
    }

    fn jam(&self, axis: AxisLabel, phase: Phase, steps: u32) -> Error {
        error!(
            "JAMMED: {} axis during {:?} after {} steps",
            axis.as_char(),
            phase,
            steps
        );
        CalibrationError::Jammed { axis, phase, steps }.into()
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;
    use crate::calibration::MemoryStore;
    use crate::sim::Bench;

    const X_LEN: u32 = 13_791;
    const Y_LEN: u32 = 10_764;

    fn plotter() -> Bench {
        let bench = Bench::new(X_LEN, Y_LEN);
        bench.place(AxisLabel::X, 5_000);
        bench.place(AxisLabel::Y, 3_000);
        bench
    }

    fn new_engine() -> CalibrationEngine {
        CalibrationEngine::new(CalibrationConfig::default())
    }

    #[test]
    fn test_calibrate_from_mid_travel() {
        let bench = plotter();
        let switches = bench.switches();
        let mut a = bench.stepper(AxisLabel::X, false);
        let mut b = bench.stepper(AxisLabel::Y, false);
        let mut ctx = CalibrationContext::new(&mut a, &mut b, &switches);
        let mut engine = new_engine();

        let data = engine.calibrate(&mut ctx).unwrap();

        assert_eq!(
            data.x_axis,
            AxisCalibration {
                motor: MotorId::A,
                flipped: false,
                length: X_LEN,
            }
        );
        assert_eq!(
            data.y_axis,
            AxisCalibration {
                motor: MotorId::B,
                flipped: false,
                length: Y_LEN,
            }
        );
        assert_eq!(engine.state(), EngineState::Calibrated(data));
        assert_eq!(engine.data(), Some(&data));

        drop(ctx);
        assert_eq!(bench.position(AxisLabel::X), 0);
        assert_eq!(bench.position(AxisLabel::Y), 0);
        assert_eq!(a.position(), 0);
        assert_eq!(b.position(), 0);
        assert_eq!(a.speed(), CalibrationConfig::default().seek_speed);
    }

    #[test]
    fn test_first_switch_on_y_swaps_motors() {
        let bench = plotter();
        let switches = bench.switches();
        // Motor A is wired to the Y carriage
        let mut a = bench.stepper(AxisLabel::Y, false);
        let mut b = bench.stepper(AxisLabel::X, false);
        let mut ctx = CalibrationContext::new(&mut a, &mut b, &switches);

        let data = new_engine().calibrate(&mut ctx).unwrap();

        assert_eq!(data.x_axis.motor, MotorId::B);
        assert_eq!(data.y_axis.motor, MotorId::A);
        assert_eq!(data.x_axis.length, X_LEN);
        assert_eq!(data.y_axis.length, Y_LEN);
        assert_eq!(ctx.motor_for(AxisLabel::X), MotorId::B);
    }

    #[test]
    fn test_reversed_motor_is_flipped() {
        let bench = plotter();
        let switches = bench.switches();
        let mut a = bench.stepper(AxisLabel::X, true);
        let mut b = bench.stepper(AxisLabel::Y, false);
        let mut ctx = CalibrationContext::new(&mut a, &mut b, &switches);
        let mut engine = new_engine();

        let first = engine.calibrate(&mut ctx).unwrap();
        assert!(first.x_axis.flipped);
        assert!(!first.y_axis.flipped);
        assert_eq!(first.x_axis.length, X_LEN);

        // Both carriages now sit on their negative switches
        let second = engine.calibrate(&mut ctx).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_pre_triggered_switch_resolves_without_discovery() {
        let bench = plotter();
        bench.place(AxisLabel::X, 0);
        let switches = bench.switches();
        let mut a = bench.stepper(AxisLabel::X, false);
        let mut b = bench.stepper(AxisLabel::Y, false);
        let mut ctx = CalibrationContext::new(&mut a, &mut b, &switches);

        let data = new_engine().calibrate(&mut ctx).unwrap();

        assert_eq!(data.x_axis.motor, MotorId::A);
        assert!(!data.x_axis.flipped);
        assert_eq!(data.x_axis.length, X_LEN);
        assert_eq!(data.y_axis.length, Y_LEN);
    }

    #[test]
    fn test_second_motor_resolves_to_x() {
        let bench = plotter();
        bench.place(AxisLabel::X, 0);
        let switches = bench.switches();
        // Motor A is wired to Y and finds nothing; motor B releases the X switch
        let mut a = bench.stepper(AxisLabel::Y, false);
        let mut b = bench.stepper(AxisLabel::X, false);
        let mut ctx = CalibrationContext::new(&mut a, &mut b, &switches);

        let data = new_engine().calibrate(&mut ctx).unwrap();

        assert_eq!(
            data.x_axis,
            AxisCalibration {
                motor: MotorId::B,
                flipped: false,
                length: X_LEN,
            }
        );
        assert_eq!(
            data.y_axis,
            AxisCalibration {
                motor: MotorId::A,
                flipped: false,
                length: Y_LEN,
            }
        );
        assert_eq!(ctx.motor_for(AxisLabel::X), MotorId::B);
    }

    #[test]
    fn test_probe_into_switch_is_undone() {
        let bench = plotter();
        bench.place(AxisLabel::X, X_LEN - 100);
        bench.place(AxisLabel::Y, 0);
        let switches = bench.switches();
        let mut a = bench.stepper(AxisLabel::X, false);
        let mut b = bench.stepper(AxisLabel::Y, false);
        let mut ctx = CalibrationContext::new(&mut a, &mut b, &switches);

        let data = new_engine().calibrate(&mut ctx).unwrap();

        assert_eq!(data.x_axis.motor, MotorId::A);
        assert_eq!(data.y_axis.motor, MotorId::B);
        assert!(!data.x_axis.flipped);
        assert!(!data.y_axis.flipped);
    }

    #[test]
    fn test_jam_halts_engine() {
        let bench = plotter();
        bench.jam(AxisLabel::X, 8_000);
        let switches = bench.switches();
        let mut a = bench.stepper(AxisLabel::X, false);
        let mut b = bench.stepper(AxisLabel::Y, false);
        let mut ctx = CalibrationContext::new(&mut a, &mut b, &switches);
        let mut engine = new_engine();

        let err = engine.calibrate(&mut ctx).unwrap_err();
        assert_eq!(
            err,
            Error::Calibration(CalibrationError::Jammed {
                axis: AxisLabel::X,
                phase: Phase::PositiveX,
                steps: 13_841,
            })
        );
        assert!(engine.is_halted());

        let x = bench.position(AxisLabel::X);
        let y = bench.position(AxisLabel::Y);
        let samples = bench.samples();
        let issued = ctx.motor(MotorId::A).steps_issued() + ctx.motor(MotorId::B).steps_issued();

        assert_eq!(
            engine.calibrate(&mut ctx),
            Err(Error::Calibration(CalibrationError::Halted))
        );
        let mut store = MemoryStore::new();
        assert_eq!(
            engine.calibrate_or_restore(&mut ctx, &mut store),
            Err(Error::Calibration(CalibrationError::Halted))
        );

        assert_eq!(bench.position(AxisLabel::X), x);
        assert_eq!(bench.position(AxisLabel::Y), y);
        assert_eq!(bench.samples(), samples);
        assert_eq!(
            ctx.motor(MotorId::A).steps_issued() + ctx.motor(MotorId::B).steps_issued(),
            issued
        );

        // A fresh engine cannot revive the jammed motors either
        assert!(ctx.is_halted());
        assert_eq!(
            new_engine().calibrate(&mut ctx),
            Err(Error::Calibration(CalibrationError::Halted))
        );
        assert!(matches!(
            ctx.into_gantry(&crate::config::MachineConfig::default()),
            Err(Error::Calibration(CalibrationError::Halted))
        ));
        assert_eq!(bench.position(AxisLabel::X), x);
        assert_eq!(bench.position(AxisLabel::Y), y);
    }

    #[test]
    fn test_probe_across_whole_axis_is_ambiguous() {
        let bench = Bench::new(150, 1_000);
        bench.place(AxisLabel::X, 0);
        let switches = bench.switches();
        let mut a = bench.stepper(AxisLabel::X, false);
        let mut b = bench.stepper(AxisLabel::Y, false);
        let mut ctx = CalibrationContext::new(&mut a, &mut b, &switches);
        let mut engine = new_engine();

        assert_eq!(
            engine.calibrate(&mut ctx),
            Err(Error::Calibration(CalibrationError::AmbiguousProbe {
                motor: MotorId::A,
                released: LimitMask::X_NEG,
                triggered: LimitMask::X_POS,
            }))
        );
        assert_eq!(engine.state(), EngineState::Ready);
    }

    #[test]
    fn test_two_motors_on_one_axis_conflict() {
        let bench = plotter();
        bench.place(AxisLabel::X, 0);
        let switches = bench.switches();
        let mut a = bench.stepper(AxisLabel::X, false);
        let mut b = bench.stepper(AxisLabel::X, true);
        let mut ctx = CalibrationContext::new(&mut a, &mut b, &switches);

        assert_eq!(
            new_engine().calibrate(&mut ctx),
            Err(Error::Calibration(CalibrationError::ConflictingAssignment))
        );
    }

    #[test]
    fn test_stuck_carriage_on_switch_is_unresolvable() {
        let bench = plotter();
        bench.place(AxisLabel::X, 0);
        bench.jam(AxisLabel::X, 0);
        let switches = bench.switches();
        let mut a = bench.stepper(AxisLabel::X, false);
        let mut b = bench.stepper(AxisLabel::Y, false);
        let mut ctx = CalibrationContext::new(&mut a, &mut b, &switches);

        assert_eq!(
            new_engine().calibrate(&mut ctx),
            Err(Error::Calibration(CalibrationError::PolarityUnresolvable(
                AxisLabel::X
            )))
        );
    }

    #[test]
    fn test_calibrate_then_restore() {
        let mut store = MemoryStore::new();

        let bench = plotter();
        let switches = bench.switches();
        let mut a = bench.stepper(AxisLabel::Y, true);
        let mut b = bench.stepper(AxisLabel::X, false);
        let mut ctx = CalibrationContext::new(&mut a, &mut b, &switches);
        let data = new_engine().calibrate_or_restore(&mut ctx, &mut store).unwrap();
        assert_eq!(store.load().unwrap(), Some(data));

        let bench = plotter();
        let switches = bench.switches();
        let mut a = bench.stepper(AxisLabel::Y, true);
        let mut b = bench.stepper(AxisLabel::X, false);
        let mut ctx = CalibrationContext::new(&mut a, &mut b, &switches);
        let mut engine = new_engine();

        assert_eq!(engine.calibrate_or_restore(&mut ctx, &mut store), Ok(data));
        assert_eq!(bench.samples(), 0);
        assert_eq!(ctx.motor_for(AxisLabel::X), MotorId::B);
        assert!(ctx.motor(MotorId::A).is_inverted());
        assert_eq!(ctx.motor(MotorId::A).steps_issued(), 0);
        assert_eq!(engine.data(), Some(&data));
    }
}
