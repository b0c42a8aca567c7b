//! Longitudinal (pitch/speed) control law.
//!
//! Loops, evaluated in this order every tick:
//!
//! 1. **Speed**: PID on `airspeed_desired - airspeed` → throttle. Zero when disabled.
//! 2. **Altitude**: PID on `altitude_desired - altitude` → desired pitch angle.
//!    Bypass: the raw desired altitude is forwarded to the pitch-angle loop.
//! 3. **Pitch angle**: anti-stall saturation of the desired pitch angle, then a
//!    PID on `pitch_desired - pitch` → desired pitch rate. Bypass: its input is
//!    forwarded unchanged.
//! 4. **Pitch rate**: PID on `rate_desired - pitch_rate` → elevator. When
//!    disabled the elevator command falls back to the raw desired altitude.
//!
//! Both bypasses of the altitude reference mix units (a length forwarded as an
//! angle or a deflection). They are the established behavior of this law and
//! are kept as is; callers that disable loops pick their references accordingly.

use fl_blocks::{Pid, PidGains, Saturation};
use fl_core::{Block, ControlResult, Scalar, ensure_time_step};
use tracing::debug;

/// Enable flags, one per loop. All loops start enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LongitudinalLoops {
    pub speed: bool,
    pub altitude: bool,
    pub pitch_angle: bool,
    pub pitch_rate: bool,
}

impl Default for LongitudinalLoops {
    fn default() -> Self {
        Self {
            speed: true,
            altitude: true,
            pitch_angle: true,
            pitch_rate: true,
        }
    }
}

impl LongitudinalLoops {
    pub fn all_disabled() -> Self {
        Self {
            speed: false,
            altitude: false,
            pitch_angle: false,
            pitch_rate: false,
        }
    }
}

/// Measurements and references for one longitudinal tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LongitudinalInputs<T> {
    pub desired_altitude: T,
    pub desired_airspeed: T,
    pub altitude: T,
    pub airspeed: T,
    /// Radians.
    pub pitch: T,
    /// Radians per second.
    pub pitch_rate: T,
}

/// Actuator command pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LongitudinalOutput<T> {
    pub elevator: T,
    pub throttle: T,
}

impl<T: Scalar> Default for LongitudinalOutput<T> {
    fn default() -> Self {
        Self {
            elevator: T::zero(),
            throttle: T::zero(),
        }
    }
}

impl<T> From<LongitudinalOutput<T>> for (T, T) {
    fn from(out: LongitudinalOutput<T>) -> Self {
        (out.elevator, out.throttle)
    }
}

/// Longitudinal cascade of four PIDs and one pitch saturation.
#[derive(Debug, Clone, PartialEq)]
pub struct LongitudinalControl<T> {
    loops: LongitudinalLoops,

    speed_pid: Pid<T>,
    altitude_pid: Pid<T>,
    pitch_angle_pid: Pid<T>,
    pitch_rate_pid: Pid<T>,

    pitch_saturation: Saturation<T>,

    output: LongitudinalOutput<T>,
}

impl<T: Scalar> LongitudinalControl<T> {
    /// Zero gains, all loops enabled, unbounded pitch saturation.
    pub fn new() -> Self {
        Self {
            loops: LongitudinalLoops::default(),
            speed_pid: Pid::default(),
            altitude_pid: Pid::default(),
            pitch_angle_pid: Pid::default(),
            pitch_rate_pid: Pid::default(),
            pitch_saturation: Saturation::unbounded(),
            output: LongitudinalOutput::default(),
        }
    }

    /// Evaluate all enabled loops for one tick and return `(elevator, throttle)`.
    ///
    /// # Errors
    ///
    /// Returns a domain error if `dt` is not finite and positive. The time step
    /// is checked before any PID runs, so a failed tick mutates nothing.
    pub fn step(
        &mut self,
        inputs: &LongitudinalInputs<T>,
        dt: T,
    ) -> ControlResult<LongitudinalOutput<T>> {
        let dt = ensure_time_step(dt)?;

        let throttle = if self.loops.speed {
            self.speed_pid
                .step(inputs.desired_airspeed - inputs.airspeed, dt)?
        } else {
            T::zero()
        };

        let mut desired_pitch = inputs.desired_altitude;
        if self.loops.altitude {
            desired_pitch = self
                .altitude_pid
                .step(inputs.desired_altitude - inputs.altitude, dt)?;
        }

        // A disabled pitch-angle loop hands the raw desired altitude to the
        // pitch-rate loop.
        let mut desired_rate = inputs.desired_altitude;
        if self.loops.pitch_angle {
            let desired_pitch = self.pitch_saturation.step(desired_pitch);
            desired_rate = self
                .pitch_angle_pid
                .step(desired_pitch - inputs.pitch, dt)?;
        }

        let elevator = if self.loops.pitch_rate {
            self.pitch_rate_pid
                .step(desired_rate - inputs.pitch_rate, dt)?
        } else {
            inputs.desired_altitude
        };

        self.output = LongitudinalOutput { elevator, throttle };
        Ok(self.output)
    }

    pub fn set_speed_pid_gains(&mut self, p: T, i: T, d: T) {
        self.speed_pid.set_gains(p, i, d);
    }

    pub fn set_altitude_pid_gains(&mut self, p: T, i: T, d: T) {
        self.altitude_pid.set_gains(p, i, d);
    }

    pub fn set_pitch_angle_pid_gains(&mut self, p: T, i: T, d: T) {
        self.pitch_angle_pid.set_gains(p, i, d);
    }

    pub fn set_pitch_rate_pid_gains(&mut self, p: T, i: T, d: T) {
        self.pitch_rate_pid.set_gains(p, i, d);
    }

    /// Anti-stall bounds of the desired pitch angle (radians).
    pub fn set_pitch_saturation_limits(&mut self, min: T, max: T) -> ControlResult<()> {
        self.pitch_saturation.set_limits(min, max)
    }

    pub fn enable_speed_control(&mut self, enable: bool) {
        log_toggle("speed", self.loops.speed, enable);
        self.loops.speed = enable;
    }

    pub fn enable_altitude_control(&mut self, enable: bool) {
        log_toggle("altitude", self.loops.altitude, enable);
        self.loops.altitude = enable;
    }

    pub fn enable_pitch_angle_control(&mut self, enable: bool) {
        log_toggle("pitch_angle", self.loops.pitch_angle, enable);
        self.loops.pitch_angle = enable;
    }

    pub fn enable_pitch_rate_control(&mut self, enable: bool) {
        log_toggle("pitch_rate", self.loops.pitch_rate, enable);
        self.loops.pitch_rate = enable;
    }

    pub fn set_loops(&mut self, loops: LongitudinalLoops) {
        self.enable_speed_control(loops.speed);
        self.enable_altitude_control(loops.altitude);
        self.enable_pitch_angle_control(loops.pitch_angle);
        self.enable_pitch_rate_control(loops.pitch_rate);
    }

    pub fn loops(&self) -> LongitudinalLoops {
        self.loops
    }

    /// Gains of `(speed, altitude, pitch angle, pitch rate)` PIDs.
    pub fn gains(&self) -> [PidGains<T>; 4] {
        [
            self.speed_pid.gains(),
            self.altitude_pid.gains(),
            self.pitch_angle_pid.gains(),
            self.pitch_rate_pid.gains(),
        ]
    }

    pub fn speed_pid(&self) -> &Pid<T> {
        &self.speed_pid
    }

    pub fn altitude_pid(&self) -> &Pid<T> {
        &self.altitude_pid
    }

    pub fn pitch_angle_pid(&self) -> &Pid<T> {
        &self.pitch_angle_pid
    }

    pub fn pitch_rate_pid(&self) -> &Pid<T> {
        &self.pitch_rate_pid
    }

    /// Mutable access for term limits and bumpless state seeding.
    pub fn speed_pid_mut(&mut self) -> &mut Pid<T> {
        &mut self.speed_pid
    }

    pub fn altitude_pid_mut(&mut self) -> &mut Pid<T> {
        &mut self.altitude_pid
    }

    pub fn pitch_angle_pid_mut(&mut self) -> &mut Pid<T> {
        &mut self.pitch_angle_pid
    }

    pub fn pitch_rate_pid_mut(&mut self) -> &mut Pid<T> {
        &mut self.pitch_rate_pid
    }

    pub fn pitch_saturation(&self) -> &Saturation<T> {
        &self.pitch_saturation
    }
}

fn log_toggle(loop_name: &'static str, was: bool, now: bool) {
    if was != now {
        debug!(law = "longitudinal", loop_name, enabled = now, "loop toggled");
    }
}

impl<T: Scalar> Default for LongitudinalControl<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> Block for LongitudinalControl<T> {
    type Output = LongitudinalOutput<T>;

    fn output(&self) -> LongitudinalOutput<T> {
        self.output
    }

    /// Clears PID memory, the pitch saturation output and the last command pair.
    /// Gains, limits and enable flags are kept.
    fn reset(&mut self) {
        self.speed_pid.reset();
        self.altitude_pid.reset();
        self.pitch_angle_pid.reset();
        self.pitch_rate_pid.reset();
        self.pitch_saturation.reset();
        self.output = LongitudinalOutput::default();
    }
}
