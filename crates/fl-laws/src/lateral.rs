//! Lateral (roll/yaw) control law.
//!
//! Loops, evaluated in this order every tick:
//!
//! 1. **Rudder**: `rudder = sat(k_omega_yaw_rudder * yaw_rate + k_roll_rudder * yaw_angle)`,
//!    zero when disabled. Independent of the aileron cascade.
//! 2. **Yaw angle**: `e = yaw - yaw_desired`; integrates `k_psi_i * e` and forms
//!    the desired roll angle `sat_roll(k_psi * e + ∫)`. Bypass: the desired yaw
//!    angle is forwarded unchanged.
//! 3. **Roll angle**: re-saturates the desired roll angle, integrates
//!    `k_i_roll * (roll - roll_desired)` and adds `k_roll * roll`. Bypass: its
//!    input is forwarded unchanged.
//! 4. **Roll-rate damper**: `aileron = sat_aileron(k_omega_roll * roll_rate + input)`.
//!    When disabled the aileron command falls back to the *desired yaw angle*
//!    input. That fallback is the established behavior of this law and is kept
//!    as is.

use fl_blocks::{Integrator, Saturation};
use fl_core::{Block, ControlResult, Scalar, ensure_time_step};
use tracing::debug;

/// Gains of the lateral law.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LateralGains<T> {
    /// Yaw rate → rudder.
    pub k_omega_yaw_rudder: T,
    /// Yaw angle → rudder.
    pub k_roll_rudder: T,
    /// Roll rate → aileron (damper).
    pub k_omega_roll_aileron: T,
    /// Roll angle → aileron.
    pub k_roll_aileron: T,
    /// Roll error integral gain.
    pub k_i_roll_aileron: T,
    /// Yaw error → desired roll.
    pub k_psi_aileron: T,
    /// Yaw error integral gain.
    pub k_psi_i_aileron: T,
}

impl<T: Scalar> Default for LateralGains<T> {
    fn default() -> Self {
        Self {
            k_omega_yaw_rudder: T::zero(),
            k_roll_rudder: T::zero(),
            k_omega_roll_aileron: T::zero(),
            k_roll_aileron: T::zero(),
            k_i_roll_aileron: T::zero(),
            k_psi_aileron: T::zero(),
            k_psi_i_aileron: T::zero(),
        }
    }
}

/// Enable flags, one per loop. All loops start enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LateralLoops {
    pub rudder: bool,
    pub yaw_angle: bool,
    pub roll_angle: bool,
    pub roll_rate: bool,
}

impl Default for LateralLoops {
    fn default() -> Self {
        Self {
            rudder: true,
            yaw_angle: true,
            roll_angle: true,
            roll_rate: true,
        }
    }
}

impl LateralLoops {
    pub fn all_disabled() -> Self {
        Self {
            rudder: false,
            yaw_angle: false,
            roll_angle: false,
            roll_rate: false,
        }
    }
}

/// Measurements and reference for one lateral tick (radians, radians/second).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LateralInputs<T> {
    pub desired_yaw: T,
    pub yaw: T,
    pub yaw_rate: T,
    pub roll: T,
    pub roll_rate: T,
}

/// Actuator command pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LateralOutput<T> {
    pub aileron: T,
    pub rudder: T,
}

impl<T: Scalar> Default for LateralOutput<T> {
    fn default() -> Self {
        Self {
            aileron: T::zero(),
            rudder: T::zero(),
        }
    }
}

impl<T> From<LateralOutput<T>> for (T, T) {
    fn from(out: LateralOutput<T>) -> Self {
        (out.aileron, out.rudder)
    }
}

/// Lateral cascade: rudder loop plus a three-tier aileron cascade.
#[derive(Debug, Clone, PartialEq)]
pub struct LateralControl<T> {
    gains: LateralGains<T>,
    loops: LateralLoops,

    yaw_integrator: Integrator<T>,
    roll_integrator: Integrator<T>,

    desired_roll_saturation: Saturation<T>,
    aileron_saturation: Saturation<T>,
    rudder_saturation: Saturation<T>,

    output: LateralOutput<T>,
}

impl<T: Scalar> LateralControl<T> {
    /// Create a law with zero gains, all loops enabled, the roll integrator
    /// bounded to `[-1, 1]` and every saturation unbounded.
    pub fn new() -> Self {
        Self {
            gains: LateralGains::default(),
            loops: LateralLoops::default(),
            yaw_integrator: Integrator::default(),
            roll_integrator: Integrator::unit(),
            desired_roll_saturation: Saturation::unbounded(),
            aileron_saturation: Saturation::unbounded(),
            rudder_saturation: Saturation::unbounded(),
            output: LateralOutput::default(),
        }
    }

    pub fn with_gains(gains: LateralGains<T>) -> Self {
        Self {
            gains,
            ..Self::new()
        }
    }

    /// Evaluate all enabled loops for one tick and return `(aileron, rudder)`.
    ///
    /// # Errors
    ///
    /// Returns a domain error if `dt` is not finite and positive. The time step
    /// is checked before any loop runs, so a failed tick mutates nothing.
    pub fn step(
        &mut self,
        inputs: &LateralInputs<T>,
        dt: T,
    ) -> ControlResult<LateralOutput<T>> {
        let dt = ensure_time_step(dt)?;
        let g = self.gains;

        let rudder = if self.loops.rudder {
            self.rudder_saturation
                .step(g.k_omega_yaw_rudder * inputs.yaw_rate + g.k_roll_rudder * inputs.yaw)
        } else {
            T::zero()
        };

        let mut desired_roll = inputs.desired_yaw;
        if self.loops.yaw_angle {
            let yaw_error = inputs.yaw - inputs.desired_yaw;
            let integral = self.yaw_integrator.step(g.k_psi_i_aileron * yaw_error, dt)?;
            desired_roll = self
                .desired_roll_saturation
                .step(g.k_psi_aileron * yaw_error + integral);
        }

        // A disabled roll loop hands the raw desired yaw to the damper, not the
        // yaw loop's output.
        let mut rate_input = inputs.desired_yaw;
        if self.loops.roll_angle {
            let desired_roll = self.desired_roll_saturation.step(desired_roll);
            let roll_error = inputs.roll - desired_roll;
            let integral = self
                .roll_integrator
                .step(roll_error * g.k_i_roll_aileron, dt)?;
            rate_input = integral + g.k_roll_aileron * inputs.roll;
        }

        let aileron = if self.loops.roll_rate {
            self.aileron_saturation
                .step(g.k_omega_roll_aileron * inputs.roll_rate + rate_input)
        } else {
            inputs.desired_yaw
        };

        self.output = LateralOutput { aileron, rudder };
        Ok(self.output)
    }

    pub fn set_rudder_gains(&mut self, k_omega_yaw_rudder: T, k_roll_rudder: T) {
        self.gains.k_omega_yaw_rudder = k_omega_yaw_rudder;
        self.gains.k_roll_rudder = k_roll_rudder;
    }

    pub fn set_aileron_gains(
        &mut self,
        k_omega_roll_aileron: T,
        k_roll_aileron: T,
        k_i_roll_aileron: T,
        k_psi_aileron: T,
        k_psi_i_aileron: T,
    ) {
        self.gains.k_omega_roll_aileron = k_omega_roll_aileron;
        self.gains.k_roll_aileron = k_roll_aileron;
        self.gains.k_i_roll_aileron = k_i_roll_aileron;
        self.gains.k_psi_aileron = k_psi_aileron;
        self.gains.k_psi_i_aileron = k_psi_i_aileron;
    }

    pub fn set_gains(&mut self, gains: LateralGains<T>) {
        self.gains = gains;
    }

    pub fn gains(&self) -> LateralGains<T> {
        self.gains
    }

    /// Bounds of the desired roll angle (radians).
    pub fn set_roll_saturation_limits(&mut self, min: T, max: T) -> ControlResult<()> {
        self.desired_roll_saturation.set_limits(min, max)
    }

    pub fn set_rudder_saturation_limits(&mut self, min: T, max: T) -> ControlResult<()> {
        self.rudder_saturation.set_limits(min, max)
    }

    /// Bounds of the damper output. Not applied when the damper is disabled.
    pub fn set_aileron_saturation_limits(&mut self, min: T, max: T) -> ControlResult<()> {
        self.aileron_saturation.set_limits(min, max)
    }

    pub fn set_roll_integrator_limits(&mut self, min: T, max: T) -> ControlResult<()> {
        self.roll_integrator.set_limits(min, max)
    }

    pub fn set_yaw_integrator_limits(&mut self, min: T, max: T) -> ControlResult<()> {
        self.yaw_integrator.set_limits(min, max)
    }

    /// Seed the roll integrator, e.g. before re-enabling the roll-angle loop.
    pub fn set_roll_integrator_state(&mut self, state: T) {
        self.roll_integrator.set_state(state);
    }

    pub fn set_yaw_integrator_state(&mut self, state: T) {
        self.yaw_integrator.set_state(state);
    }

    pub fn enable_rudder_control(&mut self, enable: bool) {
        log_toggle("rudder", self.loops.rudder, enable);
        self.loops.rudder = enable;
    }

    pub fn enable_yaw_angle_control(&mut self, enable: bool) {
        log_toggle("yaw_angle", self.loops.yaw_angle, enable);
        self.loops.yaw_angle = enable;
    }

    pub fn enable_roll_angle_control(&mut self, enable: bool) {
        log_toggle("roll_angle", self.loops.roll_angle, enable);
        self.loops.roll_angle = enable;
    }

    pub fn enable_roll_rate_control(&mut self, enable: bool) {
        log_toggle("roll_rate", self.loops.roll_rate, enable);
        self.loops.roll_rate = enable;
    }

    pub fn set_loops(&mut self, loops: LateralLoops) {
        self.enable_rudder_control(loops.rudder);
        self.enable_yaw_angle_control(loops.yaw_angle);
        self.enable_roll_angle_control(loops.roll_angle);
        self.enable_roll_rate_control(loops.roll_rate);
    }

    pub fn loops(&self) -> LateralLoops {
        self.loops
    }

    pub fn yaw_integrator(&self) -> &Integrator<T> {
        &self.yaw_integrator
    }

    pub fn roll_integrator(&self) -> &Integrator<T> {
        &self.roll_integrator
    }

    pub fn desired_roll_saturation(&self) -> &Saturation<T> {
        &self.desired_roll_saturation
    }

    pub fn rudder_saturation(&self) -> &Saturation<T> {
        &self.rudder_saturation
    }

    pub fn aileron_saturation(&self) -> &Saturation<T> {
        &self.aileron_saturation
    }
}

fn log_toggle(loop_name: &'static str, was: bool, now: bool) {
    if was != now {
        debug!(law = "lateral", loop_name, enabled = now, "loop toggled");
    }
}

impl<T: Scalar> Default for LateralControl<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> Block for LateralControl<T> {
    type Output = LateralOutput<T>;

    fn output(&self) -> LateralOutput<T> {
        self.output
    }

    /// Clears integrators, saturation outputs and the last command pair.
    /// Gains, limits and enable flags are kept.
    fn reset(&mut self) {
        self.yaw_integrator.reset();
        self.roll_integrator.reset();
        self.desired_roll_saturation.reset();
        self.aileron_saturation.reset();
        self.rudder_saturation.reset();
        self.output = LateralOutput::default();
    }
}
