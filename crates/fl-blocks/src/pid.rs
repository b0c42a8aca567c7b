//! PID compound block.
//!
//! The PID owns one [`Integrator`] and one [`Derivative`] that both see the raw
//! error. Gains are applied after integration and differentiation:
//!
//! ```text
//! output = P * e + I * integral(e) + D * de/dt
//! ```
//!
//! so the integrator and derivative limits bound the *unscaled* terms and are
//! configured independently of any saturation a caller layers on the output.

use fl_core::{Block, ControlResult, Scalar, ensure_limits, ensure_time_step};

use crate::derivative::Derivative;
use crate::integrator::Integrator;

/// Proportional, integral and derivative gains.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PidGains<T> {
    pub p: T,
    pub i: T,
    pub d: T,
}

impl<T: Scalar> PidGains<T> {
    pub fn new(p: T, i: T, d: T) -> Self {
        Self { p, i, d }
    }
}

impl<T: Scalar> Default for PidGains<T> {
    fn default() -> Self {
        Self::new(T::zero(), T::zero(), T::zero())
    }
}

/// PID controller built from an integrator and a derivative block.
///
/// # Example
///
/// ```
/// use fl_blocks::{Block, Pid};
///
/// let mut pid = Pid::<f64>::new(1.0, 1.0, 1.0);
/// pid.step(1.0, 0.1).unwrap();
/// // 1 * 1 + 1 * 0.1 + 1 * 10
/// assert!((pid.output() - 11.1).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Pid<T> {
    integrator: Integrator<T>,
    derivative: Derivative<T>,
    gains: PidGains<T>,
    output: T,
}

impl<T: Scalar> Pid<T> {
    /// Create a PID with default integrator/derivative bounds.
    pub fn new(p: T, i: T, d: T) -> Self {
        Self {
            integrator: Integrator::default(),
            derivative: Derivative::default(),
            gains: PidGains::new(p, i, d),
            output: T::zero(),
        }
    }

    /// Create a PID with explicit integrator and derivative bounds.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if either bound pair is inverted.
    pub fn with_limits(
        gains: PidGains<T>,
        integrator_limits: (T, T),
        derivative_limits: (T, T),
    ) -> ControlResult<Self> {
        Ok(Self {
            integrator: Integrator::new(integrator_limits.0, integrator_limits.1)?,
            derivative: Derivative::new(derivative_limits.0, derivative_limits.1)?,
            gains,
            output: T::zero(),
        })
    }

    /// Advance both sub-blocks with the raw error and recombine.
    ///
    /// # Errors
    ///
    /// Returns a domain error if `dt` is not finite and positive; neither
    /// sub-block is advanced in that case.
    pub fn step(&mut self, error: T, dt: T) -> ControlResult<T> {
        let dt = ensure_time_step(dt)?;
        let integral = self.integrator.step(error, dt)?;
        let rate = self.derivative.step(error, dt)?;
        let PidGains { p, i, d } = self.gains;
        self.output = p * error + i * integral + d * rate;
        Ok(self.output)
    }

    pub fn set_gains(&mut self, p: T, i: T, d: T) {
        self.gains = PidGains::new(p, i, d);
    }

    pub fn set_p(&mut self, p: T) {
        self.gains.p = p;
    }

    pub fn set_i(&mut self, i: T) {
        self.gains.i = i;
    }

    pub fn set_d(&mut self, d: T) {
        self.gains.d = d;
    }

    pub fn gains(&self) -> PidGains<T> {
        self.gains
    }

    /// Set integrator and derivative bounds together.
    ///
    /// Both pairs are validated before either is applied, so a rejected call
    /// leaves both sub-blocks unchanged.
    pub fn set_limits(
        &mut self,
        integrator_min: T,
        integrator_max: T,
        derivative_min: T,
        derivative_max: T,
    ) -> ControlResult<()> {
        let (i_min, i_max) = ensure_limits(integrator_min, integrator_max)?;
        let (d_min, d_max) = ensure_limits(derivative_min, derivative_max)?;
        self.integrator.set_limits(i_min, i_max)?;
        self.derivative.set_limits(d_min, d_max)
    }

    pub fn set_integrator_limits(&mut self, min: T, max: T) -> ControlResult<()> {
        self.integrator.set_limits(min, max)
    }

    pub fn set_derivative_limits(&mut self, min: T, max: T) -> ControlResult<()> {
        self.derivative.set_limits(min, max)
    }

    pub fn set_integrator_state(&mut self, state: T) {
        self.integrator.set_state(state);
    }

    pub fn set_derivative_state(&mut self, prev_input: T) {
        self.derivative.set_state(prev_input);
    }

    pub fn integrator(&self) -> &Integrator<T> {
        &self.integrator
    }

    pub fn derivative(&self) -> &Derivative<T> {
        &self.derivative
    }
}

impl<T: Scalar> Default for Pid<T> {
    fn default() -> Self {
        Self::new(T::zero(), T::zero(), T::zero())
    }
}

impl<T: Scalar> Block for Pid<T> {
    type Output = T;

    fn output(&self) -> T {
        self.output
    }

    /// Clears integral, derivative memory and the output. Gains and bounds are kept.
    fn reset(&mut self) {
        self.integrator.reset();
        self.derivative.reset();
        self.output = T::zero();
    }
}
