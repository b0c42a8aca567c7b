//! Integrator block with re-clamping anti-windup.

use fl_core::{
    Block, ControlResult, DEFAULT_LIMIT, Scalar, clamp, ensure_limits, ensure_time_step, lit,
};

/// Forward-Euler integrator: `state = clamp(state + x * dt, min, max)`.
///
/// Anti-windup is applied by re-clamping after every accumulation, so once the
/// state sits on a bound, further input in the same direction does not move it,
/// while input in the opposite direction pulls it back immediately.
///
/// # Example
///
/// ```
/// use fl_blocks::{Block, Integrator};
///
/// let mut integ = Integrator::new(-1.0, 1.0).unwrap();
/// for _ in 0..10 {
///     integ.step(1.0, 0.2).unwrap();
/// }
/// assert_eq!(integ.output(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Integrator<T> {
    state: T,
    min: T,
    max: T,
}

impl<T: Scalar> Integrator<T> {
    /// Create an integrator with explicit bounds and zero state.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `min > max`.
    pub fn new(min: T, max: T) -> ControlResult<Self> {
        let (min, max) = ensure_limits(min, max)?;
        Ok(Self {
            state: T::zero(),
            min,
            max,
        })
    }

    /// Integrator bounded to `[-|limit|, |limit|]`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `limit` is NaN.
    pub fn symmetric(limit: T) -> ControlResult<Self> {
        let limit = limit.abs();
        Self::new(-limit, limit)
    }

    /// Integrator bounded to `[-1, 1]`.
    pub fn unit() -> Self {
        Self {
            state: T::zero(),
            min: -T::one(),
            max: T::one(),
        }
    }

    /// Accumulate `input * dt` and re-clamp.
    ///
    /// # Errors
    ///
    /// Returns a domain error (and leaves the state untouched) if `dt` is not
    /// finite and positive.
    pub fn step(&mut self, input: T, dt: T) -> ControlResult<T> {
        let dt = ensure_time_step(dt)?;
        self.state = clamp(self.state + input * dt, self.min, self.max);
        Ok(self.state)
    }

    /// Override the accumulated state, e.g. for bumpless re-engagement.
    pub fn set_state(&mut self, state: T) {
        self.state = state;
    }

    /// Replace the bounds. On error the previous bounds stay in effect.
    ///
    /// The state is not re-clamped here; the next `step` brings it back inside.
    pub fn set_limits(&mut self, min: T, max: T) -> ControlResult<()> {
        let (min, max) = ensure_limits(min, max)?;
        self.min = min;
        self.max = max;
        Ok(())
    }

    pub fn limits(&self) -> (T, T) {
        (self.min, self.max)
    }
}

impl<T: Scalar> Default for Integrator<T> {
    fn default() -> Self {
        let limit: T = lit(DEFAULT_LIMIT);
        Self {
            state: T::zero(),
            min: -limit,
            max: limit,
        }
    }
}

impl<T: Scalar> Block for Integrator<T> {
    type Output = T;

    fn output(&self) -> T {
        self.state
    }

    fn reset(&mut self) {
        self.state = T::zero();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_state_and_limits() {
        let integ = Integrator::<f64>::default();
        assert_eq!(integ.output(), 0.0);
        assert_eq!(integ.limits(), (-10_000.0, 10_000.0));
    }

    #[test]
    fn constant_input_accumulates_linearly() {
        let mut integ = Integrator::<f64>::default();
        for _ in 0..25 {
            integ.step(2.0, 0.1).unwrap();
        }
        assert_relative_eq!(integ.output(), 25.0 * 2.0 * 0.1, epsilon = 1e-12);
    }

    #[test]
    fn saturated_state_does_not_wind_up() {
        let mut integ = Integrator::new(-1.0, 1.0).unwrap();
        for _ in 0..100 {
            integ.step(5.0, 0.1).unwrap();
        }
        assert_eq!(integ.output(), 1.0);
        // One step back is enough to leave the bound.
        integ.step(-1.0, 0.1).unwrap();
        assert_relative_eq!(integ.output(), 0.9, epsilon = 1e-12);
    }

    #[test]
    fn negative_input_hits_lower_bound() {
        let mut integ = Integrator::new(-0.5, 0.5).unwrap();
        integ.step(-100.0, 0.1).unwrap();
        assert_eq!(integ.output(), -0.5);
    }

    #[test]
    fn zero_time_step_is_a_domain_error() {
        let mut integ = Integrator::<f64>::default();
        integ.step(1.0, 0.5).unwrap();
        let err = integ.step(1.0, 0.0).unwrap_err();
        assert!(err.is_domain());
        assert_eq!(integ.output(), 0.5);
    }

    #[test]
    fn symmetric_uses_magnitude() {
        assert_eq!(Integrator::symmetric(-2.0).unwrap().limits(), (-2.0, 2.0));
    }

    #[test]
    fn symmetric_rejects_nan_limit() {
        let err = Integrator::symmetric(f64::NAN).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn unit_is_bounded_to_one() {
        let mut integ = Integrator::<f64>::unit();
        assert_eq!(integ.limits(), (-1.0, 1.0));
        integ.step(5.0, 1.0).unwrap();
        assert_eq!(integ.output(), 1.0);
    }

    #[test]
    fn set_state_overrides_accumulation() {
        let mut integ = Integrator::<f64>::default();
        integ.set_state(3.0);
        assert_eq!(integ.output(), 3.0);
        integ.step(1.0, 1.0).unwrap();
        assert_eq!(integ.output(), 4.0);
    }

    #[test]
    fn rejected_limits_keep_previous_bounds() {
        let mut integ = Integrator::new(-2.0, 2.0).unwrap();
        assert!(integ.set_limits(1.0, -1.0).unwrap_err().is_configuration());
        assert_eq!(integ.limits(), (-2.0, 2.0));
        assert!(Integrator::new(3.0, 2.0).is_err());
    }

    #[test]
    fn reset_zeroes_state_and_keeps_bounds() {
        let mut integ = Integrator::new(-2.0, 2.0).unwrap();
        integ.step(1.0, 1.0).unwrap();
        integ.reset();
        assert_eq!(integ.output(), 0.0);
        assert_eq!(integ.limits(), (-2.0, 2.0));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn state_never_leaves_bounds(
            bound in 0.1_f64..100.0,
            inputs in prop::collection::vec(-1e3_f64..1e3, 1..100),
            dt in 1e-3_f64..1.0,
        ) {
            let mut integ = Integrator::new(-bound, bound).unwrap();
            for x in inputs {
                let y = integ.step(x, dt).unwrap();
                prop_assert!(y >= -bound && y <= bound);
            }
        }

        #[test]
        fn unsaturated_state_is_n_x_dt(
            x in -10.0_f64..10.0,
            dt in 1e-3_f64..0.1,
            n in 1usize..200,
        ) {
            let mut integ = Integrator::<f64>::default();
            for _ in 0..n {
                integ.step(x, dt).unwrap();
            }
            let expected = n as f64 * x * dt;
            prop_assert!((integ.output() - expected).abs() <= 1e-9 * (1.0 + expected.abs()));
        }
    }
}
