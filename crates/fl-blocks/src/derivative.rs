//! Derivative block (backward difference).

use fl_core::{
    Block, ControlResult, DEFAULT_LIMIT, Scalar, clamp, ensure_limits, ensure_time_step, lit,
};

/// Backward-difference derivative: `output = clamp((x - prev) / dt, min, max)`.
///
/// The previous input starts at zero, so the first step reports `x / dt`.
#[derive(Debug, Clone, PartialEq)]
pub struct Derivative<T> {
    prev_input: T,
    output: T,
    min: T,
    max: T,
}

impl<T: Scalar> Derivative<T> {
    /// Create a derivative with explicit output bounds.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `min > max`.
    pub fn new(min: T, max: T) -> ControlResult<Self> {
        let (min, max) = ensure_limits(min, max)?;
        Ok(Self {
            prev_input: T::zero(),
            output: T::zero(),
            min,
            max,
        })
    }

    /// Differentiate one sample.
    ///
    /// # Errors
    ///
    /// A zero (or negative, or non-finite) `dt` is a domain error; neither the
    /// output nor the remembered input changes in that case.
    pub fn step(&mut self, input: T, dt: T) -> ControlResult<T> {
        let dt = ensure_time_step(dt)?;
        self.output = clamp((input - self.prev_input) / dt, self.min, self.max);
        self.prev_input = input;
        Ok(self.output)
    }

    /// Override the remembered previous input.
    pub fn set_state(&mut self, prev_input: T) {
        self.prev_input = prev_input;
    }

    pub fn state(&self) -> T {
        self.prev_input
    }

    /// Replace the bounds. On error the previous bounds stay in effect.
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

impl<T: Scalar> Default for Derivative<T> {
    fn default() -> Self {
        let limit: T = lit(DEFAULT_LIMIT);
        Self {
            prev_input: T::zero(),
            output: T::zero(),
            min: -limit,
            max: limit,
        }
    }
}

impl<T: Scalar> Block for Derivative<T> {
    type Output = T;

    fn output(&self) -> T {
        self.output
    }

    fn reset(&mut self) {
        self.prev_input = T::zero();
        self.output = T::zero();
    }
}
