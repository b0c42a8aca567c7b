//! Saturation block.

use fl_core::{Block, ControlResult, Scalar, clamp, ensure_limits};

/// Clamps its input to `[min, max]`.
///
/// # Example
///
/// ```
/// use fl_blocks::{Block, Saturation};
///
/// let mut sat = Saturation::new(-10.0, 10.0).unwrap();
/// assert_eq!(sat.step(12.5), 10.0);
/// assert_eq!(sat.output(), 10.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Saturation<T> {
    min: T,
    max: T,
    output: T,
}

impl<T: Scalar> Saturation<T> {
    /// Create a saturation with explicit bounds.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `min > max`.
    pub fn new(min: T, max: T) -> ControlResult<Self> {
        let (min, max) = ensure_limits(min, max)?;
        Ok(Self {
            min,
            max,
            output: T::zero(),
        })
    }

    /// A saturation that passes every finite value through.
    pub fn unbounded() -> Self {
        Self {
            min: T::neg_infinity(),
            max: T::infinity(),
            output: T::zero(),
        }
    }

    pub fn step(&mut self, input: T) -> T {
        self.output = clamp(input, self.min, self.max);
        self.output
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

impl<T: Scalar> Default for Saturation<T> {
    fn default() -> Self {
        Self::unbounded()
    }
}

impl<T: Scalar> Block for Saturation<T> {
    type Output = T;

    fn output(&self) -> T {
        self.output
    }

    fn reset(&mut self) {
        self.output = T::zero();
    }
}
