//! One-dimensional lookup table.

use fl_core::{Block, ControlError, ControlResult, Scalar};

/// Piecewise-linear table over `N` strictly increasing breakpoints.
///
/// Inside the table domain the bracketing segment is the one ending at the
/// first breakpoint strictly greater than the input. Outside the domain the
/// slope of the nearest boundary segment is extended linearly.
///
/// # Example
///
/// ```
/// use fl_blocks::{Block, LookupTable1D};
///
/// let mut table = LookupTable1D::new([1.0, 2.0, 3.0], [10.0, 20.0, 30.0]).unwrap();
/// assert_eq!(table.interpolate(2.5), 25.0);
/// assert_eq!(table.interpolate(4.0), 40.0);
/// assert_eq!(table.output(), 40.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LookupTable1D<T, const N: usize> {
    breakpoints: [T; N],
    values: [T; N],
    output: T,
}

impl<T: Scalar, const N: usize> LookupTable1D<T, N> {
    /// Build a table from matching breakpoint and value arrays.
    ///
    /// # Errors
    ///
    /// - Domain error if `N < 2` (no segment to interpolate on).
    /// - Configuration error if the breakpoints are not strictly increasing.
    pub fn new(breakpoints: [T; N], values: [T; N]) -> ControlResult<Self> {
        if N < 2 {
            return Err(ControlError::Domain {
                what: "lookup table needs at least two breakpoints",
            });
        }
        // `!(a < b)` also rejects NaN breakpoints.
        if breakpoints.windows(2).any(|w| !(w[0] < w[1])) {
            return Err(ControlError::Configuration {
                what: "lookup table breakpoints must be strictly increasing",
            });
        }
        Ok(Self {
            breakpoints,
            values,
            output: T::zero(),
        })
    }

    /// Evaluate the table at `x` without touching the stored output.
    pub fn evaluate(&self, x: T) -> T {
        let hi = self.segment(x);
        let lo = hi - 1;
        let (x0, x1) = (self.breakpoints[lo], self.breakpoints[hi]);
        let (y0, y1) = (self.values[lo], self.values[hi]);
        y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    }

    /// Interpolate (or extrapolate, outside the domain) and store the result.
    pub fn interpolate(&mut self, x: T) -> T {
        self.output = self.evaluate(x);
        self.output
    }

    /// Extend the boundary slope for `x` outside the domain; inside the domain
    /// this is the same as [`interpolate`](Self::interpolate).
    pub fn extrapolate(&mut self, x: T) -> T {
        self.interpolate(x)
    }

    pub fn breakpoints(&self) -> &[T; N] {
        &self.breakpoints
    }

    pub fn values(&self) -> &[T; N] {
        &self.values
    }

    /// Index of the upper breakpoint of the segment used for `x`, in `1..N`.
    fn segment(&self, x: T) -> usize {
        if x < self.breakpoints[0] {
            return 1;
        }
        if x > self.breakpoints[N - 1] {
            return N - 1;
        }
        // First breakpoint strictly greater than x. At the last breakpoint this
        // is N, which falls back to the final segment.
        let upper = self.breakpoints.partition_point(|b| *b <= x);
        upper.clamp(1, N - 1)
    }
}

impl<T: Scalar, const N: usize> Block for LookupTable1D<T, N> {
    type Output = T;

    fn output(&self) -> T {
        self.output
    }

    fn reset(&mut self) {
        self.output = T::zero();
    }
}
