use std::fmt::{Debug, Display};

use num_traits::Float;

use crate::error::{ControlError, ControlResult};

/// Numeric type a block can be instantiated over.
///
/// Blanket-implemented for every ordered floating-point type (`f32`, `f64`).
pub trait Scalar: Float + Debug + Display + Send + Sync + 'static {}

impl<T> Scalar for T where T: Float + Debug + Display + Send + Sync + 'static {}

/// Default symmetric bound of integrators and derivatives.
pub const DEFAULT_LIMIT: f64 = 10_000.0;

/// Convert an `f64` constant into the block's numeric type.
///
/// Every `Scalar` can represent an `f64` (possibly with rounding), so this never fails.
pub fn lit<T: Scalar>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}

/// Validate a fixed integration step.
///
/// `dt` must be finite and strictly positive.
pub fn ensure_time_step<T: Scalar>(dt: T) -> ControlResult<T> {
    if !dt.is_finite() {
        return Err(ControlError::Domain {
            what: "time step must be finite",
        });
    }
    if dt <= T::zero() {
        return Err(ControlError::Domain {
            what: "time step must be positive",
        });
    }
    Ok(dt)
}

/// Validate a `(min, max)` bound pair.
pub fn ensure_limits<T: Scalar>(min: T, max: T) -> ControlResult<(T, T)> {
    if min.is_nan() || max.is_nan() {
        return Err(ControlError::Configuration {
            what: "limits must not be NaN",
        });
    }
    if min > max {
        return Err(ControlError::Configuration {
            what: "min limit must not be greater than max limit",
        });
    }
    Ok((min, max))
}

/// Clamp `value` into `[min, max]`.
///
/// Callers guarantee `min <= max` through [`ensure_limits`].
pub fn clamp<T: Scalar>(value: T, min: T, max: T) -> T {
    if value > max {
        max
    } else if value < min {
        min
    } else {
        value
    }
}
