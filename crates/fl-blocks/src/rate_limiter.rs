//! Rate limiter block.
//!
//! The limiter bounds how fast its held state may move toward the input, it
//! does not clamp the input itself. Per step, with `rate = x - state`:
//!
//! - `rate > rising * dt`  → `state += rising * dt`
//! - `rate < falling * dt` → `state += falling * dt`
//! - otherwise             → `state = x`
//!
//! `falling` is the signed lower rate bound, normally negative.

use fl_core::{Block, ControlError, ControlResult, Scalar, ensure_time_step};

#[derive(Debug, Clone, PartialEq)]
pub struct RateLimiter<T> {
    rising: T,
    falling: T,
    state: T,
}

impl<T: Scalar> RateLimiter<T> {
    /// Create a rate limiter with zero initial state.
    ///
    /// # Arguments
    ///
    /// * `rising` - Maximum rate of increase (units per second)
    /// * `falling` - Minimum (signed) rate, i.e. maximum rate of decrease when negative
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `falling > rising`.
    pub fn new(rising: T, falling: T) -> ControlResult<Self> {
        check_rates(rising, falling)?;
        Ok(Self {
            rising,
            falling,
            state: T::zero(),
        })
    }

    /// Move the state toward `input` by at most the configured rate.
    ///
    /// # Errors
    ///
    /// Returns a domain error (state untouched) if `dt` is not finite and positive.
    pub fn step(&mut self, input: T, dt: T) -> ControlResult<T> {
        let dt = ensure_time_step(dt)?;
        let rate = input - self.state;
        if rate > self.rising * dt {
            self.state = self.state + self.rising * dt;
        } else if rate < self.falling * dt {
            self.state = self.state + self.falling * dt;
        } else {
            self.state = input;
        }
        Ok(self.state)
    }

    pub fn set_state(&mut self, state: T) {
        self.state = state;
    }

    /// Replace the rate bounds. On error the previous bounds stay in effect.
    pub fn set_limits(&mut self, rising: T, falling: T) -> ControlResult<()> {
        check_rates(rising, falling)?;
        self.rising = rising;
        self.falling = falling;
        Ok(())
    }

    /// `(rising, falling)`
    pub fn limits(&self) -> (T, T) {
        (self.rising, self.falling)
    }
}

fn check_rates<T: Scalar>(rising: T, falling: T) -> ControlResult<()> {
    if rising.is_nan() || falling.is_nan() {
        return Err(ControlError::Configuration {
            what: "rate limits must not be NaN",
        });
    }
    if falling > rising {
        return Err(ControlError::Configuration {
            what: "falling rate limit must not be greater than rising rate limit",
        });
    }
    Ok(())
}

impl<T: Scalar> Block for RateLimiter<T> {
    type Output = T;

    fn output(&self) -> T {
        self.state
    }

    fn reset(&mut self) {
        self.state = T::zero();
    }
}
