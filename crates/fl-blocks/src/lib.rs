//! Primitive numeric blocks for fixed-step control laws.
//!
//! Every block owns a small scalar state, advances it with an explicit
//! `step`, exposes the last result through [`Block::output`] and clears its
//! transient state with [`Block::reset`]. Bounds and gains are configuration:
//! they survive a reset, and an inconsistent bound pair is rejected with the
//! previous bounds left in effect.
//!
//! # Blocks
//!
//! - [`Saturation`]: clamp to `[min, max]`
//! - [`RateLimiter`]: limit the rate of change of the held state
//! - [`Integrator`]: forward-Euler accumulation with re-clamping anti-windup
//! - [`Derivative`]: backward difference, clamped
//! - [`LookupTable1D`]: piecewise-linear table with linear extrapolation
//! - [`TriggeredSubsystem`]: rising-edge sample and hold
//! - [`SineWave`], [`UniformNoise`], [`WhiteNoise`]: signal sources
//! - [`Pid`]: integrator + derivative + three gains
//!
//! All blocks are generic over [`fl_core::Scalar`] (`f32` or `f64`).

pub mod derivative;
pub mod integrator;
pub mod lookup;
pub mod pid;
pub mod rate_limiter;
pub mod saturation;
pub mod sources;
pub mod triggered;

pub use derivative::Derivative;
pub use integrator::Integrator;
pub use lookup::LookupTable1D;
pub use pid::{Pid, PidGains};
pub use rate_limiter::RateLimiter;
pub use saturation::Saturation;
pub use sources::{SineWave, UniformNoise, WhiteNoise};
pub use triggered::TriggeredSubsystem;

pub use fl_core::{Block, ControlError, ControlResult, Scalar, Shared};
