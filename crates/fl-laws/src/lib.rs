//! Multi-loop flight-control laws built from `fl-blocks` primitives.
//!
//! Each law is a struct that owns its sub-blocks by value, a set of gains and
//! one enable flag per loop. `step` evaluates the loops in a fixed order, each
//! loop's output becoming the next loop's reference. A disabled loop is
//! skipped entirely: its sub-blocks are not stepped, and the value forwarded
//! downstream is its input (the loop's *bypass*).
//!
//! - [`LateralControl`]: rudder loop + yaw-angle → roll-angle → roll-rate aileron cascade
//! - [`LongitudinalControl`]: speed loop + altitude → pitch-angle → pitch-rate elevator cascade
//!
//! Laws implement [`fl_core::Block`], so a telemetry thread can observe one
//! through [`fl_core::Shared`] while the control thread steps it.

pub mod lateral;
pub mod longitudinal;

pub use lateral::{LateralControl, LateralGains, LateralInputs, LateralLoops, LateralOutput};
pub use longitudinal::{
    LongitudinalControl, LongitudinalInputs, LongitudinalLoops, LongitudinalOutput,
};
