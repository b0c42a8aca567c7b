//! fl-core: shared foundation for the flightlaw blocks and control laws.
//!
//! Contains:
//! - numeric (Scalar trait, literals, time step and limit checks)
//! - error (configuration and domain errors)
//! - block (the `Block` contract and the per-instance `Shared` lock)

pub mod block;
pub mod error;
pub mod numeric;

pub use block::{Block, Shared};
pub use error::{ControlError, ControlResult};
pub use numeric::*;
