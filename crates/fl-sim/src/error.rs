//! Error types for closed-loop runs.

use fl_core::ControlError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-finite plant state at t = {time} s")]
    NonFinite { time: f64 },

    #[error(transparent)]
    Control(#[from] ControlError),
}

pub type SimResult<T> = Result<T, SimError>;
