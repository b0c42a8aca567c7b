//! Error types for block and control-law operations.

use thiserror::Error;

/// Result type for block and control-law operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors raised by blocks and cascades.
///
/// Errors are synchronous and local to the call that violated an invariant.
/// A call that returns an error leaves the receiver exactly as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ControlError {
    /// Inconsistent bounds or parameters were supplied to a constructor or setter.
    #[error("Configuration error: {what}")]
    Configuration { what: &'static str },

    /// An operation was evaluated outside its mathematical domain
    /// (zero time step, too few breakpoints, ...).
    #[error("Domain error: {what}")]
    Domain { what: &'static str },
}

impl ControlError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }

    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_reason() {
        let err = ControlError::Configuration {
            what: "min must not exceed max",
        };
        assert_eq!(
            err.to_string(),
            "Configuration error: min must not exceed max"
        );
        assert!(err.is_configuration());
        assert!(!err.is_domain());
    }
}
