//! Pipeline error model.

use std::time::Duration;

use thiserror::Error;

/// Why a single attempt failed.
///
/// Both kinds are retried identically and both count toward the retry budget.
/// Neither ever reaches the caller of [`crate::Pipeline::execute`]; they are only
/// visible to observers and in [`crate::Execution::last_error`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    /// The wrapped operation returned an error (or panicked).
    #[error("operation failed: {0}")]
    OperationFailure(String),

    /// The attempt did not complete before its deadline.
    #[error("attempt timed out after {}ms", after.as_millis())]
    TimedOut { after: Duration },
}

impl PolicyError {
    pub fn operation(msg: impl Into<String>) -> Self {
        Self::OperationFailure(msg.into())
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, PolicyError::TimedOut { .. })
    }
}

/// Errors raised while building a pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResilienceError {
    #[error("invalid pipeline configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timed_out_reports_deadline() {
        let err = PolicyError::TimedOut {
            after: Duration::from_millis(100),
        };
        assert_eq!(err.to_string(), "attempt timed out after 100ms");
        assert!(err.is_timeout());
    }

    #[test]
    fn operation_failure_is_not_timeout() {
        let err = PolicyError::operation("service unavailable");
        assert_eq!(err.to_string(), "operation failed: service unavailable");
        assert!(!err.is_timeout());
    }
}
