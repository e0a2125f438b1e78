//! Compute primitives for motif analysis
//!
//! This module holds the error taxonomy shared by every computation in the
//! crate, plus the window-level string operations used by the counters.

pub mod string_ops;

/// Compute operation result type
pub type ComputeResult<T> = Result<T, ComputeError>;

/// Error types for compute operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComputeError {
    /// Bad caller input, reported before any worker starts.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A worker failed or the pool could not be used. Partial results are discarded.
    #[error("Computation failed: {0}")]
    ComputationFailed(String),
}

impl ComputeError {
    /// True when the error was caused by the caller's input.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ComputeError::InvalidArgument(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ComputeError::InvalidArgument("motif size must be positive".to_string());
        assert_eq!(err.to_string(), "Invalid argument: motif size must be positive");
        assert!(err.is_invalid_argument());

        let err = ComputeError::ComputationFailed("worker 3 panicked".to_string());
        assert!(err.to_string().starts_with("Computation failed"));
        assert!(!err.is_invalid_argument());
    }
}
