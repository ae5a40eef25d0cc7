//! Application error types.
//!
//! All errors use `thiserror` for automatic Error trait derivation. Only
//! structural input problems are errors; a refused request is a normal
//! outcome and travels as a [`Rejection`](crate::banker::Rejection) inside
//! the result instead.

use thiserror::Error;

use super::ids::ProcessId;

/// Application result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for the banker core.
#[derive(Error, Debug)]
pub enum Error {
    /// Two vectors that must be parallel have different lengths.
    #[error("dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    /// A process holds more of a resource than its maximum claim.
    #[error("process {process} holds {allocated} of resource {resource} but claims at most {max}")]
    AllocationExceedsMax {
        process: ProcessId,
        resource: usize,
        allocated: u64,
        max: u64,
    },

    /// Request targets a process index outside the process set.
    #[error("unknown process index {index} (system has {count} processes)")]
    UnknownProcess { index: usize, count: usize },

    /// Input is larger than the configured search limits.
    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    /// Malformed input (CLI arguments, config values).
    #[error("validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

// Convenience constructors
impl Error {
    pub fn dimension_mismatch(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }

    pub fn limit_exceeded(msg: impl Into<String>) -> Self {
        Self::LimitExceeded(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
