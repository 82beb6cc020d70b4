//! Error types for the weft simulator.
//!
//! All crates return `WeftResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for weft.
#[derive(Debug, Error)]
pub enum WeftError {
    /// Grid topology or geometry is malformed.
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// Per-step simulation parameter is out of valid range.
    #[error("Invalid simulation parameters: {0}")]
    InvalidParameters(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A simulation invariant was violated (e.g., non-finite positions).
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Convenience alias for `Result<T, WeftError>`.
pub type WeftResult<T> = Result<T, WeftError>;
