//! Error types for scenario data access.

use thiserror::Error;

/// Errors that can occur while accessing scenario frame data.
#[derive(Debug, Error)]
pub enum DataError {
    /// A frame, sample, or flat buffer index fell outside the source bounds.
    #[error("index out of range: {0}")]
    IndexOutOfRange(String),

    /// A frame has dimensions the caller cannot work with.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// A serialized scenario frame could not be parsed.
    #[error("scenario parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
