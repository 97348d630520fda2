//! Error types for the geometry builders.

use relief_data::DataError;
use thiserror::Error;

/// Errors produced while building geometry from a scenario.
///
/// All variants are precondition failures reported synchronously; a builder
/// either returns a fully populated buffer or fails without one.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// Zero frames (or too few) supplied to a builder.
    #[error("empty input: {0}")]
    EmptyInput(String),

    /// Frame dimensions the padding logic cannot reconcile.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Frame access failed in the underlying source.
    #[error(transparent)]
    Data(#[from] DataError),
}
