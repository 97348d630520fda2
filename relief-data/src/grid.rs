//! Parsed numeric scenario frames.
//!
//! Scenario files serialize each frame as a nested JSON array: a 2D grid of
//! scalar depth values, or a 2D grid of RGB triples for color frames.

use serde::Deserialize;

use crate::error::DataError;

/// One parsed scenario frame.
///
/// Deserialization tries the RGB shape first; a scalar grid's rows contain
/// plain numbers and fall through to [`GridFrame::Scalar`].
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GridFrame {
    /// 2D grid of RGB triples (color frame).
    Rgb(Vec<Vec<[f32; 3]>>),
    /// 2D grid of scalar values (depth frame).
    Scalar(Vec<Vec<f32>>),
}

impl GridFrame {
    /// Parse a single frame from serialized scenario text.
    pub fn from_json(text: &str) -> Result<Self, DataError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Number of rows in the grid.
    pub fn rows(&self) -> usize {
        match self {
            GridFrame::Rgb(g) => g.len(),
            GridFrame::Scalar(g) => g.len(),
        }
    }

    /// Number of columns, taken from the first row.
    pub fn cols(&self) -> usize {
        match self {
            GridFrame::Rgb(g) => g.first().map_or(0, |row| row.len()),
            GridFrame::Scalar(g) => g.first().map_or(0, |row| row.len()),
        }
    }
}
