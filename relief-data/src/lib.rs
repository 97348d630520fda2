//! Relief Data Crate
//!
//! Scenario frame access for depth-image geometry generation. A scenario is
//! a stack of 2D frames (decoded raster images, or numeric grids parsed
//! from serialized scenario files) exposed through one bounds-checked
//! accessor so the geometry builders never branch on the physical encoding.

pub mod error;
pub mod grid;
pub mod source;

pub use error::DataError;
pub use grid::GridFrame;
pub use source::{DEFAULT_GRID_SCALE, DepthGrid, Neighborhood, Sample, ScenarioSource};
