//! Relief Geometry Crate
//!
//! Converts aligned color + depth scenario frames into renderable attribute
//! buffers: per-vertex positions, colors, UVs, triangle indices, and morph
//! targets for animated scenarios. Consumes a
//! [`relief_data::ScenarioSource`]; the renderer owns the produced buffers.
//!
//! ## Modules
//!
//! - [`buffer`]: the flat attribute buffers handed to the renderer
//! - [`builders`]: the point-cloud, morph, gallery, and plane builders
//! - [`noise`]: edge-preserving depth noise filter
//! - [`profile`]: normalization profiles mapping raw samples into z-units

pub mod buffer;
pub mod builders;
pub mod error;
pub mod noise;
mod pipeline;
pub mod profile;

pub use buffer::{GeometryBuffer, MorphTarget};
pub use builders::{
    DEPTH_DISCONTINUITY_THRESHOLD, GalleryGeometry, PlaneGeometry, ReliefGeometry, depth_relief,
    filtered_depth_morph, image_gallery, packed_color_morph, textured_plane,
};
pub use error::GeometryError;
pub use noise::filtered_depth;
pub use profile::{NormalizationProfile, pack_rgb};
