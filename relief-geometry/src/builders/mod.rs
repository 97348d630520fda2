//! The geometry builder family.
//!
//! All builders share the vertex layout and planar mapping from the
//! pipeline module; they differ in which frames feed each layer, the z
//! policy, and whether indices or morph targets are produced. Builders are
//! pure: the same source and parameters always yield identical buffers.

mod gallery;
mod plane;
mod point_cloud;

pub use gallery::{GalleryGeometry, image_gallery};
pub use plane::{DEPTH_DISCONTINUITY_THRESHOLD, PlaneGeometry, textured_plane};
pub use point_cloud::{ReliefGeometry, depth_relief, filtered_depth_morph, packed_color_morph};
