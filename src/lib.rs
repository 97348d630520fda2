//! Relief
//!
//! Depth-image-to-geometry conversion: turns pairs of aligned color and
//! depth frames into point-cloud and mesh attribute buffers, with morph
//! targets for animated multi-frame scenarios. Acquisition of frames and
//! rendering of the produced buffers live outside this workspace.

pub use relief_data as data;
pub use relief_geometry as geometry;
