//! Multi-image gallery builder.
//!
//! A gallery scenario interleaves (color, depth) frame pairs: even indices
//! are color images, odd indices their depth maps. Every pair becomes one
//! point-cloud layer padded to a shared bounding box so the renderer can
//! morph between images of different sizes over one topology.

use glam::Vec3;
use tracing::{debug, info};

use relief_data::ScenarioSource;

use crate::buffer::{GeometryBuffer, MorphTarget};
use crate::error::GeometryError;
use crate::pipeline::{Padding, ensure_frames, frame_dims, padded_grid_layer};
use crate::profile::NormalizationProfile;

/// Depth scale applied to gallery and plane depth samples.
const GALLERY_DEPTH_DIVISOR: f32 = 40.0;

/// A gallery point cloud plus per-pair centering info.
#[derive(Debug, Clone)]
pub struct GalleryGeometry {
    pub buffer: GeometryBuffer,
    /// One depth-center vector per (color, depth) pair, for external
    /// centering logic.
    pub center_points: Vec<Vec3>,
}

/// Build one base layer from pair 0 plus one morph target per remaining
/// pair, all padded to the maximum dimensions across every pair.
pub fn image_gallery(source: &ScenarioSource) -> Result<GalleryGeometry, GeometryError> {
    ensure_frames(source, 2)?;
    let count = source.frame_count();
    if count % 2 != 0 {
        return Err(GeometryError::DimensionMismatch(format!(
            "gallery scenario needs (color, depth) frame pairs, got {count} frames"
        )));
    }
    let pairs = count / 2;

    let mut max_height = 0usize;
    let mut max_width = 0usize;
    for k in 0..pairs {
        let (height, width) = frame_dims(source, 2 * k)?;
        max_height = max_height.max(height);
        max_width = max_width.max(width);
    }
    debug!(
        "Gallery bounding box {}x{} across {} pairs",
        max_width, max_height, pairs
    );

    let mut layers = Vec::with_capacity(pairs);
    let mut center_points = Vec::with_capacity(pairs);
    for k in 0..pairs {
        let (height, width) = frame_dims(source, 2 * k)?;

        center_points.push(Vec3::new(
            0.0,
            0.0,
            source.center_value(2 * k + 1)? / NormalizationProfile::Gallery.scale(),
        ));

        let pad = Padding::center(max_width, max_height, width, height);
        layers.push(padded_grid_layer(
            source,
            height,
            width,
            pad,
            2 * k + 1,
            GALLERY_DEPTH_DIVISOR,
            2 * k,
        )?);
    }

    let mut layers = layers.into_iter();
    let base = match layers.next() {
        Some(layer) => layer,
        None => return Err(GeometryError::EmptyInput("gallery has no pairs".into())),
    };
    let morph_targets: Vec<MorphTarget> = layers
        .map(|layer| MorphTarget {
            positions: layer.positions,
            colors: layer.colors,
        })
        .collect();

    let buffer = GeometryBuffer {
        positions: base.positions,
        colors: base.colors,
        uvs: None,
        indices: None,
        morph_targets,
    };

    info!(
        "Built image gallery: {} vertices, {} morph targets",
        buffer.vertex_count(),
        buffer.morph_targets.len()
    );

    Ok(GalleryGeometry {
        buffer,
        center_points,
    })
}
