//! Plane/mesh builder with depth-discontinuity-aware triangulation.
//!
//! One vertex per grid cell of a bounding box derived from the first
//! frame's aspect ratio, UVs for texture mapping, and a triangle list that
//! drops any triangle straddling a depth cliff instead of stretching a
//! surface across it.

use tracing::{debug, info};

use relief_data::{Sample, ScenarioSource};

use crate::buffer::GeometryBuffer;
use crate::error::GeometryError;
use crate::pipeline::{ensure_frames, frame_dims, sample_rgb};

/// Maximum |Δz| among a triangle's corners before it is suppressed.
pub const DEPTH_DISCONTINUITY_THRESHOLD: f32 = 0.2;

/// Depth scale applied to plane depth samples.
const PLANE_DEPTH_DIVISOR: f32 = 40.0;

/// An indexed plane mesh plus its z extent.
#[derive(Debug, Clone)]
pub struct PlaneGeometry {
    pub buffer: GeometryBuffer,
    pub min_z: f32,
    pub max_z: f32,
}

/// Build an indexed plane mesh from one (color, depth) pair.
///
/// Frame layout: 0 = color, 1 = depth. Positions are normalized to a
/// centered [-0.5, 0.5] square with y divided by the aspect ratio, UVs run
/// [0, 1] with v flipped, and padding cells (if the bounding box exceeds
/// the image) stay flat and black.
pub fn textured_plane(source: &ScenarioSource) -> Result<PlaneGeometry, GeometryError> {
    ensure_frames(source, 2)?;
    let (height, width) = frame_dims(source, 0)?;

    let aspect_ratio = width as f32 / height as f32;
    // bounding box derived from the first frame's aspect ratio
    let max_height = height;
    let max_width = (max_height as f32 * aspect_ratio).round() as usize;
    if max_width < 2 || max_height < 2 {
        return Err(GeometryError::DimensionMismatch(format!(
            "plane mesh needs at least a 2x2 grid, bounding box is {max_width}x{max_height}"
        )));
    }

    let height_offset = (max_height - height) / 2;
    let width_offset = max_width.saturating_sub(width) / 2;
    debug!(
        "Plane bounding box {}x{} (offsets {}, {})",
        max_width, max_height, width_offset, height_offset
    );

    let count = max_width * max_height;
    let mut positions = Vec::with_capacity(count * 3);
    let mut colors = Vec::with_capacity(count * 3);
    let mut uvs = Vec::with_capacity(count * 2);

    let mut min_z = f32::INFINITY;
    let mut max_z = f32::NEG_INFINITY;

    for i in 0..max_height {
        for j in 0..max_width {
            let u = j as f32 / (max_width - 1) as f32;
            let v = i as f32 / (max_height - 1) as f32;

            let outside = j < width_offset
                || j >= max_width - width_offset
                || i < height_offset
                || i >= max_height - height_offset;

            // v flipped to match texture orientation
            uvs.push(u);
            uvs.push(1.0 - v);

            if outside {
                positions.extend_from_slice(&[u - 0.5, -(v - 0.5) / aspect_ratio, 0.0]);
                colors.extend_from_slice(&[0.0, 0.0, 0.0]);
            } else {
                let i_shifted = i - height_offset;
                let j_shifted = j - width_offset;
                let flat = i_shifted * width + j_shifted;

                let z = source.value_at(
                    1,
                    i_shifted,
                    j_shifted,
                    flat * 4,
                    Sample::Depth { raw: false },
                )? / PLANE_DEPTH_DIVISOR;
                min_z = min_z.min(z);
                max_z = max_z.max(z);

                positions.extend_from_slice(&[u - 0.5, -(v - 0.5) / aspect_ratio, z]);

                let rgb = sample_rgb(source, 0, i_shifted, j_shifted, flat)?;
                colors.extend_from_slice(&[rgb[0] / 255.0, rgb[1] / 255.0, rgb[2] / 255.0]);
            }
        }
    }

    // Each quad contributes up to two triangles; either is dropped
    // independently when its corner depths spread past the threshold.
    let mut indices: Vec<u32> = Vec::new();
    for i in 0..max_height - 1 {
        for j in 0..max_width - 1 {
            let a = i * max_width + j;
            let b = a + 1;
            let c = (i + 1) * max_width + j;
            let d = c + 1;

            let za = positions[a * 3 + 2];
            let zb = positions[b * 3 + 2];
            let zc = positions[c * 3 + 2];
            let zd = positions[d * 3 + 2];

            let max_diff_1 = (za - zb).abs().max((za - zc).abs()).max((zb - zc).abs());
            let max_diff_2 = (zb - zc).abs().max((zb - zd).abs()).max((zc - zd).abs());

            if max_diff_1 < DEPTH_DISCONTINUITY_THRESHOLD {
                indices.extend_from_slice(&[a as u32, c as u32, b as u32]);
            }
            if max_diff_2 < DEPTH_DISCONTINUITY_THRESHOLD {
                indices.extend_from_slice(&[b as u32, c as u32, d as u32]);
            }
        }
    }

    let buffer = GeometryBuffer {
        positions,
        colors,
        uvs: Some(uvs),
        indices: Some(indices),
        morph_targets: Vec::new(),
    };

    info!(
        "Built textured plane: {} vertices, {} triangles, z range [{}, {}]",
        buffer.vertex_count(),
        buffer.triangle_count(),
        min_z,
        max_z
    );

    Ok(PlaneGeometry {
        buffer,
        min_z,
        max_z,
    })
}
