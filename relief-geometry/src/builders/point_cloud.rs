//! Point-cloud builders: one vertex per grid cell, no index buffer.
//!
//! Each builder produces a base (position, color) layer plus an ordered
//! morph stack the renderer interpolates through without recomputing
//! geometry.

use glam::Vec3;
use tracing::info;

use relief_data::ScenarioSource;

use crate::buffer::{GeometryBuffer, MorphTarget, POSITION_SIZE};
use crate::error::GeometryError;
use crate::pipeline::{LayerSpec, ZPolicy, ensure_frames, frame_dims, grid_layer};
use crate::profile::NormalizationProfile;

/// Frame index where a packed-color scenario's step frames start
/// (0 = base color, 1 = destination).
const PACKED_STEP_OFFSET: usize = 2;

/// Frame index where a filtered scenario's step frames start
/// (0/1 = base color+depth, 2/3 = destination color+depth).
const FILTERED_STEP_OFFSET: usize = 4;

/// A point-cloud relief plus the min/max z and centering vectors the
/// renderer's parallax framing consumes.
#[derive(Debug, Clone)]
pub struct ReliefGeometry {
    pub buffer: GeometryBuffer,
    pub min_z: f32,
    pub max_z: f32,
    /// One centering vector per rendered variant of the image.
    pub center_points: Vec<Vec3>,
}

/// Depth-relief point cloud: base z from the depth frame, plus a flat
/// morph target and a packed-color-intensity morph target.
///
/// Frame layout: 0 = color, 1 = depth.
pub fn depth_relief(source: &ScenarioSource) -> Result<ReliefGeometry, GeometryError> {
    ensure_frames(source, 2)?;
    let (height, width) = frame_dims(source, 0)?;

    let base = grid_layer(
        source,
        height,
        width,
        LayerSpec {
            z: ZPolicy::Linear {
                frame: 1,
                divisor: 30.0,
            },
            color_frame: 0,
        },
    )?;
    let flat = grid_layer(
        source,
        height,
        width,
        LayerSpec {
            z: ZPolicy::Flat,
            color_frame: 0,
        },
    )?;
    let packed = grid_layer(
        source,
        height,
        width,
        LayerSpec {
            z: ZPolicy::PackedColor { frame: 0 },
            color_frame: 0,
        },
    )?;

    // seeded at the renderer's parallax defaults
    let mut min_z = 3.0f32;
    let mut max_z = -3.0f32;
    for vertex in base.positions.chunks_exact(POSITION_SIZE) {
        min_z = min_z.min(vertex[2]);
        max_z = max_z.max(vertex[2]);
    }

    let center_depth = source.center_value(1)?;
    let center = Vec3::new(
        0.0,
        0.0,
        center_depth / NormalizationProfile::Grayscale.scale(),
    );
    // three rendered variants of the image share one center
    let center_points = vec![center; 3];

    let buffer = GeometryBuffer {
        positions: base.positions,
        colors: base.colors.clone(),
        uvs: None,
        indices: None,
        morph_targets: vec![
            MorphTarget {
                positions: flat.positions,
                colors: base.colors.clone(),
            },
            MorphTarget {
                positions: packed.positions,
                colors: base.colors,
            },
        ],
    };

    info!(
        "Built depth relief: {} vertices, {} morph targets, z range [{}, {}]",
        buffer.vertex_count(),
        buffer.morph_targets.len(),
        min_z,
        max_z
    );

    Ok(ReliefGeometry {
        buffer,
        min_z,
        max_z,
        center_points,
    })
}

/// Point cloud whose z is each frame's packed RGB intensity over the
/// packed-color profile, morphing through `steps` intermediate frames to a
/// destination image.
///
/// Frame layout: 0 = base color, 1 = destination color, 2.. = step colors.
pub fn packed_color_morph(
    source: &ScenarioSource,
    steps: usize,
) -> Result<GeometryBuffer, GeometryError> {
    ensure_frames(source, PACKED_STEP_OFFSET + steps)?;
    let (height, width) = frame_dims(source, 0)?;

    let base = grid_layer(
        source,
        height,
        width,
        LayerSpec {
            z: ZPolicy::PackedColor { frame: 0 },
            color_frame: 0,
        },
    )?;

    let mut morph_targets = Vec::with_capacity(steps + 1);
    for k in 0..steps {
        let frame = PACKED_STEP_OFFSET + k;
        let layer = grid_layer(
            source,
            height,
            width,
            LayerSpec {
                z: ZPolicy::PackedColor { frame },
                color_frame: frame,
            },
        )?;
        morph_targets.push(MorphTarget {
            positions: layer.positions,
            colors: layer.colors,
        });
    }

    // destination image lands after the steps
    let dest = grid_layer(
        source,
        height,
        width,
        LayerSpec {
            z: ZPolicy::PackedColor { frame: 1 },
            color_frame: 1,
        },
    )?;
    morph_targets.push(MorphTarget {
        positions: dest.positions,
        colors: dest.colors,
    });

    let buffer = GeometryBuffer {
        positions: base.positions,
        colors: base.colors,
        uvs: None,
        indices: None,
        morph_targets,
    };

    info!(
        "Built packed-color morph: {} vertices, {} morph targets",
        buffer.vertex_count(),
        buffer.morph_targets.len()
    );

    Ok(buffer)
}

/// Noise-filtered depth point cloud morphing through `steps` intermediate
/// (color, depth) states to a destination pair.
///
/// Frame layout: 0 = base color, 1 = base depth, 2 = destination color,
/// 3 = destination depth, `4..4+steps` = step colors,
/// `4+steps..4+2*steps` = step depths. Depth samples are read raw and run
/// through the noise filter.
pub fn filtered_depth_morph(
    source: &ScenarioSource,
    steps: usize,
) -> Result<GeometryBuffer, GeometryError> {
    ensure_frames(source, FILTERED_STEP_OFFSET + 2 * steps)?;
    let (height, width) = frame_dims(source, 0)?;

    let base = grid_layer(
        source,
        height,
        width,
        LayerSpec {
            z: ZPolicy::Filtered { frame: 1 },
            color_frame: 0,
        },
    )?;

    let mut morph_targets = Vec::with_capacity(steps + 1);
    for k in 0..steps {
        let layer = grid_layer(
            source,
            height,
            width,
            LayerSpec {
                z: ZPolicy::Filtered {
                    frame: FILTERED_STEP_OFFSET + steps + k,
                },
                color_frame: FILTERED_STEP_OFFSET + k,
            },
        )?;
        morph_targets.push(MorphTarget {
            positions: layer.positions,
            colors: layer.colors,
        });
    }

    let dest = grid_layer(
        source,
        height,
        width,
        LayerSpec {
            z: ZPolicy::Filtered { frame: 3 },
            color_frame: 2,
        },
    )?;
    morph_targets.push(MorphTarget {
        positions: dest.positions,
        colors: dest.colors,
    });

    let buffer = GeometryBuffer {
        positions: base.positions,
        colors: base.colors,
        uvs: None,
        indices: None,
        morph_targets,
    };

    info!(
        "Built filtered depth morph: {} vertices, {} morph targets",
        buffer.vertex_count(),
        buffer.morph_targets.len()
    );

    Ok(buffer)
}
