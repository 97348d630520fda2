//! Shared per-pixel machinery for the builder family.
//!
//! The builders differ only in which frames feed each layer, the z policy,
//! and whether indices or morph targets are produced; the planar mapping,
//! padding arithmetic, and per-layer loops live here once.

use relief_data::{DepthGrid, Sample, ScenarioSource};
use tracing::debug;

use crate::buffer::{COLOR_SIZE, POSITION_SIZE};
use crate::error::GeometryError;
use crate::noise::filtered_depth;
use crate::profile::{NormalizationProfile, pack_rgb};

/// How a layer derives its z coordinate.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ZPolicy {
    /// z fixed at 0.
    Flat,
    /// Depth read with default scaling, divided by a per-builder divisor.
    Linear { frame: usize, divisor: f32 },
    /// RGB channels of `frame` packed into one intensity over the
    /// packed-color profile.
    PackedColor { frame: usize },
    /// Raw depth run through the noise filter.
    Filtered { frame: usize },
}

/// One (positions, colors) layer of a point-cloud geometry.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LayerSpec {
    pub z: ZPolicy,
    pub color_frame: usize,
}

pub(crate) struct LayerBuffers {
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
}

#[derive(Clone, Copy)]
enum ResolvedZ<'a> {
    Flat,
    Linear { frame: usize, divisor: f32 },
    PackedColor { frame: usize },
    Filtered { frame: usize, grid: DepthGrid<'a> },
}

/// Build one layer over the full `height` x `width` grid.
///
/// The planar mapping divides both axes by the grid width; the renderer's
/// framing depends on this non-square convention.
pub(crate) fn grid_layer(
    source: &ScenarioSource,
    height: usize,
    width: usize,
    spec: LayerSpec,
) -> Result<LayerBuffers, GeometryError> {
    let count = width * height;
    let mut positions = vec![0.0f32; count * POSITION_SIZE];
    let mut colors = vec![0.0f32; count * COLOR_SIZE];

    let z_policy = match spec.z {
        ZPolicy::Flat => ResolvedZ::Flat,
        ZPolicy::Linear { frame, divisor } => ResolvedZ::Linear { frame, divisor },
        ZPolicy::PackedColor { frame } => ResolvedZ::PackedColor { frame },
        ZPolicy::Filtered { frame } => ResolvedZ::Filtered {
            frame,
            grid: source.depth_grid(frame)?,
        },
    };

    let half_aspect = (height as f32 / width as f32) / 2.0;
    let mut ptr = 0usize;
    for i in 0..height {
        for j in 0..width {
            let u = i as f32 / width as f32;
            let v = j as f32 / width as f32;

            positions[ptr * 3 + 1] = -u + half_aspect;
            positions[ptr * 3] = v - 0.5;
            positions[ptr * 3 + 2] = match z_policy {
                ResolvedZ::Flat => 0.0,
                ResolvedZ::Linear { frame, divisor } => {
                    source.value_at(frame, i, j, ptr * 4, Sample::Depth { raw: false })? / divisor
                }
                ResolvedZ::PackedColor { frame } => {
                    let rgb = sample_rgb(source, frame, i, j, ptr)?;
                    pack_rgb(rgb) / NormalizationProfile::PackedColor.scale()
                }
                ResolvedZ::Filtered { frame, ref grid } => {
                    let sample =
                        source.value_at(frame, i, j, ptr * 4, Sample::Depth { raw: true })?;
                    filtered_depth(sample, grid, i, j)
                }
            };

            let rgb = sample_rgb(source, spec.color_frame, i, j, ptr)?;
            colors[ptr * 3] = rgb[0] / 255.0;
            colors[ptr * 3 + 1] = rgb[1] / 255.0;
            colors[ptr * 3 + 2] = rgb[2] / 255.0;

            ptr += 1;
        }
    }

    Ok(LayerBuffers { positions, colors })
}

/// Bounding box and centering offsets for padded layers.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Padding {
    pub max_width: usize,
    pub max_height: usize,
    pub width_offset: usize,
    pub height_offset: usize,
}

impl Padding {
    pub fn center(max_width: usize, max_height: usize, width: usize, height: usize) -> Self {
        Self {
            max_width,
            max_height,
            width_offset: (max_width - width) / 2,
            height_offset: (max_height - height) / 2,
        }
    }
}

/// Build one padded gallery layer: the image is centered in the bounding
/// box, the border region stays flat and black.
///
/// The planar mapping divides both axes by the padded width while the y
/// centering term keeps the current image's aspect, and the right/bottom
/// padding bounds are exclusive one cell early; both quirks are preserved
/// from the reference output.
pub(crate) fn padded_grid_layer(
    source: &ScenarioSource,
    image_height: usize,
    image_width: usize,
    pad: Padding,
    depth_frame: usize,
    depth_divisor: f32,
    color_frame: usize,
) -> Result<LayerBuffers, GeometryError> {
    let count = pad.max_width * pad.max_height;
    let mut positions = vec![0.0f32; count * POSITION_SIZE];
    let mut colors = vec![0.0f32; count * COLOR_SIZE];

    debug!(
        "Padded layer: image {}x{} centered in {}x{} (offsets {}, {})",
        image_width, image_height, pad.max_width, pad.max_height, pad.width_offset, pad.height_offset
    );

    let half_aspect = (image_height as f32 / image_width as f32) / 2.0;
    let mut ptr = 0usize;
    for i in 0..pad.max_height {
        for j in 0..pad.max_width {
            let u = i as f32 / pad.max_width as f32;
            let v = j as f32 / pad.max_width as f32;

            positions[ptr * 3 + 1] = -u + half_aspect;
            positions[ptr * 3] = v - 0.5;

            let outside = j < pad.width_offset
                || j + 1 >= pad.max_width - pad.width_offset
                || i < pad.height_offset
                || i + 1 >= pad.max_height - pad.height_offset;

            if !outside {
                let i_shifted = i - pad.height_offset;
                let j_shifted = j - pad.width_offset;
                let flat = i_shifted * image_width + j_shifted;

                positions[ptr * 3 + 2] = source.value_at(
                    depth_frame,
                    i_shifted,
                    j_shifted,
                    flat * 4,
                    Sample::Depth { raw: false },
                )? / depth_divisor;

                let rgb = sample_rgb(source, color_frame, i_shifted, j_shifted, flat)?;
                colors[ptr * 3] = rgb[0] / 255.0;
                colors[ptr * 3 + 1] = rgb[1] / 255.0;
                colors[ptr * 3 + 2] = rgb[2] / 255.0;
            }

            ptr += 1;
        }
    }

    Ok(LayerBuffers { positions, colors })
}

/// Read the three color channels of one pixel.
pub(crate) fn sample_rgb(
    source: &ScenarioSource,
    frame: usize,
    row: usize,
    col: usize,
    ptr: usize,
) -> Result<[f32; 3], GeometryError> {
    Ok([
        source.value_at(frame, row, col, ptr * 4, Sample::Color { channel: 0 })?,
        source.value_at(frame, row, col, ptr * 4 + 1, Sample::Color { channel: 1 })?,
        source.value_at(frame, row, col, ptr * 4 + 2, Sample::Color { channel: 2 })?,
    ])
}

/// Fail fast on empty or too-short frame stacks.
pub(crate) fn ensure_frames(
    source: &ScenarioSource,
    required: usize,
) -> Result<(), GeometryError> {
    let count = source.frame_count();
    if count == 0 {
        return Err(GeometryError::EmptyInput("scenario has no frames".into()));
    }
    if count < required {
        return Err(GeometryError::EmptyInput(format!(
            "scenario has {count} frames, builder needs at least {required}"
        )));
    }
    Ok(())
}

/// Dimensions of one frame, rejecting degenerate grids.
pub(crate) fn frame_dims(
    source: &ScenarioSource,
    frame: usize,
) -> Result<(usize, usize), GeometryError> {
    let height = source.frame_height(frame)?;
    let width = source.frame_width(frame)?;
    if width == 0 || height == 0 {
        return Err(GeometryError::DimensionMismatch(format!(
            "frame {frame} has degenerate dimensions {width}x{height}"
        )));
    }
    Ok((height, width))
}
