//! Uniform accessor over a stack of scenario frames.
//!
//! A scenario arrives either as decoded raster images (RGBA, depth encoded
//! redundantly across the channels) or as numeric grids parsed from
//! serialized scenario files. [`ScenarioSource`] hides the encoding behind
//! one lookup interface so the geometry builders need no per-call-site
//! branching.

use image::RgbaImage;
use tracing::debug;

use crate::error::DataError;
use crate::grid::GridFrame;

/// Default divisor applied to scalar grid depth values so both encodings
/// land in the same 0-255-ish numeric range. Callers that need the raw
/// value bypass it via [`Sample::Depth`] with `raw = true`.
pub const DEFAULT_GRID_SCALE: f32 = 330.0;

/// What to read at a sample position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    /// A color channel (0 = red, 1 = green, 2 = blue).
    Color { channel: usize },
    /// A depth value; `raw` bypasses [`DEFAULT_GRID_SCALE`].
    Depth { raw: bool },
}

/// A stack of 2D frames behind one bounds-checked lookup interface.
#[derive(Debug, Clone)]
pub enum ScenarioSource {
    /// Decoded RGBA raster frames.
    Raster(Vec<RgbaImage>),
    /// Parsed numeric grid frames.
    Grids(Vec<GridFrame>),
}

impl ScenarioSource {
    /// Wrap already-decoded raster frames.
    pub fn from_images(frames: Vec<RgbaImage>) -> Self {
        Self::Raster(frames)
    }

    /// Wrap already-parsed grid frames.
    pub fn from_grids(frames: Vec<GridFrame>) -> Self {
        Self::Grids(frames)
    }

    /// Parse a scenario from serialized frame texts.
    pub fn from_json(frames: &[&str]) -> Result<Self, DataError> {
        let parsed = frames
            .iter()
            .map(|text| GridFrame::from_json(text))
            .collect::<Result<Vec<_>, _>>()?;
        debug!("Parsed {} scenario frames from JSON", parsed.len());
        Ok(Self::Grids(parsed))
    }

    /// Number of frames in the scenario.
    pub fn frame_count(&self) -> usize {
        match self {
            ScenarioSource::Raster(frames) => frames.len(),
            ScenarioSource::Grids(frames) => frames.len(),
        }
    }

    fn check_frame(&self, frame: usize) -> Result<(), DataError> {
        let count = self.frame_count();
        if frame >= count {
            return Err(DataError::IndexOutOfRange(format!(
                "frame {frame} out of range (source has {count} frames)"
            )));
        }
        Ok(())
    }

    /// Height of one frame's grid.
    pub fn frame_height(&self, frame: usize) -> Result<usize, DataError> {
        self.check_frame(frame)?;
        match self {
            ScenarioSource::Raster(frames) => Ok(frames[frame].height() as usize),
            ScenarioSource::Grids(frames) => Ok(frames[frame].rows()),
        }
    }

    /// Width of one frame's grid.
    pub fn frame_width(&self, frame: usize) -> Result<usize, DataError> {
        self.check_frame(frame)?;
        match self {
            ScenarioSource::Raster(frames) => Ok(frames[frame].width() as usize),
            ScenarioSource::Grids(frames) => {
                let cols = frames[frame].cols();
                if frames[frame].rows() > 0 && cols == 0 {
                    return Err(DataError::DimensionMismatch(format!(
                        "grid frame {frame} has rows but no columns"
                    )));
                }
                Ok(cols)
            }
        }
    }

    /// Value at the frame's center.
    ///
    /// Raster frames use the sample at flat offset `width * height * 2`, an
    /// approximation of the middle sample; grid frames use the true
    /// `(rows/2, cols/2)` cell. RGB grids yield channel 0 of the center
    /// triple. No default scaling is applied.
    pub fn center_value(&self, frame: usize) -> Result<f32, DataError> {
        self.check_frame(frame)?;
        match self {
            ScenarioSource::Raster(frames) => {
                let img = &frames[frame];
                let index = img.width() as usize * img.height() as usize * 2;
                let data = img.as_raw();
                data.get(index).map(|&v| v as f32).ok_or_else(|| {
                    DataError::IndexOutOfRange(format!(
                        "center offset {index} out of range for frame {frame} ({} bytes)",
                        data.len()
                    ))
                })
            }
            ScenarioSource::Grids(frames) => {
                let grid = &frames[frame];
                let (rows, cols) = (grid.rows(), grid.cols());
                if rows == 0 || cols == 0 {
                    return Err(DataError::DimensionMismatch(format!(
                        "grid frame {frame} is empty"
                    )));
                }
                Ok(match grid {
                    GridFrame::Scalar(g) => g[rows / 2][cols / 2],
                    GridFrame::Rgb(g) => g[rows / 2][cols / 2][0],
                })
            }
        }
    }

    /// Read one value.
    ///
    /// Raster frames are addressed by the precomputed `flat_index` into the
    /// RGBA byte buffer (the caller supplies `4 * (row * width + col)` plus
    /// the channel offset); grid frames are addressed by `(row, col)` and
    /// the sample kind. Depth reads from scalar grids are divided by
    /// [`DEFAULT_GRID_SCALE`] unless `raw` is requested.
    pub fn value_at(
        &self,
        frame: usize,
        row: usize,
        col: usize,
        flat_index: usize,
        sample: Sample,
    ) -> Result<f32, DataError> {
        self.check_frame(frame)?;
        match self {
            ScenarioSource::Raster(frames) => {
                let data = frames[frame].as_raw();
                data.get(flat_index).map(|&v| v as f32).ok_or_else(|| {
                    DataError::IndexOutOfRange(format!(
                        "flat index {flat_index} out of range for frame {frame} ({} bytes)",
                        data.len()
                    ))
                })
            }
            ScenarioSource::Grids(frames) => match (&frames[frame], sample) {
                (GridFrame::Rgb(g), Sample::Color { channel }) => g
                    .get(row)
                    .and_then(|r| r.get(col))
                    .and_then(|px| px.get(channel))
                    .copied()
                    .ok_or_else(|| sample_out_of_range(frame, row, col)),
                (GridFrame::Scalar(g), Sample::Depth { raw }) => {
                    let value = g
                        .get(row)
                        .and_then(|r| r.get(col))
                        .copied()
                        .ok_or_else(|| sample_out_of_range(frame, row, col))?;
                    let scale = if raw { 1.0 } else { DEFAULT_GRID_SCALE };
                    Ok(value / scale)
                }
                (GridFrame::Scalar(_), Sample::Color { .. }) => {
                    Err(DataError::IndexOutOfRange(format!(
                        "frame {frame} is a scalar grid, cannot read a color channel"
                    )))
                }
                (GridFrame::Rgb(_), Sample::Depth { .. }) => {
                    Err(DataError::IndexOutOfRange(format!(
                        "frame {frame} is an RGB grid, cannot read a scalar depth"
                    )))
                }
            },
        }
    }

    /// Borrow one frame's raw samples for neighborhood reads.
    ///
    /// The returned view keeps each encoding's native addressing so the
    /// noise filter reads the same neighbor samples the renderer was tuned
    /// against.
    pub fn depth_grid(&self, frame: usize) -> Result<DepthGrid<'_>, DataError> {
        self.check_frame(frame)?;
        match self {
            ScenarioSource::Raster(frames) => {
                let img = &frames[frame];
                Ok(DepthGrid::Raster {
                    data: img.as_raw(),
                    width: img.width() as usize,
                    height: img.height() as usize,
                })
            }
            ScenarioSource::Grids(frames) => match &frames[frame] {
                GridFrame::Scalar(g) => Ok(DepthGrid::Scalar { rows: g }),
                GridFrame::Rgb(_) => Err(DataError::DimensionMismatch(format!(
                    "frame {frame} is an RGB grid, not a depth grid"
                ))),
            },
        }
    }
}

fn sample_out_of_range(frame: usize, row: usize, col: usize) -> DataError {
    DataError::IndexOutOfRange(format!(
        "sample ({row}, {col}) out of range for frame {frame}"
    ))
}

/// Raw per-frame depth samples with encoding-specific neighbor addressing.
#[derive(Debug, Clone, Copy)]
pub enum DepthGrid<'a> {
    /// Flat RGBA bytes, neighbor stride 4.
    Raster {
        data: &'a [u8],
        width: usize,
        height: usize,
    },
    /// Nested scalar rows.
    Scalar { rows: &'a [Vec<f32>] },
}

/// 4-neighborhood of one depth sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighborhood {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl DepthGrid<'_> {
    /// Whether these samples come from a raster frame.
    pub fn is_raster(&self) -> bool {
        matches!(self, DepthGrid::Raster { .. })
    }

    /// 4-neighborhood of `(row, col)`, reusing `center` where a neighbor is
    /// missing at the grid edge.
    ///
    /// Raster mode keeps the asymmetric top/bottom bounds of the reference
    /// data layout (`ptr > width`, `ptr + width < width * height - 1`).
    pub fn neighborhood(&self, row: usize, col: usize, center: f32) -> Neighborhood {
        let mut n = Neighborhood {
            left: center,
            right: center,
            top: center,
            bottom: center,
        };
        match *self {
            DepthGrid::Raster {
                data,
                width,
                height,
            } => {
                let ptr = row * width + col;
                if col > 0 {
                    if let Some(&v) = data.get(ptr * 4 - 4) {
                        n.left = v as f32;
                    }
                }
                if col + 1 < width {
                    if let Some(&v) = data.get(ptr * 4 + 4) {
                        n.right = v as f32;
                    }
                }
                if ptr > width {
                    if let Some(&v) = data.get(4 * (ptr - width)) {
                        n.top = v as f32;
                    }
                }
                if ptr + width < (width * height).saturating_sub(1) {
                    if let Some(&v) = data.get(4 * (ptr + width)) {
                        n.bottom = v as f32;
                    }
                }
            }
            DepthGrid::Scalar { rows } => {
                let height = rows.len();
                let width = rows.first().map_or(0, |r| r.len());
                if col > 0 {
                    if let Some(&v) = rows.get(row).and_then(|r| r.get(col - 1)) {
                        n.left = v;
                    }
                }
                if col + 1 < width {
                    if let Some(&v) = rows.get(row).and_then(|r| r.get(col + 1)) {
                        n.right = v;
                    }
                }
                if row > 0 {
                    if let Some(&v) = rows.get(row - 1).and_then(|r| r.get(col)) {
                        n.top = v;
                    }
                }
                if row + 1 < height {
                    if let Some(&v) = rows.get(row + 1).and_then(|r| r.get(col)) {
                        n.bottom = v;
                    }
                }
            }
        }
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    fn raster_source(width: u32, height: u32, pixels: &[[u8; 4]]) -> ScenarioSource {
        let raw: Vec<u8> = pixels.iter().flatten().copied().collect();
        let img = RgbaImage::from_raw(width, height, raw).unwrap();
        ScenarioSource::from_images(vec![img])
    }

    #[test]
    fn test_raster_dimensions_and_count() {
        let source = raster_source(2, 1, &[[1, 2, 3, 255], [4, 5, 6, 255]]);
        assert_eq!(source.frame_count(), 1);
        assert_eq!(source.frame_width(0).unwrap(), 2);
        assert_eq!(source.frame_height(0).unwrap(), 1);
    }

    #[test]
    fn test_raster_flat_index_lookup() {
        let source = raster_source(2, 1, &[[10, 20, 30, 255], [40, 50, 60, 255]]);
        // flat index addresses the RGBA byte buffer directly
        let v = source
            .value_at(0, 0, 1, 4, Sample::Color { channel: 0 })
            .unwrap();
        assert_eq!(v, 40.0);
        let v = source
            .value_at(0, 0, 1, 5, Sample::Color { channel: 1 })
            .unwrap();
        assert_eq!(v, 50.0);
        // depth reads share the same flat addressing on raster frames
        let v = source.value_at(0, 0, 0, 0, Sample::Depth { raw: false }).unwrap();
        assert_eq!(v, 10.0);
    }

    #[test]
    fn test_raster_out_of_range_is_error() {
        let source = raster_source(1, 1, &[[1, 2, 3, 255]]);
        assert!(matches!(
            source.value_at(0, 0, 0, 4, Sample::Color { channel: 0 }),
            Err(DataError::IndexOutOfRange(_))
        ));
        assert!(matches!(
            source.value_at(1, 0, 0, 0, Sample::Color { channel: 0 }),
            Err(DataError::IndexOutOfRange(_))
        ));
        assert!(matches!(
            source.frame_width(3),
            Err(DataError::IndexOutOfRange(_))
        ));
    }

    #[test]
    fn test_grid_depth_default_scale() {
        let source = ScenarioSource::from_json(&["[[330, 660], [0, 33]]"]).unwrap();
        let scaled = source.value_at(0, 0, 0, 0, Sample::Depth { raw: false }).unwrap();
        assert_eq!(scaled, 1.0);
        let raw = source.value_at(0, 0, 0, 0, Sample::Depth { raw: true }).unwrap();
        assert_eq!(raw, 330.0);
        let scaled = source.value_at(0, 1, 1, 0, Sample::Depth { raw: false }).unwrap();
        assert!((scaled - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_grid_rgb_channel_lookup() {
        let source =
            ScenarioSource::from_json(&["[[[255, 128, 64], [1, 2, 3]]]"]).unwrap();
        assert_eq!(
            source.value_at(0, 0, 1, 0, Sample::Color { channel: 2 }).unwrap(),
            3.0
        );
        // scalar depth read from an RGB grid is a caller bug
        assert!(matches!(
            source.value_at(0, 0, 0, 0, Sample::Depth { raw: false }),
            Err(DataError::IndexOutOfRange(_))
        ));
    }

    #[test]
    fn test_grid_center_value_is_unscaled() {
        let source = ScenarioSource::from_json(&["[[1, 2, 3], [4, 5, 6], [7, 8, 9]]"]).unwrap();
        assert_eq!(source.center_value(0).unwrap(), 5.0);
    }

    #[test]
    fn test_raster_center_value_offset() {
        // 2x2 RGBA frame: center offset is width*height*2 = 8, the red
        // channel of the third pixel
        let source = raster_source(
            2,
            2,
            &[[0, 0, 0, 0], [1, 1, 1, 1], [7, 2, 2, 2], [3, 3, 3, 3]],
        );
        assert_eq!(source.center_value(0).unwrap(), 7.0);
    }

    #[test]
    fn test_scalar_grid_neighborhood() {
        let source = ScenarioSource::from_json(&["[[1, 2, 3], [4, 5, 6], [7, 8, 9]]"]).unwrap();
        let grid = source.depth_grid(0).unwrap();
        let n = grid.neighborhood(1, 1, 5.0);
        assert_eq!(
            n,
            Neighborhood {
                left: 4.0,
                right: 6.0,
                top: 2.0,
                bottom: 8.0
            }
        );
        // corner reuses the center value for missing neighbors
        let n = grid.neighborhood(0, 0, 1.0);
        assert_eq!(n.left, 1.0);
        assert_eq!(n.top, 1.0);
        assert_eq!(n.right, 2.0);
        assert_eq!(n.bottom, 4.0);
    }

    #[test]
    fn test_raster_neighborhood_stride() {
        // 3x1 raster row: left/right neighbors sit 4 bytes away
        let source = raster_source(3, 1, &[[10, 0, 0, 0], [20, 0, 0, 0], [30, 0, 0, 0]]);
        let grid = source.depth_grid(0).unwrap();
        let n = grid.neighborhood(0, 1, 20.0);
        assert_eq!(n.left, 10.0);
        assert_eq!(n.right, 30.0);
        // single row has no vertical neighbors
        assert_eq!(n.top, 20.0);
        assert_eq!(n.bottom, 20.0);
    }

    #[test]
    fn test_rgb_grid_is_not_a_depth_grid() {
        let source = ScenarioSource::from_json(&["[[[1, 2, 3]]]"]).unwrap();
        assert!(matches!(
            source.depth_grid(0),
            Err(DataError::DimensionMismatch(_))
        ));
    }
}
