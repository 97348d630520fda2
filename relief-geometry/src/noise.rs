//! Edge-preserving depth noise filter.
//!
//! Estimated depth maps carry speckle along silhouettes. Rather than smooth,
//! this filter treats any sharp local gradient as unreliable and zeroes the
//! sample, keeping flat regions intact.

use relief_data::DepthGrid;

/// Decide whether a raw depth sample is noise and rescale it into z-units.
///
/// Zero samples stay zero. A sample whose 4-neighborhood jumps by more than
/// 5% of its own value (horizontal checked before vertical) is zeroed.
/// Otherwise the sample is rescaled; the formula depends on the source
/// encoding (raster depth arrives in 0-255, grid depth pre-normalized to
/// roughly 0-1) so the two branches are intentionally different.
pub fn filtered_depth(sample: f32, grid: &DepthGrid<'_>, row: usize, col: usize) -> f32 {
    if sample == 0.0 {
        return 0.0;
    }

    let threshold = 5.0 * (sample / 100.0);
    let n = grid.neighborhood(row, col, sample);

    if (n.left - sample).abs() > threshold || (n.right - sample).abs() > threshold {
        return 0.0;
    }
    if (n.top - sample).abs() > threshold || (n.bottom - sample).abs() > threshold {
        return 0.0;
    }

    if grid.is_raster() {
        10.0 - sample / 20.0
    } else {
        3.0 * (1.0 - sample)
    }
}
