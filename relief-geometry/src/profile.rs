//! Normalization profiles mapping raw depth/intensity into z-units.
//!
//! Each geometry kind divides raw samples by one of these process-wide
//! constants; they are selected by the builder, never by the caller.

/// Named divisor selecting how a raw sample maps into the renderer's
/// z-range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizationProfile {
    /// Grayscale depth centers for the relief views.
    Grayscale,
    /// Packed 24-bit RGB intensity rendered as z-height.
    PackedColor,
    /// Multi-image gallery depth centers.
    Gallery,
}

impl NormalizationProfile {
    /// Divisor applied to a raw sample under this profile.
    pub fn scale(self) -> f32 {
        match self {
            NormalizationProfile::Grayscale => 10_000.0,
            // one fifth of the 24-bit RGB integer space
            NormalizationProfile::PackedColor => 16_777_215.0 / 5.0,
            NormalizationProfile::Gallery => 30_000.0,
        }
    }
}

/// Pack three 0-255 channel values into one integer, red in the top byte.
pub fn pack_rgb(rgb: [f32; 3]) -> f32 {
    rgb.iter().fold(0u32, |acc, &c| (acc << 8) + c as u32) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_rgb_top_byte_round_trip() {
        for r in [0u32, 1, 127, 200, 255] {
            for (g, b) in [(0u32, 0u32), (255, 255), (17, 209)] {
                let packed = pack_rgb([r as f32, g as f32, b as f32]) as u32;
                assert_eq!(packed >> 16, r);
                assert_eq!((packed >> 8) & 0xff, g);
                assert_eq!(packed & 0xff, b);
            }
        }
    }

    #[test]
    fn test_pack_rgb_white_is_full_range() {
        assert_eq!(pack_rgb([255.0, 255.0, 255.0]), 16_777_215.0);
    }

    #[test]
    fn test_profile_scales() {
        assert_eq!(NormalizationProfile::Grayscale.scale(), 10_000.0);
        assert_eq!(NormalizationProfile::PackedColor.scale(), 16_777_215.0 / 5.0);
        assert_eq!(NormalizationProfile::Gallery.scale(), 30_000.0);
    }
}
