//! Luminance conversion from RGB to a single gray channel.
//!
//! ITU-R BT.601 weights (0.299, 0.587, 0.114) evaluated in 14-bit fixed
//! point with round-half-up, so equal channels map back to themselves.

use crate::models::{GrayImage, RgbImage};

const SHIFT: u32 = 14;
const R_WEIGHT: u32 = 4899; // 0.299 * 2^14
const G_WEIGHT: u32 = 9617; // 0.587 * 2^14
const B_WEIGHT: u32 = 1868; // 0.114 * 2^14
const ROUND: u32 = 1 << (SHIFT - 1);

/// Luminance of one RGB pixel.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * R_WEIGHT + g as u32 * G_WEIGHT + b as u32 * B_WEIGHT + ROUND) >> SHIFT) as u8
}

/// Convert an RGB image to grayscale.
pub fn rgb_to_gray(image: &RgbImage) -> GrayImage {
    let data = image
        .data
        .chunks_exact(3)
        .map(|px| luminance(px[0], px[1], px[2]))
        .collect();

    GrayImage {
        width: image.width,
        height: image.height,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_unity() {
        assert_eq!(R_WEIGHT + G_WEIGHT + B_WEIGHT, 1 << SHIFT);
    }

    #[test]
    fn test_luminance_primaries() {
        assert_eq!(luminance(255, 0, 0), 76);
        assert_eq!(luminance(0, 255, 0), 150);
        assert_eq!(luminance(0, 0, 255), 29);
        assert_eq!(luminance(255, 255, 255), 255);
        assert_eq!(luminance(0, 0, 0), 0);
    }

    #[test]
    fn test_luminance_neutral_is_unchanged() {
        for v in 0..=255u8 {
            assert_eq!(luminance(v, v, v), v);
        }
    }

    #[test]
    fn test_rgb_to_gray_dimensions() {
        let rgb = RgbImage::new(3, 2, vec![128; 18]).unwrap();
        let gray = rgb_to_gray(&rgb);

        assert_eq!((gray.width, gray.height), (3, 2));
        assert_eq!(gray.data, vec![128; 6]);
    }
}
