//! Data models for Lumen
//!
//! Image buffers, the enhancement parameter set and the supported formats.

use crate::error::EnhanceError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Decoded color image, interleaved 8-bit RGB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbImage {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// RGB samples, row-major, 3 bytes per pixel
    pub data: Vec<u8>,
}

impl RgbImage {
    /// Wrap an RGB buffer, checking that its length matches the dimensions.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, String> {
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(format!(
                "RGB buffer size mismatch: expected {}, got {}",
                expected,
                data.len()
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }
}

/// Single-channel 8-bit image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl GrayImage {
    /// Wrap a gray buffer, checking that its length matches the dimensions.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, String> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(format!(
                "Gray buffer size mismatch: expected {}, got {}",
                expected,
                data.len()
            ));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Image of the given size with every sample set to `value`.
    pub fn filled(width: u32, height: u32, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width as usize * height as usize],
        }
    }

    /// Sample at column `x`, row `y`.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Mean intensity, 0.0 for an empty image.
    pub fn mean(&self) -> f64 {
        if self.data.is_empty() {
            return 0.0;
        }
        let sum: u64 = self.data.iter().map(|&v| v as u64).sum();
        sum as f64 / self.data.len() as f64
    }
}

/// Parameters of one enhancement pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnhanceParams {
    /// Side of the square median neighborhood (odd, >= 1)
    pub median_window_size: u32,

    /// Exponent applied to normalized intensities (> 0)
    pub gamma: f64,
}

impl Default for EnhanceParams {
    fn default() -> Self {
        Self {
            median_window_size: 3,
            gamma: 1.0,
        }
    }
}

impl EnhanceParams {
    /// Build a parameter set, rejecting values the pipeline cannot honor.
    pub fn new(median_window_size: u32, gamma: f64) -> Result<Self, EnhanceError> {
        let params = Self {
            median_window_size,
            gamma,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check the median window and gamma exponent.
    pub fn validate(&self) -> Result<(), EnhanceError> {
        validate_window(self.median_window_size)?;
        validate_gamma(self.gamma)
    }

    /// Parameter tag used in output and comparison file names, e.g. `5_2.0`.
    ///
    /// Gamma is written as the shortest round-trip decimal: whole numbers keep
    /// their `.0`, and values below `1e-4` or from `1e16` up switch to an
    /// exponent with an explicit sign and at least two digits (`5e-05`, `1e+16`).
    pub fn tag(&self) -> String {
        format!("{}_{}", self.median_window_size, format_gamma(self.gamma))
    }
}

/// Shortest round-trip decimal for `value`, with a signed two-digit exponent.
fn format_gamma(value: f64) -> String {
    // `Debug` already picks the same digits and the same exponent thresholds
    let repr = format!("{:?}", value);
    match repr.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => repr,
    }
}

pub(crate) fn validate_window(window: u32) -> Result<(), EnhanceError> {
    if window == 0 || window % 2 == 0 {
        return Err(EnhanceError::InvalidParameter(format!(
            "median window size must be an odd positive integer, got {}",
            window
        )));
    }
    Ok(())
}

pub(crate) fn validate_gamma(gamma: f64) -> Result<(), EnhanceError> {
    if !gamma.is_finite() || gamma <= 0.0 {
        return Err(EnhanceError::InvalidParameter(format!(
            "gamma must be a positive finite number, got {}",
            gamma
        )));
    }
    Ok(())
}

/// Image container formats accepted by the batch driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Tiff,
}

/// Extensions (lowercase, without dot) picked up from input folders.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tif", "tiff"];

impl ImageFormat {
    /// Map a file extension (any case) to a format.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "tif" | "tiff" => Some(ImageFormat::Tiff),
            _ => None,
        }
    }

    /// Format implied by a path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Identify a format from the leading bytes of a file.
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
            Some(ImageFormat::Png)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(ImageFormat::Jpeg)
        } else if bytes.starts_with(b"II*\0") || bytes.starts_with(b"MM\0*") {
            Some(ImageFormat::Tiff)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    // ========================================================================
    // EnhanceParams Tests
    // ========================================================================

    #[test]
    fn test_params_default_matches_reference_defaults() {
        let params = EnhanceParams::default();
        assert_eq!(params.median_window_size, 3);
        assert_eq!(params.gamma, 1.0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_params_reject_non_positive_gamma() {
        for gamma in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = EnhanceParams::new(3, gamma);
            assert!(
                matches!(result, Err(EnhanceError::InvalidParameter(_))),
                "gamma {} should be rejected",
                gamma
            );
        }
    }

    #[test]
    fn test_params_reject_even_or_zero_window() {
        for window in [0, 2, 4, 10] {
            assert!(matches!(
                EnhanceParams::new(window, 1.0),
                Err(EnhanceError::InvalidParameter(_))
            ));
        }
        assert!(EnhanceParams::new(1, 1.0).is_ok());
        assert!(EnhanceParams::new(7, 2.0).is_ok());
    }

    #[test]
    fn test_params_tag_keeps_float_suffix() {
        assert_eq!(EnhanceParams::new(5, 2.0).unwrap().tag(), "5_2.0");
        assert_eq!(EnhanceParams::new(3, 0.5).unwrap().tag(), "3_0.5");
        assert_eq!(EnhanceParams::new(7, 1.25).unwrap().tag(), "7_1.25");
    }

    #[test]
    fn test_params_tag_exponent_form() {
        let tag = |gamma: f64| EnhanceParams::new(3, gamma).unwrap().tag();
        assert_eq!(tag(0.00005), "3_5e-05");
        assert_eq!(tag(1e16), "3_1e+16");
        assert_eq!(tag(1.5e16), "3_1.5e+16");
        assert_eq!(tag(2.5e-120), "3_2.5e-120");
        // Plain decimals on both sides of the switch
        assert_eq!(tag(0.0001), "3_0.0001");
        assert_eq!(tag(1e15), "3_1000000000000000.0");
    }

    // ========================================================================
    // Image Buffer Tests
    // ========================================================================

    #[test]
    fn test_gray_image_size_mismatch() {
        let result = GrayImage::new(4, 4, vec![0; 15]);
        assert!(result.unwrap_err().contains("size mismatch"));
    }

    #[test]
    fn test_gray_image_mean() {
        let image = GrayImage::new(2, 2, vec![0, 100, 200, 100]).unwrap();
        assert!((image.mean() - 100.0).abs() < 1e-9);
        assert_eq!(image.get(1, 1), 100);
        assert_eq!(GrayImage::filled(0, 0, 9).mean(), 0.0);
    }

    #[test]
    fn test_rgb_image_size_check() {
        assert!(RgbImage::new(2, 2, vec![0; 12]).is_ok());
        assert!(RgbImage::new(2, 2, vec![0; 11]).is_err());
    }

    // ========================================================================
    // ImageFormat Tests
    // ========================================================================

    #[test]
    fn test_format_from_extension_case_insensitive() {
        assert_eq!(ImageFormat::from_extension("PNG"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_extension("Jpeg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("jpg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("TIF"), Some(ImageFormat::Tiff));
        assert_eq!(ImageFormat::from_extension("txt"), None);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            ImageFormat::from_path(&PathBuf::from("dir/mountain.JPG")),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(ImageFormat::from_path(&PathBuf::from("notes.txt")), None);
        assert_eq!(ImageFormat::from_path(&PathBuf::from("README")), None);
    }

    #[test]
    fn test_format_from_magic() {
        assert_eq!(
            ImageFormat::from_magic(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0]),
            Some(ImageFormat::Png)
        );
        assert_eq!(
            ImageFormat::from_magic(&[0xFF, 0xD8, 0xFF, 0xE0]),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(ImageFormat::from_magic(b"II*\0rest"), Some(ImageFormat::Tiff));
        assert_eq!(ImageFormat::from_magic(b"MM\0*rest"), Some(ImageFormat::Tiff));
        assert_eq!(ImageFormat::from_magic(b"not an image"), None);
        assert_eq!(ImageFormat::from_magic(&[]), None);
    }
}
