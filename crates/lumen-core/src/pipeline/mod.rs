//! Image enhancement pipeline
//!
//! Turns one source image into a denoised, gamma-corrected grayscale image.
//!
//! This module is organized into submodules:
//! - `grayscale`: RGB to luminance conversion
//! - `median`: Square-window median denoising
//! - `gamma`: Gamma correction through a lookup table

mod gamma;
mod grayscale;
mod median;


pub use gamma::{apply_gamma_in_place, gamma_lut, gamma_transform};
pub use grayscale::{luminance, rgb_to_gray};
pub use median::median_filter;

use std::path::{Path, PathBuf};

use crate::decoders::decode_image;
use crate::display::{ComparisonDisplay, ComparisonPanel, PanelImage};
use crate::error::EnhanceError;
use crate::exporters::export_gray;
use crate::models::{EnhanceParams, GrayImage, RgbImage};
use crate::verbose_println;

/// Every stage of one enhancement, kept for the comparison display.
#[derive(Debug, Clone)]
pub struct EnhancedImage {
    /// Decoded source
    pub original: RgbImage,

    /// Luminance of the source
    pub gray: GrayImage,

    /// Median-filtered luminance
    pub denoised: GrayImage,

    /// Gamma-corrected denoised image (the saved result)
    pub corrected: GrayImage,
}

impl EnhancedImage {
    /// The four labelled panels: original, grayscale, median, gamma.
    pub fn panels(&self, params: &EnhanceParams) -> Vec<ComparisonPanel<'_>> {
        vec![
            ComparisonPanel::new("Original", PanelImage::Rgb(&self.original)),
            ComparisonPanel::new("Grayscale", PanelImage::Gray(&self.gray)),
            ComparisonPanel::new(
                format!("Median {}", params.median_window_size),
                PanelImage::Gray(&self.denoised),
            ),
            ComparisonPanel::new(
                format!("Gamma {:?}", params.gamma),
                PanelImage::Gray(&self.corrected),
            ),
        ]
    }
}

/// Run grayscale, median and gamma stages on a decoded image.
pub fn enhance_decoded(
    image: RgbImage,
    params: &EnhanceParams,
) -> Result<EnhancedImage, EnhanceError> {
    params.validate()?;

    let gray = rgb_to_gray(&image);
    let denoised = median_filter(&gray, params.median_window_size)?;
    let corrected = gamma_transform(&denoised, params.gamma)?;

    Ok(EnhancedImage {
        original: image,
        gray,
        denoised,
        corrected,
    })
}

/// Destination file name, e.g. `enhanced_5_2.0_mountain.jpg`.
pub fn output_file_name(file_name: &str, params: &EnhanceParams) -> String {
    format!("enhanced_{}_{}", params.tag(), file_name)
}

/// Name under which the comparison for `file_name` is shown, e.g. `comparison_5_2.0_mountain`.
pub fn comparison_name(file_name: &str, params: &EnhanceParams) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string());
    format!("comparison_{}_{}", params.tag(), stem)
}

/// Full destination path for `input` inside `output_dir`.
pub fn output_path_for(
    input: &Path,
    output_dir: &Path,
    params: &EnhanceParams,
) -> Result<PathBuf, EnhanceError> {
    let file_name = input
        .file_name()
        .ok_or_else(|| EnhanceError::Decode {
            path: input.to_path_buf(),
            reason: "Invalid input filename".to_string(),
        })?
        .to_string_lossy();
    Ok(output_dir.join(output_file_name(&file_name, params)))
}

/// Enhance the image at `path` and save the result into `output_dir`.
///
/// Steps, in order: validate parameters, decode, grayscale, median filter,
/// gamma correction, save, show the comparison. Nothing is written when the
/// parameters are invalid or the source cannot be decoded. A display failure
/// is reported and does not fail the call.
///
/// Returns the path of the saved image.
pub fn enhance_image(
    path: &Path,
    output_dir: &Path,
    params: &EnhanceParams,
    display: &mut dyn ComparisonDisplay,
) -> Result<PathBuf, EnhanceError> {
    params.validate()?;

    let decoded = decode_image(path).map_err(|reason| EnhanceError::Decode {
        path: path.to_path_buf(),
        reason,
    })?;
    verbose_println!(
        "[lumen] Decoded {} ({}x{})",
        path.display(),
        decoded.width,
        decoded.height
    );

    let enhanced = enhance_decoded(decoded, params)?;

    let save_path = output_path_for(path, output_dir, params)?;
    export_gray(&enhanced.corrected, &save_path).map_err(|reason| EnhanceError::Encode {
        path: save_path.clone(),
        reason,
    })?;
    crate::progress_println!("Saved: {}", save_path.display());

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = comparison_name(&file_name, params);
    if let Err(e) = display.show(&name, &enhanced.panels(params)) {
        eprintln!("Warning: could not display comparison {}: {}", name, e);
    }

    Ok(save_path)
}
