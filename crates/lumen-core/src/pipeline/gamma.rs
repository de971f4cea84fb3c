//! Gamma correction on 8-bit intensities.
//!
//! Samples are normalized to [0, 1], raised to `gamma` and scaled back to
//! [0, 255], truncating toward zero. Because every input is one of 256 values
//! the curve is evaluated once into a lookup table.

use crate::error::EnhanceError;
use crate::models::{validate_gamma, GrayImage};

/// Build the 256-entry table for `gamma`.
pub fn gamma_lut(gamma: f64) -> Result<[u8; 256], EnhanceError> {
    validate_gamma(gamma)?;

    let mut lut = [0u8; 256];
    for (value, entry) in lut.iter_mut().enumerate() {
        let normalized = value as f64 / 255.0;
        // powf on [0, 1] with gamma > 0 stays in [0, 1]; the cast saturates anyway
        *entry = (normalized.powf(gamma) * 255.0) as u8;
    }
    Ok(lut)
}

/// Apply gamma correction, returning a new image.
///
/// `gamma < 1` brightens mid-tones, `gamma > 1` darkens them. Non-positive or
/// non-finite exponents are rejected with `EnhanceError::InvalidParameter`.
pub fn gamma_transform(image: &GrayImage, gamma: f64) -> Result<GrayImage, EnhanceError> {
    let mut corrected = image.clone();
    apply_gamma_in_place(&mut corrected.data, gamma)?;
    Ok(corrected)
}

/// Apply gamma correction in place.
pub fn apply_gamma_in_place(data: &mut [u8], gamma: f64) -> Result<(), EnhanceError> {
    let lut = gamma_lut(gamma)?;
    for value in data.iter_mut() {
        *value = lut[*value as usize];
    }
    Ok(())
}
