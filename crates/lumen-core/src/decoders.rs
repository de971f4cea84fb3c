//! Image decoders for various formats
//!
//! Support for PNG, JPEG and TIFF files. Every decoder produces 8-bit RGB;
//! gray sources are expanded and alpha is dropped.

use crate::models::{ImageFormat, RgbImage};
use image::ImageDecoder;
use std::io::Cursor;
use std::path::Path;

/// Decode an image from a file path.
///
/// The container is identified from the file contents, so a PNG saved with a
/// `.jpg` extension still decodes. Files whose leading bytes match no known
/// format are reported as corrupt.
pub fn decode_image<P: AsRef<Path>>(path: P) -> Result<RgbImage, String> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| format!("Failed to open file: {}", e))?;
    decode_bytes(&bytes)
}

/// Decode an in-memory image file.
pub fn decode_bytes(bytes: &[u8]) -> Result<RgbImage, String> {
    if bytes.is_empty() {
        return Err("File is empty".to_string());
    }

    let format = ImageFormat::from_magic(bytes)
        .ok_or_else(|| "Unrecognized or corrupt image data".to_string())?;

    match format {
        ImageFormat::Png => decode_png(bytes),
        ImageFormat::Jpeg => decode_jpeg(bytes),
        ImageFormat::Tiff => decode_tiff(bytes),
    }
}

/// Decode a PNG file
fn decode_png(bytes: &[u8]) -> Result<RgbImage, String> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    // Expand palettes and low bit depths, strip 16-bit samples to their high byte
    decoder.set_transformations(png::Transformations::normalize_to_color8());

    let mut reader = decoder
        .read_info()
        .map_err(|e| format!("Failed to read PNG info: {}", e))?;

    let buffer_size = reader
        .output_buffer_size()
        .ok_or_else(|| "Failed to determine PNG buffer size".to_string())?;
    let mut buf = vec![0u8; buffer_size];
    let frame_info = reader
        .next_frame(&mut buf)
        .map_err(|e| format!("Failed to read PNG frame: {}", e))?;

    let bytes = &buf[..frame_info.buffer_size()];
    let (width, height) = (frame_info.width, frame_info.height);

    let samples_per_pixel = match frame_info.color_type {
        png::ColorType::Grayscale => 1,
        png::ColorType::GrayscaleAlpha => 2,
        png::ColorType::Rgb => 3,
        png::ColorType::Rgba => 4,
        png::ColorType::Indexed => {
            return Err("Indexed PNG was not expanded".to_string());
        }
    };
    if frame_info.bit_depth != png::BitDepth::Eight {
        return Err(format!(
            "Unsupported PNG bit depth after normalization: {:?}",
            frame_info.bit_depth
        ));
    }

    interleaved_to_rgb(bytes, width, height, samples_per_pixel)
}

/// Decode a JPEG file
///
/// An EXIF `Orientation` tag is applied, so camera and phone shots come out
/// upright with their displayed dimensions.
fn decode_jpeg(bytes: &[u8]) -> Result<RgbImage, String> {
    let mut decoder = image::codecs::jpeg::JpegDecoder::new(Cursor::new(bytes))
        .map_err(|e| format!("Failed to read JPEG header: {}", e))?;
    let orientation = decoder
        .orientation()
        .map_err(|e| format!("Failed to read JPEG orientation: {}", e))?;

    let mut decoded = image::DynamicImage::from_decoder(decoder)
        .map_err(|e| format!("Failed to decode JPEG: {}", e))?;
    decoded.apply_orientation(orientation);

    let rgb = decoded.into_rgb8();
    let (width, height) = rgb.dimensions();
    RgbImage::new(width, height, rgb.into_raw())
}

/// Decode a TIFF file
fn decode_tiff(bytes: &[u8]) -> Result<RgbImage, String> {
    use tiff::decoder::DecodingResult;

    let mut decoder = tiff::decoder::Decoder::new(Cursor::new(bytes))
        .map_err(|e| format!("Failed to create TIFF decoder: {}", e))?;

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| format!("Failed to get TIFF dimensions: {}", e))?;

    let color_type = decoder
        .colortype()
        .map_err(|e| format!("Failed to get TIFF color type: {}", e))?;

    let samples_per_pixel = match color_type {
        tiff::ColorType::Gray(_) => 1,
        tiff::ColorType::GrayA(_) => 2,
        tiff::ColorType::RGB(_) => 3,
        tiff::ColorType::RGBA(_) => 4,
        other => return Err(format!("Unsupported TIFF color type: {:?}", other)),
    };

    let image_data = decoder
        .read_image()
        .map_err(|e| format!("Failed to read TIFF image data: {}", e))?;

    // Wider integer samples keep their high byte
    let samples: Vec<u8> = match image_data {
        DecodingResult::U8(buf) => buf,
        DecodingResult::U16(buf) => buf.iter().map(|&v| (v >> 8) as u8).collect(),
        DecodingResult::U32(buf) => buf.iter().map(|&v| (v >> 24) as u8).collect(),
        DecodingResult::F32(buf) => buf.iter().map(|&v| unit_to_u8(v as f64)).collect(),
        DecodingResult::F64(buf) => buf.iter().map(|&v| unit_to_u8(v)).collect(),
        _ => return Err("Unsupported TIFF sample format".to_string()),
    };

    interleaved_to_rgb(&samples, width, height, samples_per_pixel)
}

fn unit_to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Expand gray, gray+alpha, RGB or RGBA samples into RGB.
fn interleaved_to_rgb(
    bytes: &[u8],
    width: u32,
    height: u32,
    samples_per_pixel: usize,
) -> Result<RgbImage, String> {
    let pixel_count = width as usize * height as usize;
    let expected_len = pixel_count * samples_per_pixel;
    if bytes.len() < expected_len {
        return Err(format!(
            "Image buffer size mismatch: expected {}, got {}",
            expected_len,
            bytes.len()
        ));
    }
    let bytes = &bytes[..expected_len];

    let data = match samples_per_pixel {
        3 => bytes.to_vec(),
        _ => {
            let mut rgb = Vec::with_capacity(pixel_count * 3);
            for px in bytes.chunks_exact(samples_per_pixel) {
                if samples_per_pixel <= 2 {
                    rgb.extend_from_slice(&[px[0], px[0], px[0]]);
                } else {
                    rgb.extend_from_slice(&px[..3]);
                }
            }
            rgb
        }
    };

    RgbImage::new(width, height, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::jpeg_with_orientation;
    use std::io::Write;
    use tempfile::tempdir;

    fn encode_png(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(color);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
            writer.finish().unwrap();
        }
        out
    }

    // ========================================================================
    // PNG Tests
    // ========================================================================

    #[test]
    fn test_decode_png_rgb() {
        let data = [255, 0, 0, 0, 255, 0, 0, 0, 255, 10, 20, 30];
        let bytes = encode_png(2, 2, png::ColorType::Rgb, &data);

        let image = decode_bytes(&bytes).unwrap();

        assert_eq!((image.width, image.height), (2, 2));
        assert_eq!(image.data, data.to_vec());
    }

    #[test]
    fn test_decode_png_gray_expands_to_rgb() {
        let bytes = encode_png(3, 1, png::ColorType::Grayscale, &[0, 128, 255]);

        let image = decode_bytes(&bytes).unwrap();

        assert_eq!(image.data, vec![0, 0, 0, 128, 128, 128, 255, 255, 255]);
    }

    #[test]
    fn test_decode_png_rgba_drops_alpha() {
        let bytes = encode_png(1, 1, png::ColorType::Rgba, &[1, 2, 3, 4]);

        let image = decode_bytes(&bytes).unwrap();

        assert_eq!(image.data, vec![1, 2, 3]);
    }

    // ========================================================================
    // JPEG / TIFF Tests
    // ========================================================================

    #[test]
    fn test_decode_jpeg_dimensions() {
        let mut bytes = Vec::new();
        let pixels = vec![90u8; 8 * 6 * 3];
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, 95)
            .encode(&pixels, 8, 6, image::ExtendedColorType::Rgb8)
            .unwrap();

        let image = decode_bytes(&bytes).unwrap();

        assert_eq!((image.width, image.height), (8, 6));
        assert_eq!(image.data.len(), 8 * 6 * 3);
        // Flat content survives lossy coding within a small tolerance
        assert!(image.data.iter().all(|&v| (v as i32 - 90).abs() <= 2));
    }

    #[test]
    fn test_decode_jpeg_applies_exif_orientation() {
        // 32x16 stored: dark left half, bright right half
        let pixels: Vec<u8> = (0..16u32)
            .flat_map(|_| (0..32u32).flat_map(|x| [if x < 16 { 10 } else { 240 }; 3]))
            .collect();
        let bytes = jpeg_with_orientation(&pixels, 32, 16, 6);

        let image = decode_bytes(&bytes).unwrap();

        // Orientation 6 rotates 90 degrees clockwise: the left half ends up on top
        assert_eq!((image.width, image.height), (16, 32));
        let at = |x: u32, y: u32| image.data[((y * image.width + x) * 3) as usize];
        assert!(at(8, 2) < 60, "top should be dark, got {}", at(8, 2));
        assert!(at(8, 29) > 190, "bottom should be bright, got {}", at(8, 29));
    }

    #[test]
    fn test_decode_jpeg_orientation_one_keeps_layout() {
        let pixels = vec![90u8; 32 * 16 * 3];
        let bytes = jpeg_with_orientation(&pixels, 32, 16, 1);

        let image = decode_bytes(&bytes).unwrap();

        assert_eq!((image.width, image.height), (32, 16));
    }

    #[test]
    fn test_decode_tiff_gray8() {
        let mut bytes = Cursor::new(Vec::new());
        {
            let mut encoder = tiff::encoder::TiffEncoder::new(&mut bytes).unwrap();
            encoder
                .write_image::<tiff::encoder::colortype::Gray8>(2, 1, &[7, 200])
                .unwrap();
        }

        let image = decode_bytes(bytes.get_ref()).unwrap();

        assert_eq!(image.data, vec![7, 7, 7, 200, 200, 200]);
    }

    // ========================================================================
    // Failure Tests
    // ========================================================================

    #[test]
    fn test_decode_missing_file() {
        let result = decode_image("/nonexistent/directory/missing.png");
        assert!(result.unwrap_err().contains("Failed to open file"));
    }

    #[test]
    fn test_decode_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("corrupt.jpg");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"this is not a jpeg")
            .unwrap();

        let result = decode_image(&path);

        assert!(result.unwrap_err().contains("Unrecognized or corrupt"));
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = encode_png(4, 4, png::ColorType::Rgb, &[50; 48]);
        let truncated = &bytes[..bytes.len() / 2];

        assert!(decode_bytes(truncated).is_err());
    }

    #[test]
    fn test_decode_empty_file() {
        assert_eq!(decode_bytes(&[]).unwrap_err(), "File is empty");
    }
}
