//! Image exporters for various output formats
//!
//! Write enhanced grayscale results as PNG, JPEG or TIFF, chosen from the
//! destination extension, and RGB contact sheets as PNG.

use crate::models::{GrayImage, ImageFormat, RgbImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// JPEG quality used for enhanced output.
pub const JPEG_QUALITY: u8 = 95;

/// Export a grayscale image, encoding it in the format implied by `path`.
///
/// The file is written under a temporary name and renamed into place, so a
/// failed encode never leaves a truncated destination behind.
pub fn export_gray<P: AsRef<Path>>(image: &GrayImage, path: P) -> Result<(), String> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)
        .ok_or_else(|| format!("Unsupported output format: {}", path.display()))?;

    write_atomically(path, |writer| match format {
        ImageFormat::Png => write_png(
            writer,
            image.width,
            image.height,
            &image.data,
            png::ColorType::Grayscale,
            &[],
        ),
        ImageFormat::Jpeg => write_jpeg_gray(writer, image),
        ImageFormat::Tiff => write_tiff_gray(writer, image),
    })
}

/// Export an RGB image as PNG, attaching `text` as `tEXt` keyword/value chunks.
pub fn export_rgb_png<P: AsRef<Path>>(
    image: &RgbImage,
    path: P,
    text: &[(String, String)],
) -> Result<(), String> {
    write_atomically(path.as_ref(), |writer| {
        write_png(
            writer,
            image.width,
            image.height,
            &image.data,
            png::ColorType::Rgb,
            text,
        )
    })
}

fn write_png(
    writer: &mut BufWriter<File>,
    width: u32,
    height: u32,
    data: &[u8],
    color: png::ColorType,
    text: &[(String, String)],
) -> Result<(), String> {
    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(color);
    encoder.set_depth(png::BitDepth::Eight);
    for (keyword, value) in text {
        encoder
            .add_text_chunk(keyword.clone(), value.clone())
            .map_err(|e| format!("Failed to add PNG text chunk: {}", e))?;
    }

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| format!("Failed to write PNG header: {}", e))?;
    png_writer
        .write_image_data(data)
        .map_err(|e| format!("Failed to write PNG image: {}", e))?;
    png_writer
        .finish()
        .map_err(|e| format!("Failed to finish PNG image: {}", e))
}

fn write_jpeg_gray(writer: &mut BufWriter<File>, image: &GrayImage) -> Result<(), String> {
    image::codecs::jpeg::JpegEncoder::new_with_quality(writer, JPEG_QUALITY)
        .encode(
            &image.data,
            image.width,
            image.height,
            image::ExtendedColorType::L8,
        )
        .map_err(|e| format!("Failed to write JPEG image: {}", e))
}

fn write_tiff_gray(writer: &mut BufWriter<File>, image: &GrayImage) -> Result<(), String> {
    let mut encoder = tiff::encoder::TiffEncoder::new(writer)
        .map_err(|e| format!("Failed to create TIFF encoder: {}", e))?;
    encoder
        .write_image::<tiff::encoder::colortype::Gray8>(image.width, image.height, &image.data)
        .map_err(|e| format!("Failed to write TIFF image: {}", e))
}

/// Run `encode` against a temporary sibling of `path`, then move it into place.
fn write_atomically<F>(path: &Path, encode: F) -> Result<(), String>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), String>,
{
    let partial = partial_path(path);
    let file = File::create(&partial)
        .map_err(|e| format!("Failed to create {}: {}", partial.display(), e))?;
    let mut writer = BufWriter::new(file);

    let result = encode(&mut writer).and_then(|_| {
        writer
            .flush()
            .map_err(|e| format!("Failed to flush {}: {}", partial.display(), e))
    });
    drop(writer);

    match result {
        Ok(()) => std::fs::rename(&partial, path).map_err(|e| {
            let _ = std::fs::remove_file(&partial);
            format!("Failed to move output into {}: {}", path.display(), e)
        }),
        Err(e) => {
            let _ = std::fs::remove_file(&partial);
            Err(e)
        }
    }
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}
