//! Fixture builders shared by unit tests.

/// Encode RGB pixels as JPEG with an EXIF APP1 segment carrying `orientation`.
pub(crate) fn jpeg_with_orientation(
    pixels: &[u8],
    width: u32,
    height: u32,
    orientation: u16,
) -> Vec<u8> {
    let mut encoded = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut encoded, 95)
        .encode(pixels, width, height, image::ExtendedColorType::Rgb8)
        .unwrap();

    // Big-endian TIFF header with a single-entry IFD0: tag 0x0112, SHORT, count 1
    let mut exif = b"Exif\0\0MM\0\x2a\0\0\0\x08\0\x01\x01\x12\0\x03\0\0\0\x01".to_vec();
    exif.extend_from_slice(&orientation.to_be_bytes());
    exif.extend_from_slice(&[0, 0, 0, 0, 0, 0]);

    // SOI, then APP1, then the encoder's stream without its own SOI
    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE1];
    bytes.extend_from_slice(&((exif.len() + 2) as u16).to_be_bytes());
    bytes.extend_from_slice(&exif);
    bytes.extend_from_slice(&encoded[2..]);
    bytes
}
