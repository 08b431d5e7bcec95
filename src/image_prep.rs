//! Upload validation and re-encoding ahead of captioning.

use base64::{engine::general_purpose, Engine as _};
use image::{DynamicImage, ImageFormat, ImageOutputFormat};
use std::io::Cursor;
use thiserror::Error;

/// Default upload cap (10MB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// JPEG quality used when re-encoding uploads for the captioning API
const JPEG_QUALITY: u8 = 85;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Image data is empty")]
    EmptyData,

    #[error("Image data is too large: {0} bytes (max: {1} bytes)")]
    TooLarge(usize, usize),

    #[error("Unsupported image format, expected JPG, JPEG or PNG")]
    UnsupportedFormat,

    #[error("Failed to decode image: {0}")]
    DecodeFailed(String),

    #[error("Failed to encode image: {0}")]
    EncodeFailed(String),
}

/// An upload converted to RGB and re-encoded as JPEG.
#[derive(Debug, Clone)]
pub struct PreparedImage {
    pub width: u32,
    pub height: u32,
    /// Format detected from the uploaded bytes
    pub source_format: ImageFormat,
    pub jpeg: Vec<u8>,
}

impl PreparedImage {
    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(&self.jpeg)
    }
}

/// Detect the format from magic bytes, accepting only PNG and JPEG.
pub fn detect_format(bytes: &[u8]) -> Result<ImageFormat, ImageError> {
    match image::guess_format(bytes) {
        Ok(format @ (ImageFormat::Png | ImageFormat::Jpeg)) => Ok(format),
        _ => Err(ImageError::UnsupportedFormat),
    }
}

/// Validate, decode and re-encode an uploaded image.
pub fn decode_upload(bytes: &[u8], max_bytes: usize) -> Result<PreparedImage, ImageError> {
    if bytes.is_empty() {
        return Err(ImageError::EmptyData);
    }

    if bytes.len() > max_bytes {
        return Err(ImageError::TooLarge(bytes.len(), max_bytes));
    }

    let source_format = detect_format(bytes)?;

    let img = image::load_from_memory_with_format(bytes, source_format)
        .map_err(|e| ImageError::DecodeFailed(e.to_string()))?;

    // JPEG has no alpha channel
    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());

    let mut jpeg = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut jpeg), ImageOutputFormat::Jpeg(JPEG_QUALITY))
        .map_err(|e| ImageError::EncodeFailed(e.to_string()))?;

    Ok(PreparedImage {
        width: rgb.width(),
        height: rgb.height(),
        source_format,
        jpeg,
    })
}
