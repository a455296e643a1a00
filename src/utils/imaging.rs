//! Image dimension probing
//!
//! Answers "how big is this image" without the caller decoding anything,
//! either from a file on disk or from an in-memory buffer, plus magic-byte
//! format sniffing for the common web formats.

use std::path::Path;

use anyhow::{Context, Result};
use image::ImageFormat;

/// Returns the width and height of an image by inspecting the file itself.
///
/// Only the header is read; pixel data is never decoded.
pub fn image_dimensions<P: AsRef<Path>>(path: P) -> Result<(u32, u32)> {
    let path = path.as_ref();
    image::image_dimensions(path)
        .with_context(|| format!("failed to read image dimensions from {}", path.display()))
}

/// Returns the width and height of an image held in memory, or `None` when
/// the data does not decode as a supported image
pub fn dimensions_from_bytes(data: &[u8]) -> Option<(u32, u32)> {
    image::load_from_memory(data)
        .ok()
        .map(|img| (img.width(), img.height()))
}

/// Sniffs the image format from magic bytes.
///
/// Recognises PNG, JPEG, GIF and WebP; anything else is `None`.
pub fn detect_image_format(data: &[u8]) -> Option<ImageFormat> {
    if data.len() < 8 {
        return None;
    }

    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
        Some(ImageFormat::Png)
    } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some(ImageFormat::Jpeg)
    } else if data.starts_with(&[0x47, 0x49, 0x46]) {
        Some(ImageFormat::Gif)
    } else if data.len() >= 12 && &data[8..12] == b"WEBP" {
        Some(ImageFormat::WebP)
    } else {
        None
    }
}
