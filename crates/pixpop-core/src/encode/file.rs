//! Raster file encoding for save.
//!
//! JPEG goes through the `image` crate's JPEG encoder so the quality setting
//! is honored; every other format uses the generic buffer writer.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::PixelBuffer;

/// Errors that can occur while saving the current image.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The document holds no image.
    #[error("No image to save")]
    NoImage,

    /// The requested extension has no encoder.
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// Pixel data length doesn't match the dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Encoding failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// Writing the file failed
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Output formats the editor can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Jpeg,
    Bmp,
    Gif,
    Tiff,
}

impl OutputFormat {
    /// Resolve a file extension (case-insensitive, without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(OutputFormat::Png),
            "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
            "bmp" => Some(OutputFormat::Bmp),
            "gif" => Some(OutputFormat::Gif),
            "tif" | "tiff" => Some(OutputFormat::Tiff),
            _ => None,
        }
    }

    /// Canonical extension written for this format.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Bmp => "bmp",
            OutputFormat::Gif => "gif",
            OutputFormat::Tiff => "tiff",
        }
    }

    fn image_format(self) -> ImageFormat {
        match self {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Jpeg => ImageFormat::Jpeg,
            OutputFormat::Bmp => ImageFormat::Bmp,
            OutputFormat::Gif => ImageFormat::Gif,
            OutputFormat::Tiff => ImageFormat::Tiff,
        }
    }
}

/// Encode a buffer into the bytes of an image file.
///
/// `jpeg_quality` is clamped to 1..=100 and ignored for other formats.
///
/// # Errors
///
/// * `SaveError::NoImage` - the buffer has a zero dimension
/// * `SaveError::InvalidPixelData` - buffer length does not match its dimensions
/// * `SaveError::EncodingFailed` - the encoder rejected the data
pub fn encode_buffer(
    image: &PixelBuffer,
    format: OutputFormat,
    jpeg_quality: u8,
) -> Result<Vec<u8>, SaveError> {
    if image.width == 0 || image.height == 0 {
        return Err(SaveError::NoImage);
    }

    let expected = image.pixel_count() * 3;
    if image.pixels.len() != expected {
        return Err(SaveError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());

    match format {
        OutputFormat::Jpeg => {
            let encoder = JpegEncoder::new_with_quality(&mut buffer, jpeg_quality.clamp(1, 100));
            encoder
                .write_image(&image.pixels, image.width, image.height, ExtendedColorType::Rgb8)
                .map_err(|e| SaveError::EncodingFailed(e.to_string()))?;
        }
        other => {
            image::write_buffer_with_format(
                &mut buffer,
                &image.pixels,
                image.width,
                image.height,
                ExtendedColorType::Rgb8,
                other.image_format(),
            )
            .map_err(|e| SaveError::EncodingFailed(e.to_string()))?;
        }
    }

    Ok(buffer.into_inner())
}

/// Resolve the path a save will actually write.
///
/// A path without an extension gets the canonical extension of the
/// `default_extension` format appended. Otherwise the format is derived
/// from the path's own extension.
pub fn resolve_save_path(
    path: &Path,
    default_extension: &str,
) -> Result<(PathBuf, OutputFormat), SaveError> {
    let ext = match path.extension() {
        Some(ext) => ext.to_str().unwrap_or_default(),
        None => default_extension,
    };
    let format =
        OutputFormat::from_extension(ext).ok_or_else(|| SaveError::UnsupportedFormat(ext.to_string()))?;

    let resolved = match path.extension() {
        Some(_) => path.to_path_buf(),
        None => path.with_extension(format.extension()),
    };

    Ok((resolved, format))
}

/// Encode `image` and write it to `path`.
///
/// Returns the path that was written, which differs from `path` when the
/// default extension had to be appended.
pub fn save_file(
    image: &PixelBuffer,
    path: &Path,
    default_extension: &str,
    jpeg_quality: u8,
) -> Result<PathBuf, SaveError> {
    let (resolved, format) = resolve_save_path(path, default_extension)?;
    let bytes = encode_buffer(image, format, jpeg_quality)?;
    std::fs::write(&resolved, bytes).map_err(|e| SaveError::IoError(e.to_string()))?;
    Ok(resolved)
}
