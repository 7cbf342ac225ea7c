//! Image resampling for display.
//!
//! Provides resize operations using the `image` crate's algorithms.
//! All functions return new `PixelBuffer` instances without modifying the input.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::PixelBuffer;

/// Errors that can occur while resampling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResizeError {
    /// Target width or height is zero.
    #[error("Invalid target dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Source pixel data doesn't match its dimensions.
    #[error("Source buffer does not match its dimensions")]
    BufferMismatch,
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// * `ResizeError::InvalidDimensions` - a target dimension is zero
/// * `ResizeError::BufferMismatch` - the source cannot be viewed as an RGB image
pub fn resize(
    image: &PixelBuffer,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<PixelBuffer, ResizeError> {
    if width == 0 || height == 0 {
        return Err(ResizeError::InvalidDimensions { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image.to_rgb_image().ok_or(ResizeError::BufferMismatch)?;
    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(PixelBuffer::from_rgb_image(resized))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_image(width: u32, height: u32) -> PixelBuffer {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(128);
            }
        }
        PixelBuffer::new(width, height, pixels)
    }

    #[test]
    fn test_filter_type_conversion() {
        assert!(matches!(
            FilterType::Nearest.to_image_filter(),
            image::imageops::FilterType::Nearest
        ));
        assert!(matches!(
            FilterType::Bilinear.to_image_filter(),
            image::imageops::FilterType::Triangle
        ));
        assert!(matches!(
            FilterType::Lanczos3.to_image_filter(),
            image::imageops::FilterType::Lanczos3
        ));
    }

    #[test]
    fn test_resize_basic() {
        let img = create_test_image(100, 50);
        let resized = resize(&img, 50, 25, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width, 50);
        assert_eq!(resized.height, 25);
        assert_eq!(resized.pixels.len(), 50 * 25 * 3);
    }

    #[test]
    fn test_resize_same_dimensions() {
        let img = create_test_image(100, 50);
        let resized = resize(&img, 100, 50, FilterType::Bilinear).unwrap();
        assert_eq!(resized, img);
    }

    #[test]
    fn test_resize_upscale_all_filters() {
        let img = create_test_image(20, 10);
        for filter in [FilterType::Nearest, FilterType::Bilinear, FilterType::Lanczos3] {
            let resized = resize(&img, 40, 20, filter).unwrap();
            assert_eq!((resized.width, resized.height), (40, 20));
        }
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let img = create_test_image(100, 50);
        assert_eq!(
            resize(&img, 0, 50, FilterType::Bilinear),
            Err(ResizeError::InvalidDimensions { width: 0, height: 50 })
        );
        assert!(resize(&img, 50, 0, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_resize_mismatched_buffer() {
        let broken = PixelBuffer {
            width: 10,
            height: 10,
            pixels: vec![0; 7],
        };
        assert_eq!(
            resize(&broken, 5, 5, FilterType::Nearest),
            Err(ResizeError::BufferMismatch)
        );
    }
}
