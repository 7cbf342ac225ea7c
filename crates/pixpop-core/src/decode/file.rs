//! Raster file decoding with EXIF orientation handling.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageFormat, ImageReader};

use super::{LoadError, Orientation, PixelBuffer};

/// File extensions the editor accepts on load (lowercase).
pub const SUPPORTED_LOAD_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "tif", "tiff"];

/// Check whether a path carries one of the accepted extensions.
pub fn is_supported_extension(path: &Path) -> bool {
    extension_of(path)
        .map(|ext| SUPPORTED_LOAD_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// Read and decode an image file.
///
/// The extension is checked before the file is touched, so an unsupported
/// path never reaches the filesystem.
///
/// # Errors
///
/// * `LoadError::UnsupportedFormat` - extension or content is not accepted
/// * `LoadError::IoError` - the file cannot be read
/// * `LoadError::CorruptedFile` - the content cannot be decoded
pub fn decode_file(path: &Path) -> Result<PixelBuffer, LoadError> {
    if !is_supported_extension(path) {
        let ext = extension_of(path).unwrap_or_default();
        return Err(LoadError::UnsupportedFormat(if ext.is_empty() {
            path.display().to_string()
        } else {
            ext
        }));
    }

    let bytes = std::fs::read(path).map_err(|e| LoadError::IoError(e.to_string()))?;
    decode_bytes(&bytes)
}

/// Decode an in-memory image file, applying EXIF orientation correction.
///
/// The format is sniffed from the content. Alpha channels are discarded and
/// the result is always 8-bit RGB.
pub fn decode_bytes(bytes: &[u8]) -> Result<PixelBuffer, LoadError> {
    let format = image::guess_format(bytes)
        .map_err(|_| LoadError::UnsupportedFormat("unrecognized content".to_string()))?;

    if !is_accepted_format(format) {
        return Err(LoadError::UnsupportedFormat(format!("{format:?}")));
    }

    let orientation = match format {
        ImageFormat::Jpeg | ImageFormat::Tiff => extract_orientation(bytes),
        _ => Orientation::Normal,
    };

    let img = ImageReader::with_format(Cursor::new(bytes), format)
        .decode()
        .map_err(|e| LoadError::CorruptedFile(e.to_string()))?;

    let oriented = apply_orientation(img, orientation);
    Ok(PixelBuffer::from_rgb_image(oriented.into_rgb8()))
}

fn is_accepted_format(format: ImageFormat) -> bool {
    matches!(
        format,
        ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::Bmp | ImageFormat::Gif | ImageFormat::Tiff
    )
}

/// EXIF orientation of file bytes; `Normal` when absent or unreadable.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{encode_buffer, OutputFormat};
    use std::path::PathBuf;

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x * 40) as u8, (y * 40) as u8, 200]);
            }
        }
        PixelBuffer::new(width, height, pixels)
    }

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_extension(Path::new("photo.jpg")));
        assert!(is_supported_extension(Path::new("photo.JPEG")));
        assert!(is_supported_extension(Path::new("scan.tiff")));
        assert!(is_supported_extension(Path::new("anim.gif")));
        assert!(!is_supported_extension(Path::new("photo.webp")));
        assert!(!is_supported_extension(Path::new("no_extension")));
    }

    #[test]
    fn test_decode_png_bytes() {
        let img = gradient(5, 4);
        let png = encode_buffer(&img, OutputFormat::Png, 95).unwrap();
        let decoded = decode_bytes(&png).unwrap();
        assert_eq!(decoded, img);
    }

    #[test]
    fn test_decode_bmp_bytes() {
        let img = gradient(3, 3);
        let bmp = encode_buffer(&img, OutputFormat::Bmp, 95).unwrap();
        let decoded = decode_bytes(&bmp).unwrap();
        assert_eq!(decoded, img);
    }

    #[test]
    fn test_decode_garbage_is_unsupported() {
        let result = decode_bytes(&[0x00, 0x01, 0x02, 0x03, 0x04]);
        assert!(matches!(result, Err(LoadError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_decode_truncated_png_is_corrupted() {
        let img = gradient(8, 8);
        let png = encode_buffer(&img, OutputFormat::Png, 95).unwrap();
        let result = decode_bytes(&png[..png.len() / 2]);
        assert!(matches!(result, Err(LoadError::CorruptedFile(_))));
    }

    #[test]
    fn test_decode_file_rejects_extension_before_reading() {
        let path = PathBuf::from("/definitely/not/here/picture.webp");
        assert!(matches!(
            decode_file(&path),
            Err(LoadError::UnsupportedFormat(ext)) if ext == "webp"
        ));
    }

    #[test]
    fn test_decode_file_missing_is_io_error() {
        let path = std::env::temp_dir().join("pixpop-decode-missing-file.png");
        let _ = std::fs::remove_file(&path);
        assert!(matches!(decode_file(&path), Err(LoadError::IoError(_))));
    }

    #[test]
    fn test_orientation_defaults_without_exif() {
        let png = encode_buffer(&gradient(2, 2), OutputFormat::Png, 95).unwrap();
        assert_eq!(extract_orientation(&png), Orientation::Normal);
        assert_eq!(extract_orientation(&[]), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_rotate90_swaps_dimensions() {
        let img = DynamicImage::ImageRgb8(image::RgbImage::new(4, 2));
        let rotated = apply_orientation(img, Orientation::Rotate90CW);
        assert_eq!((rotated.width(), rotated.height()), (2, 4));
    }
}
