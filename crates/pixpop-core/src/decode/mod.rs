//! Image loading for PixPop.
//!
//! This module provides functionality for:
//! - The `PixelBuffer` type every other module operates on
//! - Decoding JPEG, PNG, BMP, GIF and TIFF files from a path or from bytes
//! - EXIF orientation correction for JPEG and TIFF sources
//!
//! # Examples
//!
//! ```ignore
//! use pixpop_core::decode::decode_file;
//!
//! let image = decode_file(std::path::Path::new("photo.jpg")).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod file;
mod types;

pub use file::{decode_bytes, decode_file, is_supported_extension, SUPPORTED_LOAD_EXTENSIONS};
pub use types::{LoadError, Orientation, PixelBuffer};
