//! Image saving for PixPop.
//!
//! This module provides functionality for:
//! - Encoding a `PixelBuffer` to PNG, JPEG, BMP, GIF or TIFF bytes
//! - Resolving the output format from a save path's extension
//! - Writing the encoded file to disk
//!
//! # Examples
//!
//! ```ignore
//! use pixpop_core::encode::{encode_buffer, OutputFormat};
//!
//! let bytes = encode_buffer(&image, OutputFormat::Png, 95).unwrap();
//! println!("Encoded {} bytes", bytes.len());
//! ```

mod file;

pub use file::{encode_buffer, resolve_save_path, save_file, OutputFormat, SaveError};
