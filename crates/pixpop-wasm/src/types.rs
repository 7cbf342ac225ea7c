//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core Pixpop types,
//! handling the conversion between Rust and JavaScript data representations.

use pixpop_core::{PixelBuffer, RenderedFrame};
use wasm_bindgen::prelude::*;

/// An RGB image wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsPixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 3 for RGB)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Returns RGBA pixel data with opaque alpha, ready for `ImageData`.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.pixels.len() / 3 * 4);
        for px in self.pixels.chunks_exact(3) {
            rgba.extend_from_slice(px);
            rgba.push(255);
        }
        rgba
    }
}

impl JsPixelBuffer {
    pub(crate) fn from_buffer(img: PixelBuffer) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }
}

/// A preview frame and where to draw it on the host canvas.
#[wasm_bindgen]
pub struct JsRenderedFrame {
    x: u32,
    y: u32,
    scale: f64,
    image: PixelBuffer,
}

#[wasm_bindgen]
impl JsRenderedFrame {
    /// Left edge of the frame on the canvas.
    #[wasm_bindgen(getter)]
    pub fn x(&self) -> u32 {
        self.x
    }

    /// Top edge of the frame on the canvas.
    #[wasm_bindgen(getter)]
    pub fn y(&self) -> u32 {
        self.y
    }

    /// Display scale relative to the stored image.
    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.image.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.image.height
    }

    /// Take the resampled image, consuming the frame.
    pub fn into_image(self) -> JsPixelBuffer {
        JsPixelBuffer::from_buffer(self.image)
    }
}

impl JsRenderedFrame {
    pub(crate) fn from_frame(frame: RenderedFrame) -> Self {
        Self {
            x: frame.area.x,
            y: frame.area.y,
            scale: frame.plan.scale,
            image: frame.image,
        }
    }
}
