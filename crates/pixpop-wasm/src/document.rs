//! WASM bindings for the editable document.
//!
//! Every catalog operation returns `true` when it changed something and
//! `false` when there was no image to work on.

use crate::types::{JsPixelBuffer, JsRenderedFrame};
use pixpop_core::{
    Document, EditorConfig, FlipAxis, Operation, OutputFormat, RotationAngle, Viewport,
};
use wasm_bindgen::prelude::*;

/// An open image with its undo history and zoom.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const doc = JsDocument.with_config({ history_limit: 20 });
/// doc.load_bytes(bytes, 'photo.jpg');
/// doc.rotate(90);
/// doc.undo();
/// const png = doc.save_bytes('png');
/// ```
#[wasm_bindgen]
pub struct JsDocument {
    inner: Document,
}

impl Default for JsDocument {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl JsDocument {
    /// Create an empty document with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: Document::new(),
        }
    }

    /// Create an empty document from a partial configuration object.
    ///
    /// # Errors
    /// Returns error if the object cannot be deserialized or holds invalid values
    pub fn with_config(config: JsValue) -> Result<JsDocument, JsValue> {
        let config: EditorConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?;
        Document::with_config(config)
            .map(Self::from_core)
            .map_err(to_js_error)
    }

    /// Decode file contents and make them the current image.
    ///
    /// Clears the undo history.
    pub fn load_bytes(&mut self, bytes: &[u8], name: Option<String>) -> Result<(), JsValue> {
        self.inner
            .load_bytes(bytes, name.as_deref())
            .map(|_| ())
            .map_err(to_js_error)
    }

    /// Encode the current image in the format named by `extension`.
    pub fn save_bytes(&self, extension: &str) -> Result<Vec<u8>, JsValue> {
        let format = OutputFormat::from_extension(extension).ok_or_else(|| {
            JsValue::from_str(&format!("Unsupported output format: {}", extension))
        })?;
        self.inner.save_to_bytes(format).map_err(to_js_error)
    }

    /// Restore the previous image. Errors with "Nothing to undo" when empty.
    pub fn undo(&mut self) -> Result<(), JsValue> {
        self.inner.undo().map(|_| ()).map_err(to_js_error)
    }

    /// Apply an operation described as `{ kind: 'contrast', factor: 1.2 }`.
    pub fn apply(&mut self, op: JsValue) -> Result<bool, JsValue> {
        let op: Operation = serde_wasm_bindgen::from_value(op)
            .map_err(|e| JsValue::from_str(&format!("Invalid operation: {}", e)))?;
        Ok(self.inner.apply(op))
    }

    pub fn grayscale(&mut self) -> bool {
        self.inner.grayscale()
    }

    pub fn binary(&mut self) -> bool {
        self.inner.binary()
    }

    /// Shift brightness by `offset` (-100 to 100).
    pub fn brightness(&mut self, offset: i32) -> bool {
        self.inner.brightness(offset)
    }

    /// Scale contrast by `factor` (0.5 to 2.0).
    pub fn contrast(&mut self, factor: f32) -> bool {
        self.inner.contrast(factor)
    }

    /// Rotate counter-clockwise by 90, 180 or 270 degrees.
    pub fn rotate(&mut self, degrees: u16) -> Result<bool, JsValue> {
        let angle = RotationAngle::try_from(degrees).map_err(|e| JsValue::from_str(&e))?;
        Ok(self.inner.rotate(angle))
    }

    /// Mirror left-right, or top-bottom when `vertical` is set.
    pub fn flip(&mut self, vertical: bool) -> bool {
        let axis = if vertical {
            FlipAxis::Vertical
        } else {
            FlipAxis::Horizontal
        };
        self.inner.flip(axis)
    }

    pub fn blur(&mut self) -> bool {
        self.inner.blur()
    }

    pub fn sharpen(&mut self) -> bool {
        self.inner.sharpen()
    }

    pub fn sepia(&mut self) -> bool {
        self.inner.sepia()
    }

    pub fn color_pop(&mut self) -> bool {
        self.inner.color_pop()
    }

    pub fn zoom_in(&mut self) -> bool {
        self.inner.zoom_in()
    }

    pub fn zoom_out(&mut self) -> bool {
        self.inner.zoom_out()
    }

    #[wasm_bindgen(getter)]
    pub fn zoom_factor(&self) -> f64 {
        self.inner.zoom_factor()
    }

    #[wasm_bindgen(getter)]
    pub fn history_len(&self) -> usize {
        self.inner.history_len()
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.has_image()
    }

    /// Copy of the full-resolution current image.
    pub fn current(&self) -> Option<JsPixelBuffer> {
        self.inner.current().cloned().map(JsPixelBuffer::from_buffer)
    }

    /// Render the current image for a canvas of the given size.
    ///
    /// Returns `undefined` when there is nothing to draw.
    pub fn render(&self, width: u32, height: u32) -> Result<Option<JsRenderedFrame>, JsValue> {
        self.inner
            .render(Viewport::new(width, height))
            .map(|frame| frame.map(JsRenderedFrame::from_frame))
            .map_err(to_js_error)
    }
}

impl JsDocument {
    pub(crate) fn from_core(inner: Document) -> Self {
        Self { inner }
    }
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}


/// WASM-specific tests that require JsValue.
///
/// These tests exercise the error paths, which build `JsValue`s and can only
/// run on wasm32 targets. Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_undo_empty_history_errors() {
        let mut doc = JsDocument::new();
        let err = doc.undo().unwrap_err();
        assert_eq!(err.as_string().as_deref(), Some("Nothing to undo"));
    }

    #[wasm_bindgen_test]
    fn test_save_without_image_errors() {
        let doc = JsDocument::new();
        let err = doc.save_bytes("png").unwrap_err();
        assert_eq!(err.as_string().as_deref(), Some("No image to save"));
    }

    #[wasm_bindgen_test]
    fn test_unsupported_extension_errors() {
        let doc = JsDocument::new();
        assert!(doc.save_bytes("webp").is_err());
    }

    #[wasm_bindgen_test]
    fn test_invalid_rotation_errors() {
        let mut doc = JsDocument::new();
        assert!(doc.rotate(45).is_err());
    }

    #[wasm_bindgen_test]
    fn test_load_garbage_errors() {
        let mut doc = JsDocument::new();
        assert!(doc.load_bytes(b"not an image", None).is_err());
    }

    #[wasm_bindgen_test]
    fn test_apply_from_js_object() {
        let mut doc = JsDocument::new();
        let png = {
            let img = pixpop_core::PixelBuffer::filled(2, 2, [200, 200, 200]);
            pixpop_core::encode::encode_buffer(&img, OutputFormat::Png, 95).unwrap()
        };
        doc.load_bytes(&png, None).unwrap();

        let op = serde_wasm_bindgen::to_value(&Operation::Contrast { factor: 0.5 }).unwrap();
        assert!(doc.apply(op).unwrap());
        assert_eq!(&doc.current().unwrap().pixels()[0..3], &[100, 100, 100]);
    }

    #[wasm_bindgen_test]
    fn test_with_config_partial_object() {
        let config = serde_wasm_bindgen::to_value(&EditorConfig {
            history_limit: 5,
            ..EditorConfig::default()
        })
        .unwrap();
        let doc = JsDocument::with_config(config).unwrap();
        assert_eq!(doc.history_len(), 0);
    }
}
