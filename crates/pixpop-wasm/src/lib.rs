//! Pixpop WASM - WebAssembly bindings for Pixpop
//!
//! This crate exposes the pixpop-core editor to JavaScript/TypeScript host
//! shells. The host owns the window and buttons; it forwards user actions to a
//! [`JsDocument`] and draws the frames it renders.
//!
//! # Module Structure
//!
//! - `document` - The editable document (load, save, operations, undo, zoom, render)
//! - `types` - WASM-compatible wrapper types for image data
//! - `logger` - Routes `log` records to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsDocument } from '@pixpop/wasm';
//!
//! await init();
//!
//! const doc = new JsDocument();
//! doc.load_bytes(new Uint8Array(await file.arrayBuffer()), file.name);
//! doc.apply({ kind: 'brightness', offset: 40 });
//! const frame = doc.render(canvas.width, canvas.height);
//! ```

use wasm_bindgen::prelude::*;

mod document;
mod logger;
mod types;

pub use document::JsDocument;
pub use types::{JsPixelBuffer, JsRenderedFrame};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::install(log::LevelFilter::Info);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
