//! Pixpop Core - Image editing library
//!
//! This crate provides the core of the Pixpop editor: a [`Document`] holding
//! the current image with bounded undo, a catalog of pixel operations
//! (grayscale, binary, brightness, contrast, rotate, flip, blur, sharpen,
//! sepia and color pop), fit-to-viewport rendering with zoom, and file
//! load/save.
//!
//! Hosts translate their UI events into [`Operation`] values and call
//! [`Document::render`] afterwards to refresh the view.

pub mod adjustments;
pub mod color;
pub mod config;
pub mod decode;
pub mod document;
pub mod encode;
pub mod filter;
pub mod history;
pub mod hsv;
pub mod luminance;
pub mod ops;
pub mod render;
pub mod transform;

pub use config::{ConfigError, EditorConfig};
pub use decode::{LoadError, PixelBuffer};
pub use document::Document;
pub use encode::{OutputFormat, SaveError};
pub use history::{EmptyHistoryError, UndoHistory};
pub use ops::Operation;
pub use render::{FilterType, RenderPlan, RenderedFrame, ResizeError, Viewport, VisibleRect};
pub use transform::{FlipAxis, RotationAngle};
