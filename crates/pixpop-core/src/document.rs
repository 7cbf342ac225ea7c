//! The editable document: current image, undo history and zoom.
//!
//! A [`Document`] is a plain owned value. Hosts keep one per open image and
//! drive it through `&mut` calls; every call runs to completion before it
//! returns.

use std::path::{Path, PathBuf};

use crate::config::{ConfigError, EditorConfig};
use crate::decode::{decode_bytes, decode_file, LoadError, PixelBuffer};
use crate::encode::{encode_buffer, save_file, OutputFormat, SaveError};
use crate::history::{EmptyHistoryError, UndoHistory};
use crate::ops::Operation;
use crate::render::{render, RenderPlan, RenderedFrame, ResizeError, Viewport};
use crate::transform::{FlipAxis, RotationAngle};

/// Editor state for a single image.
#[derive(Debug, Clone)]
pub struct Document {
    current: Option<PixelBuffer>,
    source_path: Option<PathBuf>,
    history: UndoHistory,
    zoom_factor: f64,
    config: EditorConfig,
}

impl Default for Document {
    fn default() -> Self {
        Self::from_valid_config(EditorConfig::default())
    }
}

impl Document {
    /// Create an empty document with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty document with a custom configuration.
    pub fn with_config(config: EditorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: EditorConfig) -> Self {
        Self {
            current: None,
            source_path: None,
            history: UndoHistory::new(config.history_limit),
            zoom_factor: 1.0,
            config,
        }
    }

    pub fn current(&self) -> Option<&PixelBuffer> {
        self.current.as_ref()
    }

    pub fn has_image(&self) -> bool {
        self.current.is_some()
    }

    /// Path of the last successfully loaded file.
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn zoom_factor(&self) -> f64 {
        self.zoom_factor
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Load an image file, replacing the current image and clearing history.
    ///
    /// On failure the document is left unchanged.
    pub fn load(&mut self, path: &Path) -> Result<&PixelBuffer, LoadError> {
        let image = decode_file(path).inspect_err(|e| {
            log::warn!("Failed to load {}: {}", path.display(), e);
        })?;
        log::info!(
            "Loaded {} ({}x{})",
            path.display(),
            image.width,
            image.height
        );
        Ok(self.replace_loaded(image, Some(path.to_path_buf())))
    }

    /// Load an image from in-memory file contents.
    ///
    /// `name` is recorded as the source path when given.
    pub fn load_bytes(&mut self, bytes: &[u8], name: Option<&str>) -> Result<&PixelBuffer, LoadError> {
        let label = name.unwrap_or("<memory>");
        let image = decode_bytes(bytes).inspect_err(|e| {
            log::warn!("Failed to load {}: {}", label, e);
        })?;
        log::info!("Loaded {} ({}x{})", label, image.width, image.height);
        Ok(self.replace_loaded(image, name.map(PathBuf::from)))
    }

    fn replace_loaded(&mut self, image: PixelBuffer, source_path: Option<PathBuf>) -> &PixelBuffer {
        self.history.clear();
        self.source_path = source_path;
        self.current.insert(image)
    }

    /// Push a copy of the current image onto the undo history.
    ///
    /// Does nothing when no image is loaded.
    pub fn snapshot(&mut self) {
        let Some(image) = &self.current else {
            return;
        };
        if self.history.push(image.clone()).is_some() {
            log::debug!("History full, evicted oldest snapshot");
        }
    }

    /// Restore the most recent snapshot.
    pub fn undo(&mut self) -> Result<&PixelBuffer, EmptyHistoryError> {
        let previous = self.history.pop().inspect_err(|_| {
            log::warn!("Undo requested with empty history");
        })?;
        log::debug!("Undo, {} snapshots left", self.history.len());
        Ok(&*self.current.insert(previous))
    }

    /// Save the current image, choosing the format from the extension.
    ///
    /// A path without an extension gets the configured default appended.
    /// Returns the path actually written.
    pub fn save(&self, path: &Path) -> Result<PathBuf, SaveError> {
        let result = match &self.current {
            Some(image) => save_file(
                image,
                path,
                &self.config.default_extension,
                self.config.jpeg_quality,
            ),
            None => Err(SaveError::NoImage),
        };

        match &result {
            Ok(written) => log::info!("Saved {}", written.display()),
            Err(e) => log::warn!("Failed to save {}: {}", path.display(), e),
        }
        result
    }

    /// Encode the current image into file bytes of the given format.
    pub fn save_to_bytes(&self, format: OutputFormat) -> Result<Vec<u8>, SaveError> {
        let image = self.current.as_ref().ok_or(SaveError::NoImage)?;
        encode_buffer(image, format, self.config.jpeg_quality)
    }

    /// Apply an editor operation.
    ///
    /// Returns `false` when no image is loaded. Zoom operations change only
    /// the zoom factor and never touch the history.
    pub fn apply(&mut self, op: Operation) -> bool {
        match op {
            Operation::ZoomIn => return self.zoom_in(),
            Operation::ZoomOut => return self.zoom_out(),
            _ => {}
        }

        let Some(edited) = self.current.as_ref().and_then(|image| op.apply_to(image)) else {
            return false;
        };

        self.snapshot();
        self.current = Some(edited);
        if op.is_transform() && self.config.double_snapshot_transforms {
            self.snapshot();
        }

        log::debug!(
            "Applied {} ({} snapshots)",
            op.name(),
            self.history.len()
        );
        true
    }

    pub fn grayscale(&mut self) -> bool {
        self.apply(Operation::Grayscale)
    }

    pub fn binary(&mut self) -> bool {
        self.apply(Operation::Binary)
    }

    pub fn brightness(&mut self, offset: i32) -> bool {
        self.apply(Operation::Brightness { offset })
    }

    pub fn contrast(&mut self, factor: f32) -> bool {
        self.apply(Operation::Contrast { factor })
    }

    pub fn rotate(&mut self, angle: RotationAngle) -> bool {
        self.apply(Operation::Rotate { angle })
    }

    pub fn flip(&mut self, axis: FlipAxis) -> bool {
        self.apply(Operation::Flip { axis })
    }

    pub fn blur(&mut self) -> bool {
        self.apply(Operation::Blur)
    }

    pub fn sharpen(&mut self) -> bool {
        self.apply(Operation::Sharpen)
    }

    pub fn sepia(&mut self) -> bool {
        self.apply(Operation::Sepia)
    }

    pub fn color_pop(&mut self) -> bool {
        self.apply(Operation::ColorPop)
    }

    /// Multiply the zoom factor by the configured step.
    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom(self.zoom_factor * self.config.zoom_step)
    }

    /// Divide the zoom factor by the configured step.
    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom(self.zoom_factor / self.config.zoom_step)
    }

    fn set_zoom(&mut self, zoom: f64) -> bool {
        if self.current.is_none() {
            return false;
        }
        // Repeated steps can eventually underflow or overflow
        if !zoom.is_finite() || zoom <= 0.0 {
            return false;
        }
        self.zoom_factor = zoom;
        log::debug!("Zoom factor {:.4}", zoom);
        true
    }

    /// Geometry of the current image in `viewport` without resampling.
    pub fn render_plan(&self, viewport: Viewport) -> Option<RenderPlan> {
        let image = self.current.as_ref()?;
        RenderPlan::compute(image.width, image.height, viewport, self.zoom_factor)
    }

    /// Resample the current image for display in `viewport`.
    ///
    /// `Ok(None)` means there is nothing to draw.
    pub fn render(&self, viewport: Viewport) -> Result<Option<RenderedFrame>, ResizeError> {
        render(
            self.current.as_ref(),
            viewport,
            self.zoom_factor,
            self.config.render_filter,
        )
    }
}
