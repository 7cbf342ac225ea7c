//! Editor configuration.
//!
//! Every field has a default, so hosts can deserialize a partial object and
//! override only what they care about.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::encode::OutputFormat;
use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::render::FilterType;

/// Default multiplier applied per zoom step.
pub const DEFAULT_ZOOM_STEP: f64 = 1.1;

/// Default JPEG quality used on save.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Rejected configuration values.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("history_limit must be at least 1")]
    ZeroHistoryLimit,

    #[error("zoom_step must be a finite number greater than 1.0, got {0}")]
    InvalidZoomStep(f64),

    #[error("jpeg_quality must be between 1 and 100, got {0}")]
    InvalidJpegQuality(u8),

    #[error("default_extension is not a supported output format: {0}")]
    UnsupportedDefaultExtension(String),
}

/// Editor tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum number of undo snapshots (oldest evicted first).
    pub history_limit: usize,
    /// Factor the zoom is multiplied or divided by per step.
    pub zoom_step: f64,
    /// Extension appended when a save path has none.
    pub default_extension: String,
    /// Quality for JPEG output (1-100).
    pub jpeg_quality: u8,
    /// Resampling filter for previews.
    pub render_filter: FilterType,
    /// Push a second snapshot after rotate and flip so a single undo
    /// restores the transformed state rather than the original.
    pub double_snapshot_transforms: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            zoom_step: DEFAULT_ZOOM_STEP,
            default_extension: "png".to_string(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            render_filter: FilterType::Bilinear,
            double_snapshot_transforms: false,
        }
    }
}

impl EditorConfig {
    /// Create a new EditorConfig with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check every field against its accepted range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_limit == 0 {
            return Err(ConfigError::ZeroHistoryLimit);
        }
        if !self.zoom_step.is_finite() || self.zoom_step <= 1.0 {
            return Err(ConfigError::InvalidZoomStep(self.zoom_step));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConfigError::InvalidJpegQuality(self.jpeg_quality));
        }
        if OutputFormat::from_extension(&self.default_extension).is_none() {
            return Err(ConfigError::UnsupportedDefaultExtension(
                self.default_extension.clone(),
            ));
        }
        Ok(())
    }
}
