//! The catalog of editing operations.
//!
//! Hosts describe a user action as an [`Operation`] and hand it to
//! [`Document::apply`](crate::Document::apply); the pixel work is dispatched
//! from here.

use serde::{Deserialize, Serialize};

use crate::adjustments::{apply_brightness, apply_color_pop, apply_contrast};
use crate::color::{apply_sepia, to_binary, to_grayscale};
use crate::decode::PixelBuffer;
use crate::filter::{gaussian_blur, sharpen};
use crate::transform::{apply_flip, rotate, FlipAxis, RotationAngle};

/// One editor action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Operation {
    Grayscale,
    Binary,
    Brightness { offset: i32 },
    Contrast { factor: f32 },
    Rotate { angle: RotationAngle },
    Flip { axis: FlipAxis },
    ZoomIn,
    ZoomOut,
    Blur,
    Sharpen,
    Sepia,
    ColorPop,
}

impl Operation {
    /// Short identifier used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Grayscale => "grayscale",
            Operation::Binary => "binary",
            Operation::Brightness { .. } => "brightness",
            Operation::Contrast { .. } => "contrast",
            Operation::Rotate { .. } => "rotate",
            Operation::Flip { .. } => "flip",
            Operation::ZoomIn => "zoom_in",
            Operation::ZoomOut => "zoom_out",
            Operation::Blur => "blur",
            Operation::Sharpen => "sharpen",
            Operation::Sepia => "sepia",
            Operation::ColorPop => "color_pop",
        }
    }

    /// Geometric transforms (rotate and flip).
    pub fn is_transform(&self) -> bool {
        matches!(self, Operation::Rotate { .. } | Operation::Flip { .. })
    }

    /// Compute the edited buffer. Returns `None` for zoom operations.
    pub fn apply_to(&self, image: &PixelBuffer) -> Option<PixelBuffer> {
        let edited = match *self {
            Operation::Grayscale => to_grayscale(image),
            Operation::Binary => to_binary(image),
            Operation::Brightness { offset } => apply_brightness(image, offset),
            Operation::Contrast { factor } => apply_contrast(image, factor),
            Operation::Rotate { angle } => rotate(image, angle),
            Operation::Flip { axis } => apply_flip(image, axis),
            Operation::Blur => gaussian_blur(image),
            Operation::Sharpen => sharpen(image),
            Operation::Sepia => apply_sepia(image),
            Operation::ColorPop => apply_color_pop(image),
            Operation::ZoomIn | Operation::ZoomOut => return None,
        };
        Some(edited)
    }
}
