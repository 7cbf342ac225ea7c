//! Mirror an image across its vertical or horizontal axis.

use image::imageops;
use serde::{Deserialize, Serialize};

use crate::decode::PixelBuffer;

/// Which way to mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlipAxis {
    /// Mirror left-right (columns reversed).
    Horizontal,
    /// Mirror top-bottom (rows reversed).
    Vertical,
}

/// Mirror `image` along `axis`. Flipping twice returns the original buffer.
///
/// A buffer whose length does not match its dimensions is returned as is.
pub fn apply_flip(image: &PixelBuffer, axis: FlipAxis) -> PixelBuffer {
    let Some(rgb) = image.to_rgb_image() else {
        return image.clone();
    };

    let flipped = match axis {
        FlipAxis::Horizontal => imageops::flip_horizontal(&rgb),
        FlipAxis::Vertical => imageops::flip_vertical(&rgb),
    };
    PixelBuffer::from_rgb_image(flipped)
}
