//! Color conversion effects: grayscale, binary threshold and sepia.
//!
//! All three return a new 3-channel buffer of the same size, so display and
//! encoding never need to special-case single-channel images.

use crate::decode::PixelBuffer;
use crate::luminance::calculate_luma_u8;

/// Fixed threshold level used by [`to_binary`].
pub const BINARY_THRESHOLD: u8 = 127;

/// Sepia color-mixing matrix, applied as `out = M * [r, g, b]`.
pub const SEPIA_MATRIX: [[f32; 3]; 3] = [
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
];

/// Replace every pixel with its luma, replicated to all three channels.
pub fn to_grayscale(image: &PixelBuffer) -> PixelBuffer {
    image.map_pixels(|[r, g, b]| [calculate_luma_u8(r, g, b); 3])
}

/// Threshold luma at `level`: strictly above becomes white, the rest black.
pub fn threshold(image: &PixelBuffer, level: u8) -> PixelBuffer {
    image.map_pixels(|[r, g, b]| {
        if calculate_luma_u8(r, g, b) > level {
            [255; 3]
        } else {
            [0; 3]
        }
    })
}

/// Binary black/white conversion at [`BINARY_THRESHOLD`].
pub fn to_binary(image: &PixelBuffer) -> PixelBuffer {
    threshold(image, BINARY_THRESHOLD)
}

/// Apply the sepia tone matrix to every pixel, saturating at 255.
pub fn apply_sepia(image: &PixelBuffer) -> PixelBuffer {
    image.map_pixels(|[r, g, b]| {
        let (r, g, b) = (r as f32, g as f32, b as f32);
        SEPIA_MATRIX.map(|row| {
            let mixed = row[0] * r + row[1] * g + row[2] * b;
            mixed.clamp(0.0, 255.0).round() as u8
        })
    })
}
