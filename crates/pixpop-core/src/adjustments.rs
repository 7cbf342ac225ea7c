//! Tonal adjustments: brightness, contrast and color pop.
//!
//! Brightness and color pop work on the HSV value and saturation channels
//! so hue is preserved; contrast scales raw RGB.

use crate::decode::PixelBuffer;
use crate::hsv::{hsv_to_rgb, rgb_to_hsv};

/// Accepted brightness offset range.
pub const BRIGHTNESS_RANGE: (i32, i32) = (-100, 100);

/// Accepted contrast factor range.
pub const CONTRAST_RANGE: (f32, f32) = (0.5, 2.0);

/// Saturation multiplier used by [`apply_color_pop`].
pub const COLOR_POP_SATURATION: f32 = 1.5;

/// Shift the HSV value channel by `offset`.
///
/// The offset is clamped to [`BRIGHTNESS_RANGE`]. Positive offsets push
/// values above `255 - offset` straight to 255 and add to the rest; negative
/// offsets drop values below `|offset|` to 0 and subtract from the rest.
///
/// # Example
/// ```
/// use pixpop_core::{adjustments::apply_brightness, PixelBuffer};
///
/// let img = PixelBuffer::filled(1, 1, [200, 200, 200]);
/// assert_eq!(apply_brightness(&img, 100).pixel(0, 0), [255, 255, 255]);
/// ```
pub fn apply_brightness(image: &PixelBuffer, offset: i32) -> PixelBuffer {
    let offset = offset.clamp(BRIGHTNESS_RANGE.0, BRIGHTNESS_RANGE.1);
    if offset == 0 {
        return image.clone();
    }

    image.map_pixels(|rgb| {
        let mut hsv = rgb_to_hsv(rgb);
        hsv.v = shift_value(hsv.v, offset);
        hsv_to_rgb(hsv)
    })
}

#[inline]
fn shift_value(v: u8, offset: i32) -> u8 {
    let v = v as i32;
    if offset > 0 {
        let limit = 255 - offset;
        if v > limit {
            255
        } else {
            (v + offset) as u8
        }
    } else {
        let amount = -offset;
        if v < amount {
            0
        } else {
            (v - amount) as u8
        }
    }
}

/// Scale every channel by `factor` with no offset, saturating to 0..=255.
///
/// The factor is clamped to [`CONTRAST_RANGE`].
pub fn apply_contrast(image: &PixelBuffer, factor: f32) -> PixelBuffer {
    let factor = if factor.is_finite() {
        factor.clamp(CONTRAST_RANGE.0, CONTRAST_RANGE.1)
    } else {
        1.0
    };

    image.map_pixels(|rgb| rgb.map(|c| (c as f32 * factor).abs().clamp(0.0, 255.0).round() as u8))
}

/// Boost saturation by [`COLOR_POP_SATURATION`].
///
/// Saturation is clamped to the channel range both before and after
/// scaling so no value can wrap.
pub fn apply_color_pop(image: &PixelBuffer) -> PixelBuffer {
    image.map_pixels(|rgb| {
        let mut hsv = rgb_to_hsv(rgb);
        let saturation = (hsv.s as f32).clamp(0.0, 255.0);
        hsv.s = (saturation * COLOR_POP_SATURATION).clamp(0.0, 255.0).round() as u8;
        hsv_to_rgb(hsv)
    })
}
