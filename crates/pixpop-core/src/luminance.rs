//! Luma calculation using ITU-R BT.601 coefficients.
//!
//! Grayscale and binary conversion both reduce a pixel to a single intensity
//! with these weights.

/// ITU-R BT.601 coefficient for red channel.
pub const LUMA_R: f32 = 0.299;

/// ITU-R BT.601 coefficient for green channel.
pub const LUMA_G: f32 = 0.587;

/// ITU-R BT.601 coefficient for blue channel.
pub const LUMA_B: f32 = 0.114;

/// Calculate luma from u8 RGB values (0 to 255).
///
/// # Returns
/// Luma value (0-255), rounded to nearest
#[inline]
pub fn calculate_luma_u8(r: u8, g: u8, b: u8) -> u8 {
    let luma = LUMA_R * r as f32 + LUMA_G * g as f32 + LUMA_B * b as f32;
    luma.clamp(0.0, 255.0).round() as u8
}
