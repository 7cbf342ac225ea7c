//! 8-bit HSV conversion.
//!
//! Channels follow the common 8-bit layout: hue is stored in half degrees
//! (0..180) so it fits a byte, saturation and value span 0..=255.

/// One pixel in 8-bit HSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsv8 {
    /// Hue in half degrees (0..180).
    pub h: u8,
    /// Saturation (0..=255).
    pub s: u8,
    /// Value, the largest RGB channel (0..=255).
    pub v: u8,
}

/// Convert an RGB pixel to 8-bit HSV.
pub fn rgb_to_hsv(rgb: [u8; 3]) -> Hsv8 {
    let [r, g, b] = rgb.map(|c| c as f32);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let s = if max > 0.0 {
        (delta * 255.0 / max).round()
    } else {
        0.0
    };

    let h = if delta == 0.0 {
        0.0
    } else {
        let degrees = if max == r {
            60.0 * (g - b) / delta
        } else if max == g {
            120.0 + 60.0 * (b - r) / delta
        } else {
            240.0 + 60.0 * (r - g) / delta
        };
        let mut half = (degrees / 2.0).round();
        if half < 0.0 {
            half += 180.0;
        }
        if half >= 180.0 {
            half -= 180.0;
        }
        half
    };

    Hsv8 {
        h: h as u8,
        s: s as u8,
        v: max as u8,
    }
}

/// Convert an 8-bit HSV pixel back to RGB.
pub fn hsv_to_rgb(hsv: Hsv8) -> [u8; 3] {
    let v = hsv.v as f32 / 255.0;
    let s = hsv.s as f32 / 255.0;

    if hsv.s == 0 {
        return [hsv.v; 3];
    }

    let sector_pos = (hsv.h as f32 * 2.0 / 60.0) % 6.0;
    let sector = sector_pos.floor();
    let f = sector_pos - sector;

    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector as u8 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    [r, g, b].map(|c| (c * 255.0).clamp(0.0, 255.0).round() as u8)
}
