//! Convolution filters: Gaussian blur and sharpen.
//!
//! Borders are handled by reflect-101 (`gfedcb|abcdefgh|gfedcba`), so a
//! uniform image stays uniform under any normalized kernel.

use crate::decode::PixelBuffer;

/// Kernel size of the blur effect.
pub const BLUR_KERNEL_SIZE: usize = 15;

/// Sharpen kernel, row-major.
pub const SHARPEN_KERNEL: [[f32; 3]; 3] = [[0.0, -1.0, 0.0], [-1.0, 5.0, -1.0], [0.0, -1.0, 0.0]];

/// Sigma implied by a kernel size when none is given explicitly.
///
/// `sigma = 0.3 * ((ksize - 1) * 0.5 - 1) + 0.8`
pub fn sigma_for_kernel_size(ksize: usize) -> f32 {
    0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Build a normalized 1-D Gaussian kernel.
pub fn gaussian_kernel(ksize: usize, sigma: f32) -> Vec<f32> {
    let center = (ksize as f32 - 1.0) / 2.0;
    let denom = 2.0 * sigma * sigma;
    let mut kernel: Vec<f32> = (0..ksize)
        .map(|i| {
            let d = i as f32 - center;
            (-(d * d) / denom).exp()
        })
        .collect();
    let sum: f32 = kernel.iter().sum();
    for w in &mut kernel {
        *w /= sum;
    }
    kernel
}

/// Map an out-of-range coordinate back inside `0..len` by reflect-101.
#[inline]
fn reflect_101(mut i: isize, len: usize) -> usize {
    let len = len as isize;
    if len == 1 {
        return 0;
    }
    loop {
        if i < 0 {
            i = -i;
        } else if i >= len {
            i = 2 * (len - 1) - i;
        } else {
            return i as usize;
        }
    }
}

/// Blur with the fixed 15x15 Gaussian kernel.
pub fn gaussian_blur(image: &PixelBuffer) -> PixelBuffer {
    let kernel = gaussian_kernel(BLUR_KERNEL_SIZE, sigma_for_kernel_size(BLUR_KERNEL_SIZE));
    separable_convolve(image, &kernel)
}

/// Convolve rows then columns with the same 1-D kernel.
fn separable_convolve(image: &PixelBuffer, kernel: &[f32]) -> PixelBuffer {
    if image.is_empty() {
        return image.clone();
    }

    let (w, h) = (image.width as usize, image.height as usize);
    let radius = (kernel.len() / 2) as isize;

    // Horizontal pass into a float buffer to avoid rounding twice
    let mut horizontal = vec![0.0f32; w * h * 3];
    for y in 0..h {
        let row = &image.pixels[y * w * 3..(y + 1) * w * 3];
        for x in 0..w {
            let mut acc = [0.0f32; 3];
            for (k, weight) in kernel.iter().enumerate() {
                let sx = reflect_101(x as isize + k as isize - radius, w);
                for c in 0..3 {
                    acc[c] += row[sx * 3 + c] as f32 * weight;
                }
            }
            let idx = (y * w + x) * 3;
            horizontal[idx..idx + 3].copy_from_slice(&acc);
        }
    }

    let mut output = vec![0u8; w * h * 3];
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0.0f32; 3];
            for (k, weight) in kernel.iter().enumerate() {
                let sy = reflect_101(y as isize + k as isize - radius, h);
                let idx = (sy * w + x) * 3;
                for c in 0..3 {
                    acc[c] += horizontal[idx + c] * weight;
                }
            }
            let idx = (y * w + x) * 3;
            for c in 0..3 {
                output[idx + c] = acc[c].clamp(0.0, 255.0).round() as u8;
            }
        }
    }

    PixelBuffer::new(image.width, image.height, output)
}

/// Sharpen with [`SHARPEN_KERNEL`], saturating to 0..=255.
pub fn sharpen(image: &PixelBuffer) -> PixelBuffer {
    convolve_3x3(image, &SHARPEN_KERNEL)
}

fn convolve_3x3(image: &PixelBuffer, kernel: &[[f32; 3]; 3]) -> PixelBuffer {
    if image.is_empty() {
        return image.clone();
    }

    let (w, h) = (image.width as usize, image.height as usize);
    let mut output = vec![0u8; w * h * 3];

    for y in 0..h {
        for x in 0..w {
            let mut acc = [0.0f32; 3];
            for (ky, kernel_row) in kernel.iter().enumerate() {
                let sy = reflect_101(y as isize + ky as isize - 1, h);
                for (kx, weight) in kernel_row.iter().enumerate() {
                    if *weight == 0.0 {
                        continue;
                    }
                    let sx = reflect_101(x as isize + kx as isize - 1, w);
                    let idx = (sy * w + sx) * 3;
                    for c in 0..3 {
                        acc[c] += image.pixels[idx + c] as f32 * weight;
                    }
                }
            }
            let idx = (y * w + x) * 3;
            for c in 0..3 {
                output[idx + c] = acc[c].clamp(0.0, 255.0).round() as u8;
            }
        }
    }

    PixelBuffer::new(image.width, image.height, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkerboard(size: u32) -> PixelBuffer {
        let mut pixels = Vec::with_capacity((size * size * 3) as usize);
        for y in 0..size {
            for x in 0..size {
                let v = if (x + y) % 2 == 0 { 255 } else { 0 };
                pixels.extend_from_slice(&[v, v, v]);
            }
        }
        PixelBuffer::new(size, size, pixels)
    }

    #[test]
    fn test_sigma_for_blur_kernel() {
        assert!((sigma_for_kernel_size(15) - 2.6).abs() < 1e-5);
    }

    #[test]
    fn test_gaussian_kernel_normalized_and_symmetric() {
        let kernel = gaussian_kernel(15, 2.6);
        assert_eq!(kernel.len(), 15);
        let sum: f32 = kernel.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        for i in 0..7 {
            assert!((kernel[i] - kernel[14 - i]).abs() < 1e-7);
        }
        assert!(kernel[7] > kernel[6]);
    }

    #[test]
    fn test_reflect_101() {
        assert_eq!(reflect_101(-1, 5), 1);
        assert_eq!(reflect_101(-2, 5), 2);
        assert_eq!(reflect_101(5, 5), 3);
        assert_eq!(reflect_101(6, 5), 2);
        assert_eq!(reflect_101(3, 5), 3);
        assert_eq!(reflect_101(-7, 1), 0);
        // Offsets larger than the image bounce more than once
        assert_eq!(reflect_101(-9, 3), 1);
    }

    #[test]
    fn test_blur_uniform_image_unchanged() {
        let img = PixelBuffer::filled(20, 10, [90, 150, 210]);
        assert_eq!(gaussian_blur(&img), img);
    }

    #[test]
    fn test_blur_smooths_checkerboard() {
        let img = checkerboard(16);
        let blurred = gaussian_blur(&img);
        for &c in &blurred.pixels {
            assert!((100..=155).contains(&c), "value {c} not smoothed");
        }
    }

    #[test]
    fn test_blur_tiny_images() {
        let one = PixelBuffer::filled(1, 1, [10, 20, 30]);
        assert_eq!(gaussian_blur(&one), one);
        let thin = PixelBuffer::filled(3, 1, [5, 5, 5]);
        assert_eq!(gaussian_blur(&thin), thin);
    }

    #[test]
    fn test_sharpen_uniform_image_unchanged() {
        let img = PixelBuffer::filled(7, 5, [40, 128, 250]);
        assert_eq!(sharpen(&img), img);
    }

    #[test]
    fn test_sharpen_increases_local_contrast() {
        // Bright center pixel on a mid-gray field
        let mut img = PixelBuffer::filled(3, 3, [100, 100, 100]);
        let idx = img.index(1, 1);
        img.pixels[idx..idx + 3].copy_from_slice(&[140, 140, 140]);

        let result = sharpen(&img);
        // 5*140 - 4*100 = 300 -> saturates
        assert_eq!(result.pixel(1, 1), [255, 255, 255]);
        // Top edge reflects the center row back in: 5*100 - (2*140 + 2*100) = 20
        assert_eq!(result.pixel(1, 0), [20, 20, 20]);
        // Corners never see the center: 5*100 - 4*100 = 100
        assert_eq!(result.pixel(0, 0), [100, 100, 100]);
    }

    #[test]
    fn test_sharpen_preserves_dimensions() {
        let img = checkerboard(9);
        let result = sharpen(&img);
        assert_eq!((result.width, result.height), (9, 9));
        assert!(result.pixels.iter().all(|&c| c == 0 || c == 255));
    }
}
