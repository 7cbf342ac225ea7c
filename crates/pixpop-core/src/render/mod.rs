//! Display geometry and preview rendering.
//!
//! The host hands over the size of its drawing area; rendering fits the
//! current image into it, multiplies by the zoom factor and resamples.
//! Only the part of the scaled image that lands inside the viewport is
//! produced, so a frame never holds more pixels than the viewport.
//! Nothing here touches the stored pixels.

mod resize;

pub use resize::{resize, FilterType, ResizeError};

use serde::{Deserialize, Serialize};

use crate::decode::PixelBuffer;
use crate::transform::sample_bilinear;

/// Largest drawn side a plan may have; beyond it `f64` loses whole pixels.
const MAX_PLAN_EXTENT: f64 = (1u64 << 52) as f64;

/// Size of the host's drawing area in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Where and how large the image is drawn inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderPlan {
    /// Fit-to-viewport scale multiplied by the zoom factor.
    pub scale: f64,
    /// Drawn width in pixels, possibly far larger than the viewport.
    pub width: u64,
    /// Drawn height in pixels, possibly far larger than the viewport.
    pub height: u64,
    /// Left edge relative to the viewport; negative when zoomed past it.
    pub offset_x: i64,
    /// Top edge relative to the viewport; negative when zoomed past it.
    pub offset_y: i64,
}

impl RenderPlan {
    /// Compute the centered placement of an image in `viewport`.
    ///
    /// Returns `None` when either side would be drawn at zero pixels, which
    /// includes empty images and empty viewports, or would be too large to
    /// address.
    pub fn compute(image_width: u32, image_height: u32, viewport: Viewport, zoom: f64) -> Option<Self> {
        if image_width == 0 || image_height == 0 || viewport.is_empty() {
            return None;
        }

        let scale = fit_scale(image_width, image_height, viewport) * zoom;
        if !scale.is_finite() || scale <= 0.0 {
            return None;
        }

        let width = (image_width as f64 * scale).floor();
        let height = (image_height as f64 * scale).floor();
        if width < 1.0 || height < 1.0 || width > MAX_PLAN_EXTENT || height > MAX_PLAN_EXTENT {
            return None;
        }
        let (width, height) = (width as u64, height as u64);

        Some(Self {
            scale,
            width,
            height,
            offset_x: (viewport.width as i64 - width as i64).div_euclid(2),
            offset_y: (viewport.height as i64 - height as i64).div_euclid(2),
        })
    }

    /// The part of the drawn image that falls inside `viewport`.
    pub fn visible_rect(&self, viewport: Viewport) -> Option<VisibleRect> {
        let (x0, x1) = visible_span(self.offset_x, self.width, viewport.width)?;
        let (y0, y1) = visible_span(self.offset_y, self.height, viewport.height)?;
        Some(VisibleRect {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        })
    }
}

/// `[start, end)` of a drawn span clipped to `0..limit`.
fn visible_span(offset: i64, len: u64, limit: u32) -> Option<(u32, u32)> {
    let start = offset.max(0);
    let end = offset.saturating_add(len as i64).min(limit as i64);
    if start >= end {
        return None;
    }
    Some((start as u32, end as u32))
}

/// A rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Largest scale at which the whole image fits the viewport.
pub fn fit_scale(image_width: u32, image_height: u32, viewport: Viewport) -> f64 {
    let sx = viewport.width as f64 / image_width as f64;
    let sy = viewport.height as f64 / image_height as f64;
    sx.min(sy)
}

/// A resampled preview ready to blit at `area.x`, `area.y`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFrame {
    pub plan: RenderPlan,
    /// Where `image` goes in the viewport; its size matches `image`.
    pub area: VisibleRect,
    pub image: PixelBuffer,
}

/// Produce the preview of `current` for `viewport` at `zoom`.
///
/// `Ok(None)` means there is nothing to draw and the host should clear its
/// canvas.
pub fn render(
    current: Option<&PixelBuffer>,
    viewport: Viewport,
    zoom: f64,
    filter: FilterType,
) -> Result<Option<RenderedFrame>, ResizeError> {
    let Some(image) = current else {
        return Ok(None);
    };

    if image.pixels.len() != image.pixel_count() * 3 {
        return Err(ResizeError::BufferMismatch);
    }

    let Some(plan) = RenderPlan::compute(image.width, image.height, viewport, zoom) else {
        return Ok(None);
    };
    let Some(area) = plan.visible_rect(viewport) else {
        return Ok(None);
    };

    let image = if plan.offset_x >= 0 && plan.offset_y >= 0 {
        // The whole image fits, so the area is the full plan
        resize(image, area.width, area.height, filter)?
    } else {
        resample_area(image, &plan, area, filter)
    };
    Ok(Some(RenderedFrame { plan, area, image }))
}

/// Resample only the viewport-sized window of a plan larger than the viewport.
///
/// Lanczos3 falls back to bilinear here; at these magnifications the two
/// are indistinguishable.
fn resample_area(
    image: &PixelBuffer,
    plan: &RenderPlan,
    area: VisibleRect,
    filter: FilterType,
) -> PixelBuffer {
    let sx = plan.width as f64 / image.width as f64;
    let sy = plan.height as f64 / image.height as f64;

    let mut output = Vec::with_capacity(area.width as usize * area.height as usize * 3);
    for y in 0..area.height {
        let drawn_y = (area.y + y) as i64 - plan.offset_y;
        let src_y = (drawn_y as f64 + 0.5) / sy - 0.5;

        for x in 0..area.width {
            let drawn_x = (area.x + x) as i64 - plan.offset_x;
            let src_x = (drawn_x as f64 + 0.5) / sx - 0.5;

            let rgb = match filter {
                FilterType::Nearest => image.pixel(
                    nearest(src_x, image.width),
                    nearest(src_y, image.height),
                ),
                FilterType::Bilinear | FilterType::Lanczos3 => {
                    sample_bilinear(image, src_x, src_y)
                }
            };
            output.extend_from_slice(&rgb);
        }
    }

    PixelBuffer::new(area.width, area.height, output)
}

fn nearest(coord: f64, len: u32) -> u32 {
    (coord.round().max(0.0) as u32).min(len - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_scale_uses_tighter_axis() {
        assert_eq!(fit_scale(200, 100, Viewport::new(100, 100)), 0.5);
        assert_eq!(fit_scale(100, 200, Viewport::new(400, 300)), 1.5);
    }

    #[test]
    fn test_plan_centers_image() {
        let plan = RenderPlan::compute(200, 100, Viewport::new(100, 100), 1.0).unwrap();
        assert_eq!((plan.width, plan.height), (100, 50));
        assert_eq!((plan.offset_x, plan.offset_y), (0, 25));
    }

    #[test]
    fn test_plan_applies_zoom() {
        let plan = RenderPlan::compute(100, 100, Viewport::new(100, 100), 2.0).unwrap();
        assert_eq!((plan.width, plan.height), (200, 200));
        assert_eq!((plan.offset_x, plan.offset_y), (-50, -50));
    }

    #[test]
    fn test_plan_skips_degenerate_sizes() {
        assert!(RenderPlan::compute(100, 100, Viewport::new(0, 100), 1.0).is_none());
        assert!(RenderPlan::compute(0, 100, Viewport::new(100, 100), 1.0).is_none());
        // 1000x1 into a 10x10 viewport scales the height below one pixel
        assert!(RenderPlan::compute(1000, 1, Viewport::new(10, 10), 1.0).is_none());
    }

    #[test]
    fn test_render_empty_document() {
        let frame = render(None, Viewport::new(640, 480), 1.0, FilterType::Bilinear).unwrap();
        assert!(frame.is_none());
    }

    #[test]
    fn test_render_resamples_to_plan() {
        let img = PixelBuffer::filled(40, 20, [10, 200, 30]);
        let frame = render(Some(&img), Viewport::new(100, 100), 1.0, FilterType::Bilinear)
            .unwrap()
            .unwrap();
        assert_eq!((frame.plan.width, frame.plan.height), (100, 50));
        assert_eq!((frame.image.width, frame.image.height), (100, 50));
        assert_eq!((frame.area.x, frame.area.y), (0, 25));
        assert_eq!(frame.image.pixel(50, 25), [10, 200, 30]);
    }

    #[test]
    fn test_render_leaves_source_untouched() {
        let img = PixelBuffer::filled(8, 8, [1, 2, 3]);
        let before = img.clone();
        let _ = render(Some(&img), Viewport::new(3, 3), 0.5, FilterType::Nearest).unwrap();
        assert_eq!(img, before);
    }

    #[test]
    fn test_visible_rect_clips_to_viewport() {
        let plan = RenderPlan::compute(100, 100, Viewport::new(100, 100), 2.0).unwrap();
        let area = plan.visible_rect(Viewport::new(100, 100)).unwrap();
        assert_eq!(area, VisibleRect { x: 0, y: 0, width: 100, height: 100 });

        let plan = RenderPlan::compute(200, 100, Viewport::new(100, 100), 1.0).unwrap();
        let area = plan.visible_rect(Viewport::new(100, 100)).unwrap();
        assert_eq!(area, VisibleRect { x: 0, y: 25, width: 100, height: 50 });
    }

    #[test]
    fn test_render_zoomed_crops_center() {
        // Left half red, right half blue
        let mut img = PixelBuffer::filled(10, 10, [255, 0, 0]);
        for y in 0..10 {
            for x in 5..10 {
                let idx = img.index(x, y);
                img.pixels[idx..idx + 3].copy_from_slice(&[0, 0, 255]);
            }
        }

        for filter in [FilterType::Nearest, FilterType::Bilinear] {
            let frame = render(Some(&img), Viewport::new(10, 10), 2.0, filter)
                .unwrap()
                .unwrap();
            assert_eq!((frame.plan.width, frame.plan.height), (20, 20));
            assert_eq!((frame.area.x, frame.area.y), (0, 0));
            assert_eq!((frame.image.width, frame.image.height), (10, 10));
            assert_eq!(frame.image.pixel(0, 0), [255, 0, 0]);
            assert_eq!(frame.image.pixel(9, 9), [0, 0, 255]);
        }
    }

    #[test]
    fn test_render_huge_zoom_stays_viewport_sized() {
        let img = PixelBuffer::filled(10, 10, [7, 8, 9]);
        let frame = render(Some(&img), Viewport::new(64, 48), 1e9, FilterType::Lanczos3)
            .unwrap()
            .unwrap();
        assert!(frame.plan.width > u32::MAX as u64);
        assert_eq!((frame.image.width, frame.image.height), (64, 48));
        assert_eq!(frame.image.pixel(32, 24), [7, 8, 9]);
    }

    #[test]
    fn test_render_rejects_mismatched_buffer() {
        let img = PixelBuffer::new(4, 4, vec![0; 5]);
        let result = render(Some(&img), Viewport::new(10, 10), 1.0, FilterType::Nearest);
        assert_eq!(result, Err(ResizeError::BufferMismatch));
    }
}
