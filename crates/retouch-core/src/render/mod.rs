//! Render engine: `(SourceImage, EditState) -> RenderTarget`.
//!
//! # Order of operations
//!
//! 1. Allocate a `target_width x target_height` RGBA buffer, cleared to transparent
//! 2. Put the origin at the buffer center
//! 3. Rotate by `rotation_deg`, clockwise on screen
//! 4. Scale uniformly by `scale_percent / 100`
//! 5. Center the source on that origin
//! 6. Multiply RGB by `brightness_percent / 100` (alpha untouched)
//! 7. Composite the result into the buffer
//!
//! Steps 2-5 form a single affine transform. The buffer is walked once and
//! each output pixel center is mapped back into the source, so rotation and
//! scale never resample twice.
//!
//! The source is drawn at its natural size times the scale. Changing the
//! target dimensions resizes the canvas around the image, it does not stretch
//! the image.

mod affine;
mod sample;

pub use affine::InverseTransform;
pub use sample::InterpolationFilter;

use crate::decode::DecodedImage;
use crate::params::EditState;

/// A fully rendered RGBA buffer of exactly `width * height` pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTarget {
    pub width: u32,
    pub height: u32,
    /// Straight-alpha RGBA, row-major, 4 bytes per pixel.
    pub pixels: Vec<u8>,
}

impl RenderTarget {
    /// A fully transparent target, or `None` if its byte length does not
    /// fit in `usize`.
    pub fn blank(width: u32, height: u32) -> Option<Self> {
        let len = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        Some(Self {
            width,
            height,
            pixels: vec![0u8; len],
        })
    }

    /// RGBA value at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y as usize) * (self.width as usize) + x as usize) * 4;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }
}

/// Render `source` through `state` with the given interpolation filter.
pub fn render(
    source: &DecodedImage,
    state: &EditState,
    filter: InterpolationFilter,
) -> RenderTarget {
    let (width, height) = (state.target_width, state.target_height);
    let Some(mut target) = RenderTarget::blank(width, height) else {
        log::warn!("cannot allocate a {width}x{height} render target");
        return RenderTarget {
            width: 0,
            height: 0,
            pixels: Vec::new(),
        };
    };

    if source.is_empty() || width == 0 || height == 0 {
        return target;
    }

    let transform = InverseTransform::new(
        (source.width, source.height),
        (width, height),
        state.rotation_deg,
        state.scale_factor(),
    );
    let (step_u, step_v) = transform.row_step();
    let brightness = state.brightness_factor();

    for (y, row) in target
        .pixels
        .chunks_exact_mut(width as usize * 4)
        .enumerate()
    {
        let (u0, v0) = transform.map(0.5, y as f64 + 0.5);
        for (x, out) in row.chunks_exact_mut(4).enumerate() {
            let u = u0 + x as f64 * step_u;
            let v = v0 + x as f64 * step_v;
            let mut px = sample::sample(source, u, v, filter);
            if px[3] == 0 {
                continue;
            }
            apply_brightness(&mut px, brightness);
            out.copy_from_slice(&px);
        }
    }

    log::debug!(
        "rendered {}x{} (rotation {}°, scale {}%, brightness {}%)",
        width,
        height,
        state.rotation_deg,
        state.scale_percent,
        state.brightness_percent
    );
    target
}

/// Multiply RGB by `factor`, saturating at the channel range.
#[inline]
fn apply_brightness(px: &mut [u8; 4], factor: f32) {
    if factor == 1.0 {
        return;
    }
    for channel in px.iter_mut().take(3) {
        *channel = (*channel as f32 * factor).round().clamp(0.0, 255.0) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::OutputFormat;

    fn state(width: u32, height: u32) -> EditState {
        EditState {
            target_width: width,
            target_height: height,
            rotation_deg: 0,
            scale_percent: 100.0,
            brightness_percent: 100.0,
            output_format: OutputFormat::Png,
            output_quality: 90.0,
        }
    }

    /// Opaque image where every pixel encodes its own position.
    fn coordinate_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[x as u8, y as u8, 100, 255]);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_identity_reproduces_source() {
        let src = coordinate_image(7, 5);
        for filter in [InterpolationFilter::Nearest, InterpolationFilter::Bilinear] {
            let out = render(&src, &state(7, 5), filter);
            assert_eq!(out.pixels, src.pixels, "filter {:?}", filter);
        }
    }

    #[test]
    fn test_target_size_matches_state() {
        let src = coordinate_image(10, 10);
        let out = render(&src, &state(31, 17), InterpolationFilter::Bilinear);
        assert_eq!((out.width, out.height), (31, 17));
        assert_eq!(out.byte_length(), 31 * 17 * 4);
    }

    #[test]
    fn test_larger_canvas_pads_with_transparency() {
        let src = coordinate_image(4, 4);
        let out = render(&src, &state(8, 8), InterpolationFilter::Nearest);
        assert_eq!(out.pixel(0, 0), [0, 0, 0, 0]);
        assert_eq!(out.pixel(7, 7), [0, 0, 0, 0]);
        // Source is centered: its (0, 0) lands at (2, 2).
        assert_eq!(out.pixel(2, 2), [0, 0, 100, 255]);
        assert_eq!(out.pixel(5, 5), [3, 3, 100, 255]);
    }

    #[test]
    fn test_smaller_canvas_crops_around_center() {
        let src = coordinate_image(6, 6);
        let out = render(&src, &state(2, 2), InterpolationFilter::Nearest);
        assert_eq!(out.pixel(0, 0), [2, 2, 100, 255]);
        assert_eq!(out.pixel(1, 1), [3, 3, 100, 255]);
    }

    #[test]
    fn test_rotate_90_clockwise() {
        // 3x2 source rendered into a 2x3 canvas, rotated clockwise.
        let src = coordinate_image(3, 2);
        let mut st = state(2, 3);
        st.rotation_deg = 90;
        let out = render(&src, &st, InterpolationFilter::Nearest);

        // Clockwise: the source's bottom-left corner becomes the top-left.
        assert_eq!(out.pixel(0, 0), [0, 1, 100, 255]);
        assert_eq!(out.pixel(1, 0), [0, 0, 100, 255]);
        assert_eq!(out.pixel(0, 2), [2, 1, 100, 255]);
        assert_eq!(out.pixel(1, 2), [2, 0, 100, 255]);
    }

    #[test]
    fn test_rotate_180() {
        let src = coordinate_image(3, 2);
        let mut st = state(3, 2);
        st.rotation_deg = 180;
        let out = render(&src, &st, InterpolationFilter::Bilinear);
        assert_eq!(out.pixel(0, 0), [2, 1, 100, 255]);
        assert_eq!(out.pixel(2, 1), [0, 0, 100, 255]);
    }

    #[test]
    fn test_half_scale_leaves_border() {
        let src = coordinate_image(8, 8);
        let mut st = state(8, 8);
        st.scale_percent = 50.0;
        let out = render(&src, &st, InterpolationFilter::Nearest);
        // The image now covers the middle 4x4.
        assert_eq!(out.pixel(1, 1)[3], 0);
        assert_eq!(out.pixel(2, 2)[3], 255);
        assert_eq!(out.pixel(5, 5)[3], 255);
        assert_eq!(out.pixel(6, 6)[3], 0);
    }

    #[test]
    fn test_double_scale_magnifies_center() {
        let src = coordinate_image(8, 8);
        let mut st = state(8, 8);
        st.scale_percent = 200.0;
        let out = render(&src, &st, InterpolationFilter::Nearest);
        assert_eq!(out.pixel(0, 0), [2, 2, 100, 255]);
        assert_eq!(out.pixel(1, 1), [2, 2, 100, 255]);
        assert_eq!(out.pixel(7, 7), [5, 5, 100, 255]);
    }

    #[test]
    fn test_brightness_scales_rgb_not_alpha() {
        let src = DecodedImage::new(1, 1, vec![100, 50, 200, 128]);
        let mut st = state(1, 1);

        st.brightness_percent = 50.0;
        let out = render(&src, &st, InterpolationFilter::Nearest);
        assert_eq!(out.pixel(0, 0), [50, 25, 100, 128]);

        st.brightness_percent = 200.0;
        let out = render(&src, &st, InterpolationFilter::Nearest);
        assert_eq!(out.pixel(0, 0), [200, 100, 255, 128]);

        st.brightness_percent = 0.0;
        let out = render(&src, &st, InterpolationFilter::Nearest);
        assert_eq!(out.pixel(0, 0), [0, 0, 0, 128]);
    }

    #[test]
    fn test_brightness_leaves_background_transparent() {
        let src = coordinate_image(2, 2);
        let mut st = state(4, 4);
        st.brightness_percent = 200.0;
        let out = render(&src, &st, InterpolationFilter::Nearest);
        assert_eq!(out.pixel(0, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn test_45_degree_rotation_clears_corners() {
        let src = DecodedImage::new(20, 20, vec![255u8; 20 * 20 * 4]);
        let mut st = state(20, 20);
        st.rotation_deg = 45;
        let out = render(&src, &st, InterpolationFilter::Bilinear);
        assert_eq!(out.pixel(0, 0)[3], 0);
        assert_eq!(out.pixel(19, 19)[3], 0);
        assert_eq!(out.pixel(10, 10), [255, 255, 255, 255]);
    }

    #[test]
    fn test_render_is_deterministic() {
        let src = coordinate_image(16, 9);
        let mut st = state(12, 20);
        st.rotation_deg = 30;
        st.scale_percent = 73.0;
        st.brightness_percent = 140.0;
        let a = render(&src, &st, InterpolationFilter::Bilinear);
        let b = render(&src, &st, InterpolationFilter::Bilinear);
        assert_eq!(a, b);
    }

    #[test]
    fn test_blank_size_overflow() {
        assert!(RenderTarget::blank(u32::MAX, u32::MAX).is_none());
        let target = RenderTarget::blank(3, 2).unwrap();
        assert_eq!(target.byte_length(), 24);
    }

    #[test]
    fn test_empty_source_renders_blank() {
        let src = DecodedImage::new(0, 0, vec![]);
        let out = render(&src, &state(3, 3), InterpolationFilter::Bilinear);
        assert!(out.pixels.iter().all(|&b| b == 0));
    }
}
