//! Pixel sampling with transparent borders.
//!
//! Coordinates are continuous: pixel `(i, j)` covers `[i, i+1) x [j, j+1)`
//! and its center sits at `(i + 0.5, j + 0.5)`. Anything outside the source
//! is fully transparent, so rotated or shrunk images leave clear space around
//! them instead of smearing edge pixels.

use crate::decode::DecodedImage;

/// Interpolation filter for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationFilter {
    /// Nearest neighbour: hard edges, exact source colors.
    Nearest,
    /// Bilinear over premultiplied alpha: smooth edges, like a browser canvas.
    #[default]
    Bilinear,
}

/// Sample `image` at continuous coordinates `(u, v)`.
#[inline]
pub fn sample(image: &DecodedImage, u: f64, v: f64, filter: InterpolationFilter) -> [u8; 4] {
    match filter {
        InterpolationFilter::Nearest => sample_nearest(image, u, v),
        InterpolationFilter::Bilinear => sample_bilinear(image, u, v),
    }
}

fn sample_nearest(image: &DecodedImage, u: f64, v: f64) -> [u8; 4] {
    if u < 0.0 || v < 0.0 {
        return [0; 4];
    }
    let (x, y) = (u.floor() as usize, v.floor() as usize);
    if x >= image.width as usize || y >= image.height as usize {
        return [0; 4];
    }
    image.pixel(x, y)
}

fn sample_bilinear(image: &DecodedImage, u: f64, v: f64) -> [u8; 4] {
    // Shift to pixel-center space so integer positions hit centers exactly.
    let x = u - 0.5;
    let y = v - 0.5;

    let (w, h) = (image.width as i64, image.height as i64);
    if x <= -1.0 || y <= -1.0 || x >= w as f64 || y >= h as f64 {
        return [0; 4];
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let taps = [
        (x0, y0, (1.0 - fx) * (1.0 - fy)),
        (x0 + 1, y0, fx * (1.0 - fy)),
        (x0, y0 + 1, (1.0 - fx) * fy),
        (x0 + 1, y0 + 1, fx * fy),
    ];

    // Accumulate premultiplied color so transparent neighbours don't bleed black.
    let mut acc = [0.0f64; 4];
    for (px, py, weight) in taps {
        if weight == 0.0 || px < 0 || py < 0 || px >= w || py >= h {
            continue;
        }
        let p = image.pixel(px as usize, py as usize);
        let alpha = p[3] as f64 * weight;
        acc[0] += p[0] as f64 * alpha;
        acc[1] += p[1] as f64 * alpha;
        acc[2] += p[2] as f64 * alpha;
        acc[3] += alpha;
    }

    if acc[3] <= f64::EPSILON {
        return [0; 4];
    }

    [
        (acc[0] / acc[3]).round().clamp(0.0, 255.0) as u8,
        (acc[1] / acc[3]).round().clamp(0.0, 255.0) as u8,
        (acc[2] / acc[3]).round().clamp(0.0, 255.0) as u8,
        acc[3].round().clamp(0.0, 255.0) as u8,
    ]
}
