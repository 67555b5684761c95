//! The composed center-rotate-scale transform, evaluated backwards.
//!
//! Forward, a source point `p` lands at
//!
//! ```text
//! dst = C_dst + R(θ) * s * (p - C_src)
//! ```
//!
//! where `R(θ)` rotates clockwise on screen (y points down). Rendering walks
//! destination pixels, so only the inverse is needed:
//!
//! ```text
//! src_x = ( dx * cos θ + dy * sin θ) / s + C_src_x
//! src_y = (-dx * sin θ + dy * cos θ) / s + C_src_y
//! ```
//!
//! with `(dx, dy) = dst - C_dst`.

/// Inverse mapping from destination to source coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseTransform {
    // Row-major 2x2 linear part, with 1/s folded in.
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    dst_cx: f64,
    dst_cy: f64,
    src_cx: f64,
    src_cy: f64,
}

impl InverseTransform {
    pub fn new(
        src_size: (u32, u32),
        dst_size: (u32, u32),
        rotation_deg: u32,
        scale: f64,
    ) -> Self {
        let (sin, cos) = exact_sin_cos(rotation_deg);
        let inv_scale = 1.0 / scale;
        Self {
            a: cos * inv_scale,
            b: sin * inv_scale,
            c: -sin * inv_scale,
            d: cos * inv_scale,
            dst_cx: dst_size.0 as f64 / 2.0,
            dst_cy: dst_size.1 as f64 / 2.0,
            src_cx: src_size.0 as f64 / 2.0,
            src_cy: src_size.1 as f64 / 2.0,
        }
    }

    /// Map a destination point to continuous source coordinates.
    #[inline]
    pub fn map(&self, x: f64, y: f64) -> (f64, f64) {
        let dx = x - self.dst_cx;
        let dy = y - self.dst_cy;
        (
            self.a * dx + self.b * dy + self.src_cx,
            self.c * dx + self.d * dy + self.src_cy,
        )
    }

    /// Change in source coordinates per one-pixel step along a destination row.
    #[inline]
    pub fn row_step(&self) -> (f64, f64) {
        (self.a, self.c)
    }
}

/// sin/cos with exact values at quarter turns, so 90° steps stay pixel-exact.
fn exact_sin_cos(rotation_deg: u32) -> (f64, f64) {
    match rotation_deg % 360 {
        0 => (0.0, 1.0),
        90 => (1.0, 0.0),
        180 => (0.0, -1.0),
        270 => (-1.0, 0.0),
        deg => (deg as f64).to_radians().sin_cos(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: (f64, f64), b: (f64, f64)) -> bool {
        (a.0 - b.0).abs() < 1e-9 && (a.1 - b.1).abs() < 1e-9
    }

    #[test]
    fn test_identity() {
        let t = InverseTransform::new((10, 6), (10, 6), 0, 1.0);
        assert!(close(t.map(3.5, 2.5), (3.5, 2.5)));
    }

    #[test]
    fn test_centers_align() {
        let t = InverseTransform::new((100, 50), (30, 80), 37, 1.7);
        assert!(close(t.map(15.0, 40.0), (50.0, 25.0)));
    }

    #[test]
    fn test_clockwise_quarter_turn() {
        // Clockwise on screen: the source's top edge ends up on the right.
        // The destination's right-middle therefore samples the source's top-middle.
        let t = InverseTransform::new((10, 10), (10, 10), 90, 1.0);
        assert!(close(t.map(10.0, 5.0), (5.0, 0.0)));
    }

    #[test]
    fn test_scale_shrinks_sampling_footprint() {
        let t = InverseTransform::new((10, 10), (10, 10), 0, 2.0);
        // Two destination pixels per source pixel.
        assert!(close(t.map(7.0, 5.0), (6.0, 5.0)));
        assert!(close(t.row_step(), (0.5, 0.0)));
    }

    #[test]
    fn test_exact_quarter_turns() {
        assert_eq!(exact_sin_cos(0), (0.0, 1.0));
        assert_eq!(exact_sin_cos(270), (-1.0, 0.0));
        let (s, c) = exact_sin_cos(45);
        assert!((s - c).abs() < 1e-12);
    }
}
