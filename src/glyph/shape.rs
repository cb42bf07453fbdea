//! Derived drawing coordinates of a glyph.
//!
//! Everything here is a pure function of the glyph's current width and colour.
//! Coordinates live in the glyph's local box, `(0, 0)` to `(width, width)`.

use glam::Vec2;

use crate::palette::Hsb;

/// Brightness of the three saturation circles (outer to inner)
pub const SAT_CIRCLE_BRIGHTNESS: [f32; 3] = [100.0, 0.0, 100.0];

/// Alpha of the three saturation circles (outer to inner)
pub const SAT_CIRCLE_ALPHA: [f32; 3] = [0.1875, 0.625, 0.375];

/// Linear re-mapping of `value` from one range to another, unclamped
pub fn map_range(value: f32, from_start: f32, from_end: f32, to_start: f32, to_end: f32) -> f32 {
    to_start + (value - from_start) * (to_end - to_start) / (from_end - from_start)
}

/// One of the eight triangles of the hue star
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarPoint {
    pub inner_a: Vec2,
    pub tip: Vec2,
    pub inner_b: Vec2,
}

impl StarPoint {
    /// Same triangle with every coordinate divided by `reducer`
    pub fn reduced(&self, reducer: f32) -> Self {
        Self {
            inner_a: self.inner_a / reducer,
            tip: self.tip / reducer,
            inner_b: self.inner_b / reducer,
        }
    }
}

/// Drawing parameters recomputed on every update
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphShape {
    /// Half the width: the local center on both axes
    pub center: f32,
    /// Diameters of the three saturation circles
    pub circle_sizes: [f32; 3],
    pub star: [StarPoint; 8],
    /// Alpha of the octagon fill
    pub brightness_alpha: f32,
    /// Alpha of the coloured star
    pub hue_alpha: f32,
}

impl GlyphShape {
    pub fn compute(width: f32, colour: Hsb) -> Self {
        let center = width / 2.0;
        let hue = colour.hue;

        let circle_size = map_range(colour.saturation, 100.0, 0.0, width, width / 16.0);

        // Alternating point positions of the horizontal and vertical rays
        let (hori_vert_min, hori_vert_max) = if hue > 179.0 {
            (0.0, width)
        } else {
            (
                map_range(hue, 0.0, 179.0, center, 0.0),
                map_range(hue, 0.0, 179.0, center, width),
            )
        };

        // ...and of the diagonal rays
        let edge = width / 8.0 + width / 32.0;
        let diagonal_min = map_range(hue, 359.0, 180.0, edge, center);
        let diagonal_max = map_range(hue, 359.0, 180.0, width - edge, center);

        let lo = center - width / 32.0;
        let hi = center + width / 32.0;
        let c = center;

        let x1 = [lo, lo, c, hi, lo, lo, c, hi];
        let y1 = [c, lo, lo, lo, c, lo, lo, lo];
        let x2 = [
            c,
            diagonal_max,
            hori_vert_max,
            diagonal_max,
            c,
            diagonal_min,
            hori_vert_min,
            diagonal_min,
        ];
        let y2 = [
            hori_vert_min,
            diagonal_min,
            c,
            diagonal_max,
            hori_vert_max,
            diagonal_max,
            c,
            diagonal_min,
        ];
        let x3 = [hi, hi, c, lo, hi, hi, c, lo];
        let y3 = [c, hi, hi, hi, c, hi, hi, hi];

        let star = std::array::from_fn(|i| StarPoint {
            inner_a: Vec2::new(x1[i], y1[i]),
            tip: Vec2::new(x2[i], y2[i]),
            inner_b: Vec2::new(x3[i], y3[i]),
        });

        Self {
            center,
            circle_sizes: [circle_size, circle_size / 2.0, circle_size / 4.0],
            star,
            brightness_alpha: map_range(colour.brightness, 0.0, 100.0, 0.8, 0.0),
            hue_alpha: map_range(colour.brightness, 100.0, 0.0, 0.9, 0.1),
        }
    }
}
