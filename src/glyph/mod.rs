//! A single procedurally drawn glyph.
//!
//! The glyph encodes one HSB colour as geometry: saturation sets the size of
//! three translucent concentric circles, hue shapes an eight-point star, and
//! brightness sets how opaque the octagon and star are.

mod shape;

pub use shape::{map_range, GlyphShape, StarPoint, SAT_CIRCLE_ALPHA, SAT_CIRCLE_BRIGHTNESS};

use glam::Vec2;
use rand::Rng;

use crate::palette::{Hsb, Palette};
use crate::params::GlyphParams;
use crate::scene::{regular_polygon, MeshBuilder};

#[derive(Clone, Debug)]
pub struct Glyph {
    position: Vec2,
    /// Width the glyph eases back to between cues
    base_width: f32,
    width: f32,
    /// Accumulated rotation (degrees)
    rotation: f32,
    /// +1 or -1
    spin: f32,
    growing: bool,
    finale: bool,
    colour: Hsb,
    shape: GlyphShape,
}

impl Glyph {
    /// Static glyph centered on `position`
    pub fn new(position: Vec2, width: f32, colour: Hsb) -> Self {
        Self {
            position,
            base_width: width,
            width,
            rotation: 0.0,
            spin: 1.0,
            growing: false,
            finale: false,
            colour,
            shape: GlyphShape::compute(width, colour),
        }
    }

    /// Glyph that widens every frame without limit, spinning in a random direction
    pub fn growing<R: Rng>(position: Vec2, width: f32, colour: Hsb, rng: &mut R) -> Self {
        let mut glyph = Self::new(position, width, colour);
        glyph.growing = true;
        glyph.spin = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        glyph
    }

    /// The terminal glyph of a track
    pub fn finale<R: Rng>(position: Vec2, width: f32, colour: Hsb, rng: &mut R) -> Self {
        let mut glyph = Self::growing(position, width, colour, rng);
        glyph.finale = true;
        glyph
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn radius(&self) -> f32 {
        self.width / 2.0
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn colour(&self) -> Hsb {
        self.colour
    }

    pub fn is_growing(&self) -> bool {
        self.growing
    }

    pub fn is_finale(&self) -> bool {
        self.finale
    }

    pub fn shape(&self) -> &GlyphShape {
        &self.shape
    }

    /// Advance one frame: grow or ease, spin, recompute geometry
    pub fn update<R: Rng>(&mut self, params: &GlyphParams, rng: &mut R) {
        if self.growing {
            self.width += params.growth_px_per_frame;
        } else if self.width < self.base_width {
            let step = rng.random::<f32>() * params.ease_step_max_px;
            self.width = (self.width + step).min(self.base_width);
        }
        self.rotation += params.rotation_deg_per_frame * self.spin;

        self.shape = GlyphShape::compute(self.width, self.colour);
    }

    /// Take a fresh colour from the palette and drop the easing offset
    pub fn next_colour<R: Rng>(&mut self, palette: &Palette, rng: &mut R) {
        self.colour = palette.pick(rng);
        if !self.growing {
            self.width = self.base_width;
        }
        self.shape = GlyphShape::compute(self.width, self.colour);
    }

    /// Tessellate into `mesh`; leaves the mesh transform as it found it
    pub fn draw(&self, mesh: &mut MeshBuilder, params: &GlyphParams) {
        let shape = &self.shape;
        let center = Vec2::splat(shape.center);
        let outline = Hsb::BLACK.to_rgba(1.0);

        mesh.push();
        mesh.translate(self.position);
        mesh.rotate_degrees(self.rotation);
        mesh.translate(Vec2::splat(-self.width / 2.0));

        // saturation circles
        for i in 0..3 {
            let fill = Hsb::new(0.0, 0.0, SAT_CIRCLE_BRIGHTNESS[i]).to_rgba(SAT_CIRCLE_ALPHA[i]);
            mesh.fill_circle(center, shape.circle_sizes[i], fill);
            mesh.stroke_circle(center, shape.circle_sizes[i], params.stroke_width_px, outline);
        }

        // octagon
        let octagon = regular_polygon(center, self.width * params.octagon_radius_fraction, 8, 0.0);
        let octagon_fill = Hsb::new(self.colour.hue, 100.0, 100.0).to_rgba(shape.brightness_alpha);
        mesh.fill_polygon(&octagon, octagon_fill);
        mesh.stroke_polygon(&octagon, params.stroke_width_px, outline);

        // hue star, then the white star over it
        mesh.translate(center);
        mesh.rotate_degrees(self.colour.hue);
        let hue_fill = Hsb::new(self.colour.hue, 100.0, 100.0).to_rgba(shape.hue_alpha);
        draw_star(mesh, &shape.star, params.hue_star_reducer, hue_fill);
        mesh.rotate_degrees(-self.colour.hue);
        mesh.translate(-center);
        draw_star(mesh, &shape.star, 1.0, Hsb::WHITE.to_rgba(params.white_star_alpha));

        mesh.pop();
    }
}

fn draw_star(mesh: &mut MeshBuilder, star: &[StarPoint; 8], reducer: f32, color: [f32; 4]) {
    for point in star {
        let p = point.reduced(reducer);
        mesh.fill_triangle(p.inner_a, p.tip, p.inner_b, color);
    }
}
