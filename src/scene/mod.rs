//! Per-frame composition: background, rotating gradient border, glyphs.

mod mesh;

pub use mesh::{regular_polygon, MeshBuilder, Vertex};

use std::f32::consts::TAU;

use glam::Vec2;

use crate::audio::AudioBands;
use crate::palette::{Hsb, Palette};
use crate::params::{AudioReactiveMapping, RenderConfig};
use crate::stage::Stage;

/// Builds the frame mesh and owns the frame counter
pub struct Scene {
    mesh: MeshBuilder,
    config: RenderConfig,
    mapping: AudioReactiveMapping,
    frame_count: u64,
}

impl Scene {
    pub fn new(config: RenderConfig, mapping: AudioReactiveMapping) -> Self {
        Self {
            mesh: MeshBuilder::new(config.circle_segments),
            config,
            mapping,
            frame_count: 0,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Frames composed so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Mesh of the most recently composed frame
    pub fn vertices(&self) -> &[Vertex] {
        self.mesh.vertices()
    }

    /// Start over from frame zero with an empty mesh
    pub fn reset(&mut self) {
        self.mesh.clear();
        self.frame_count = 0;
    }

    /// Draw the stage as it is, then advance every glyph one frame
    pub fn compose(&mut self, stage: &mut Stage, bands: &AudioBands) -> &[Vertex] {
        let size = Vec2::new(
            self.config.window_width as f32,
            self.config.window_height as f32,
        );

        self.mesh.clear();

        self.mesh
            .fill_rect(Vec2::ZERO, size, stage.palette().first().to_rgba(1.0));
        self.mesh
            .fill_rect(Vec2::ZERO, size, Hsb::BLACK.to_rgba(1.0));

        let border_width = self.config.border_width_px + self.mapping.border_boost(bands.low);
        let start_angle = self.frame_count as f32 * self.config.gradient_speed_rad_per_frame;
        draw_gradient_border(
            &mut self.mesh,
            &self.config,
            stage.palette(),
            size,
            border_width,
            start_angle,
        );

        for glyph in stage.glyphs() {
            glyph.draw(&mut self.mesh, stage.glyph_params());
        }
        stage.update_glyphs();

        self.frame_count += 1;
        self.mesh.vertices()
    }
}

/// Colour of a conic gradient at `angle` (radians, clockwise from +x)
///
/// Stops sit at `i / stops` and cycle through the palette; past the last stop
/// the last colour holds until the gradient wraps.
pub fn conic_gradient_color(palette: &Palette, stops: usize, start_angle: f32, angle: f32) -> [f32; 4] {
    let t = (angle - start_angle).rem_euclid(TAU) / TAU;
    let scaled = t * stops as f32;
    let index = (scaled.floor() as usize).min(stops - 1);

    let from = palette.cycled(index).to_rgba(1.0);
    if index + 1 >= stops {
        return from;
    }
    let to = palette.cycled(index + 1).to_rgba(1.0);
    let f = scaled - index as f32;
    std::array::from_fn(|i| from[i] + (to[i] - from[i]) * f)
}

fn draw_gradient_border(
    mesh: &mut MeshBuilder,
    config: &RenderConfig,
    palette: &Palette,
    size: Vec2,
    width: f32,
    start_angle: f32,
) {
    let center = size / 2.0;
    let inset = Vec2::splat(config.border_inset_px);
    let half = Vec2::splat(width / 2.0);

    let rect_corners = |min: Vec2, max: Vec2| {
        [
            min,
            Vec2::new(max.x, min.y),
            max,
            Vec2::new(min.x, max.y),
        ]
    };
    let outer = rect_corners(inset - half, size - inset + half);
    let inner = rect_corners(inset + half, size - inset - half);

    let color_at = |p: Vec2| {
        let d = p - center;
        conic_gradient_color(palette, config.gradient_stops, start_angle, d.y.atan2(d.x))
    };

    let segments = config.border_segments;
    for side in 0..4 {
        let next = (side + 1) % 4;
        for s in 0..segments {
            let t0 = s as f32 / segments as f32;
            let t1 = (s + 1) as f32 / segments as f32;
            let o0 = outer[side].lerp(outer[next], t0);
            let o1 = outer[side].lerp(outer[next], t1);
            let i1 = inner[side].lerp(inner[next], t1);
            let i0 = inner[side].lerp(inner[next], t0);
            mesh.fill_quad(
                [o0, o1, i1, i0],
                [color_at(o0), color_at(o1), color_at(i1), color_at(i0)],
            );
        }
    }
}
