//! Greedy non-overlapping placement by rejection sampling.
//!
//! Candidates are drawn at random and kept only if they clear every existing
//! glyph; existing glyphs are never moved to make room.

use glam::Vec2;
use rand::Rng;

use crate::glyph::Glyph;
use crate::params::CycleParams;

/// Accepted spot for a new glyph
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub position: Vec2,
    pub radius: f32,
}

/// True if a circle at `position` comes within `padding` of any glyph
pub fn overlaps(glyphs: &[Glyph], position: Vec2, radius: f32, padding: f32) -> bool {
    glyphs
        .iter()
        .any(|g| position.distance(g.position()) <= radius + g.radius() + padding)
}

/// Try up to `placement_attempts` random candidates; `None` if all collide
pub fn place<R: Rng>(
    glyphs: &[Glyph],
    canvas: Vec2,
    params: &CycleParams,
    rng: &mut R,
) -> Option<Placement> {
    let margin = canvas * (1.0 - params.placement_region) / 2.0;
    let max = canvas - margin;
    let widths = params.width_range(canvas.y);

    for _ in 0..params.placement_attempts {
        let position = Vec2::new(
            rng.random_range(margin.x..max.x),
            rng.random_range(margin.y..max.y),
        );
        let base_radius = rng.random_range(widths.start / 2.0..widths.end / 2.0);
        let radius = base_radius * rng.random_range(params.placement_scale.clone());

        if !overlaps(glyphs, position, radius, params.placement_padding_px) {
            return Some(Placement { position, radius });
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Hsb;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn glyph_at(x: f32, y: f32, width: f32) -> Glyph {
        Glyph::new(Vec2::new(x, y), width, Hsb::new(0.0, 50.0, 50.0))
    }

    #[test]
    fn test_overlap_uses_padding() {
        let glyphs = [glyph_at(0.0, 0.0, 20.0)];
        // radii 10 + 10, padding 5: boundary at 25
        assert!(overlaps(&glyphs, Vec2::new(25.0, 0.0), 10.0, 5.0));
        assert!(!overlaps(&glyphs, Vec2::new(25.1, 0.0), 10.0, 5.0));
    }

    #[test]
    fn test_empty_canvas_accepts_first_candidate() {
        let mut rng = StdRng::seed_from_u64(5);
        let canvas = Vec2::new(1000.0, 800.0);
        let params = CycleParams::default();

        let placement = place(&[], canvas, &params, &mut rng).expect("empty canvas has room");

        assert!((200.0..800.0).contains(&placement.position.x));
        assert!((160.0..640.0).contains(&placement.position.y));
        // radius range: [3/16, 7/16] of height, scaled by [0.3, 0.8]
        assert!(placement.radius >= 800.0 * 3.0 / 16.0 * 0.3);
        assert!(placement.radius < 800.0 * 7.0 / 16.0 * 0.8);
    }

    #[test]
    fn test_accepted_placements_never_overlap() {
        let canvas = Vec2::new(1200.0, 900.0);
        let params = CycleParams::default();

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut glyphs = vec![glyph_at(600.0, 450.0, 300.0)];
            for _ in 0..4 {
                if let Some(p) = place(&glyphs, canvas, &params, &mut rng) {
                    glyphs.push(glyph_at(p.position.x, p.position.y, p.radius * 2.0));
                }
            }
            for (i, a) in glyphs.iter().enumerate() {
                for b in &glyphs[i + 1..] {
                    let gap = a.position().distance(b.position());
                    assert!(gap >= a.radius() + b.radius() + params.placement_padding_px);
                }
            }
        }
    }

    #[test]
    fn test_full_canvas_gives_up() {
        let mut rng = StdRng::seed_from_u64(2);
        let canvas = Vec2::new(400.0, 300.0);
        let params = CycleParams::default();
        // One glyph covering the whole sampling region
        let glyphs = [glyph_at(200.0, 150.0, 2000.0)];

        assert_eq!(place(&glyphs, canvas, &params, &mut rng), None);
    }
}
