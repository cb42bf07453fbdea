//! Glyph placement and lifecycle state machine.
//!
//! The stage owns every piece of mutable animation state: the live glyphs,
//! the active palette and the random source. Cues drive it through a fixed
//! cycle (reset, steady-state packing, burst growth) until the track's last
//! cue replaces everything with a single finale glyph.

mod placement;

pub use placement::{overlaps, place, Placement};

use glam::Vec2;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::glyph::Glyph;
use crate::palette::Palette;
use crate::params::{CycleParams, GlyphParams};

/// What a cue did to the stage
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CuePhase {
    /// Last cue of the track: one permanently growing glyph
    Finale,
    /// New palette and a single primary glyph
    Reset,
    /// Single growing glyph for the tail of the cycle
    Burst,
    /// Random packing; records which transitions fired
    Steady { added: bool, removed: bool },
    /// Cue arrived after the finale
    Ignored,
}

pub struct Stage {
    canvas: Vec2,
    cycle: CycleParams,
    glyph_params: GlyphParams,
    total_cues: u32,
    palette: Palette,
    glyphs: Vec<Glyph>,
    finished: bool,
    rng: StdRng,
}

impl Stage {
    /// Create an empty stage; `seed` makes every random choice reproducible
    pub fn new(
        canvas: Vec2,
        cycle: CycleParams,
        glyph_params: GlyphParams,
        total_cues: u32,
        seed: Option<u64>,
    ) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let palette = Palette::generate(&mut rng, cycle.palette_size);

        Self {
            canvas,
            cycle,
            glyph_params,
            total_cues,
            palette,
            glyphs: Vec::new(),
            finished: false,
            rng,
        }
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn glyph_params(&self) -> &GlyphParams {
        &self.glyph_params
    }

    pub fn canvas(&self) -> Vec2 {
        self.canvas
    }

    pub fn total_cues(&self) -> u32 {
        self.total_cues
    }

    /// True once the finale glyph has been placed
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Back to an empty stage with a fresh palette, ready for a replay
    pub fn reset(&mut self) {
        self.glyphs.clear();
        self.finished = false;
        self.palette = Palette::generate(&mut self.rng, self.cycle.palette_size);
    }

    /// Advance every glyph by one frame
    pub fn update_glyphs(&mut self) {
        for glyph in &mut self.glyphs {
            glyph.update(&self.glyph_params, &mut self.rng);
        }
    }

    /// React to cue number `cue` (1-based)
    pub fn handle_cue(&mut self, cue: u32) -> CuePhase {
        let position = self.cycle.position(cue);

        let phase = if self.finished {
            CuePhase::Ignored
        } else if cue == self.total_cues {
            self.start_finale();
            CuePhase::Finale
        } else if position == self.cycle.reset_position || self.glyphs.is_empty() {
            self.start_cycle();
            CuePhase::Reset
        } else if self.cycle.is_burst(position) {
            self.start_burst();
            CuePhase::Burst
        } else {
            self.pack()
        };

        debug!(
            "cue {} (cycle position {}): {:?}, {} glyphs",
            cue,
            position,
            phase,
            self.glyphs.len()
        );
        phase
    }

    fn center(&self) -> Vec2 {
        self.canvas / 2.0
    }

    fn random_width(&mut self) -> f32 {
        let range = self.cycle.width_range(self.canvas.y);
        self.rng.random_range(range)
    }

    fn start_finale(&mut self) {
        let width = self.canvas.y * self.cycle.finale_width_of_height;
        let colour = self.palette.pick(&mut self.rng);
        let glyph = Glyph::finale(self.center(), width, colour, &mut self.rng);

        self.glyphs.clear();
        self.glyphs.push(glyph);
        self.finished = true;
    }

    fn start_cycle(&mut self) {
        self.palette = Palette::generate(&mut self.rng, self.cycle.palette_size);
        let width = self.random_width();
        let colour = self.palette.pick(&mut self.rng);

        self.glyphs.clear();
        self.glyphs.push(Glyph::new(self.center(), width, colour));
    }

    fn start_burst(&mut self) {
        let width = self.random_width();
        let colour = self.palette.pick(&mut self.rng);
        let glyph = Glyph::growing(self.center(), width, colour, &mut self.rng);

        self.glyphs.clear();
        self.glyphs.push(glyph);
    }

    fn pack(&mut self) -> CuePhase {
        let try_add = self.rng.random_bool(self.cycle.add_probability);
        let try_remove = self.rng.random_bool(self.cycle.remove_probability);

        let mut added = false;
        if try_add && self.glyphs.len() < self.cycle.max_glyphs {
            if let Some(spot) = place(&self.glyphs, self.canvas, &self.cycle, &mut self.rng) {
                let colour = self.palette.pick(&mut self.rng);
                self.glyphs
                    .push(Glyph::new(spot.position, spot.radius * 2.0, colour));
                added = true;
            }
        }

        let mut removed = false;
        if try_remove && self.glyphs.len() > 1 {
            let index = self.rng.random_range(1..self.glyphs.len());
            self.glyphs.remove(index);
            removed = true;
        }

        for glyph in &mut self.glyphs {
            glyph.next_colour(&self.palette, &mut self.rng);
        }

        CuePhase::Steady { added, removed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: Vec2 = Vec2::new(1280.0, 720.0);

    fn stage_with(cycle: CycleParams, total_cues: u32, seed: u64) -> Stage {
        Stage::new(CANVAS, cycle, GlyphParams::default(), total_cues, Some(seed))
    }

    fn always_add() -> CycleParams {
        CycleParams {
            add_probability: 1.0,
            remove_probability: 0.0,
            ..CycleParams::default()
        }
    }

    #[test]
    fn test_first_cue_resets_to_one_glyph() {
        let mut stage = stage_with(CycleParams::default(), 500, 1);
        let palette_before = stage.palette().clone();

        assert_eq!(stage.handle_cue(1), CuePhase::Reset);
        assert_eq!(stage.glyphs().len(), 1);
        assert_eq!(stage.glyphs()[0].position(), CANVAS / 2.0);
        assert_ne!(*stage.palette(), palette_before);
    }

    #[test]
    fn test_primary_width_range() {
        for seed in 0..20 {
            let mut stage = stage_with(CycleParams::default(), 500, seed);
            stage.handle_cue(1);
            let width = stage.glyphs()[0].width();
            assert!(width >= 720.0 * 3.0 / 8.0 && width < 720.0 * 7.0 / 8.0);
        }
    }

    #[test]
    fn test_empty_stage_resets_mid_cycle() {
        let mut stage = stage_with(CycleParams::default(), 500, 2);
        assert_eq!(stage.handle_cue(30), CuePhase::Reset);
        assert_eq!(stage.glyphs().len(), 1);
    }

    #[test]
    fn test_burst_positions_leave_one_growing_glyph() {
        let mut stage = stage_with(always_add(), 500, 3);
        for cue in 1..=200 {
            let phase = stage.handle_cue(cue);
            let position = cue % 66;
            if (60..66).contains(&position) {
                assert_eq!(phase, CuePhase::Burst);
                assert_eq!(stage.glyphs().len(), 1);
                assert!(stage.glyphs()[0].is_growing());
            }
        }
    }

    #[test]
    fn test_steady_state_stays_within_bounds() {
        let cycle = CycleParams {
            add_probability: 0.9,
            remove_probability: 0.5,
            ..CycleParams::default()
        };
        for seed in 0..10 {
            let mut stage = stage_with(cycle.clone(), 1000, seed);
            for cue in 1..=400 {
                if let CuePhase::Steady { .. } = stage.handle_cue(cue) {
                    let n = stage.glyphs().len();
                    assert!((1..=5).contains(&n), "cue {} left {} glyphs", cue, n);
                }
            }
        }
    }

    #[test]
    fn test_cap_holds_at_cycle_position_zero() {
        let mut stage = stage_with(always_add(), 500, 4);
        stage.handle_cue(1);
        stage.glyphs = (0..5)
            .map(|i| {
                let x = 100.0 + 250.0 * i as f32;
                Glyph::new(Vec2::new(x, 360.0), 50.0, stage.palette.first())
            })
            .collect();

        let phase = stage.handle_cue(66);

        assert_eq!(phase, CuePhase::Steady { added: false, removed: false });
        assert_eq!(stage.glyphs().len(), 5);
    }

    #[test]
    fn test_primary_glyph_is_never_removed() {
        let cycle = CycleParams {
            add_probability: 1.0,
            remove_probability: 1.0,
            ..CycleParams::default()
        };
        let mut stage = stage_with(cycle, 500, 5);
        stage.handle_cue(1);
        let primary = stage.glyphs()[0].position();

        for cue in 2..60 {
            stage.handle_cue(cue);
            assert_eq!(stage.glyphs()[0].position(), primary);
        }
    }

    #[test]
    fn test_packed_glyphs_do_not_overlap() {
        let cycle = always_add();
        let padding = cycle.placement_padding_px;
        let mut stage = stage_with(cycle, 500, 6);

        for cue in 1..60 {
            stage.handle_cue(cue);
            let glyphs = stage.glyphs();
            for i in 1..glyphs.len() {
                for j in 0..i {
                    let gap = glyphs[i].position().distance(glyphs[j].position());
                    assert!(gap >= glyphs[i].radius() + glyphs[j].radius() + padding);
                }
            }
        }
    }

    #[test]
    fn test_last_cue_is_finale_regardless_of_position() {
        for total in [1, 61, 66, 67, 130] {
            let mut stage = stage_with(CycleParams::default(), total, 7);
            for cue in 1..total {
                stage.handle_cue(cue);
            }
            assert_eq!(stage.handle_cue(total), CuePhase::Finale);
            assert_eq!(stage.glyphs().len(), 1);
            assert!(stage.glyphs()[0].is_finale());
            assert!(stage.is_finished());
        }
    }

    #[test]
    fn test_finale_is_absorbing() {
        let mut stage = stage_with(CycleParams::default(), 3, 8);
        for cue in 1..=3 {
            stage.handle_cue(cue);
        }
        assert_eq!(stage.handle_cue(67), CuePhase::Ignored);
        assert_eq!(stage.glyphs().len(), 1);
        assert!(stage.glyphs()[0].is_finale());
    }

    #[test]
    fn test_finale_glyph_grows_forever() {
        let mut stage = stage_with(CycleParams::default(), 1, 9);
        stage.handle_cue(1);
        let start = stage.glyphs()[0].width();
        for _ in 0..10_000 {
            stage.update_glyphs();
        }
        assert!(stage.glyphs()[0].width() > start + 10_000.0);
    }

    #[test]
    fn test_reset_allows_replay() {
        let mut stage = stage_with(CycleParams::default(), 2, 10);
        stage.handle_cue(1);
        stage.handle_cue(2);
        assert!(stage.is_finished());

        stage.reset();
        assert!(!stage.is_finished());
        assert!(stage.glyphs().is_empty());
        assert_eq!(stage.handle_cue(1), CuePhase::Reset);
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = |seed| {
            let mut stage = stage_with(always_add(), 300, seed);
            (1..=120)
                .map(|cue| stage.handle_cue(cue))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(42), run(42));
    }
}
