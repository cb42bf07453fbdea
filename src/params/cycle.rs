//! Cue cycle and placement parameters.

use std::ops::Range;

/// Behaviour of the placement and lifecycle state machine
#[derive(Debug, Clone)]
pub struct CycleParams {
    /// Number of cues in one behavioural cycle
    pub cycle_length: u32,

    /// Cycle position that starts a fresh palette and primary glyph
    pub reset_position: u32,

    /// First cycle position of the burst-growth phase (runs to the end of the cycle)
    pub burst_start: u32,

    /// Upper bound on live glyphs during steady-state packing
    pub max_glyphs: usize,

    /// Chance per steady-state cue of trying to add a glyph
    pub add_probability: f64,

    /// Chance per steady-state cue of removing a non-primary glyph
    pub remove_probability: f64,

    /// Rejection-sampling attempts before placement gives up
    pub placement_attempts: usize,

    /// Minimum gap between placed glyph edges (pixels)
    pub placement_padding_px: f32,

    /// Fraction of the canvas (centered) that new glyph centers are drawn from
    pub placement_region: f32,

    /// Random scale applied to a packed glyph's radius
    pub placement_scale: Range<f32>,

    /// Primary glyph width as a fraction of canvas height
    pub width_of_height: Range<f32>,

    /// Finale glyph width as a fraction of canvas height
    pub finale_width_of_height: f32,

    /// Colours per generated palette
    pub palette_size: usize,
}

impl Default for CycleParams {
    fn default() -> Self {
        Self {
            cycle_length: 66,
            reset_position: 1,
            burst_start: 60,
            max_glyphs: 5,
            add_probability: 0.3,
            remove_probability: 0.2,
            placement_attempts: 50,
            placement_padding_px: 20.0,
            placement_region: 0.6,
            placement_scale: 0.3..0.8,
            width_of_height: (3.0 / 8.0)..(7.0 / 8.0),
            finale_width_of_height: 7.0 / 8.0,
            palette_size: 6,
        }
    }
}

impl CycleParams {
    /// Position of a cue inside its cycle
    pub fn position(&self, cue: u32) -> u32 {
        cue % self.cycle_length
    }

    /// True for the cycle positions that belong to the burst-growth phase
    pub fn is_burst(&self, position: u32) -> bool {
        position >= self.burst_start && position < self.cycle_length
    }

    /// Primary glyph width range in pixels for a canvas of the given height
    pub fn width_range(&self, canvas_height: f32) -> Range<f32> {
        canvas_height * self.width_of_height.start..canvas_height * self.width_of_height.end
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.cycle_length == 0 {
            return Err("Cycle length must be > 0".to_string());
        }
        if self.burst_start >= self.cycle_length {
            return Err(format!(
                "Burst start {} must fall inside the cycle of {}",
                self.burst_start, self.cycle_length
            ));
        }
        if self.max_glyphs == 0 {
            return Err("At least one glyph must be allowed".to_string());
        }
        for (name, p) in [
            ("add", self.add_probability),
            ("remove", self.remove_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(format!("{} probability must be in [0, 1], got {}", name, p));
            }
        }
        if self.placement_attempts == 0 {
            return Err("Placement needs at least one attempt".to_string());
        }
        if !(self.placement_region > 0.0 && self.placement_region <= 1.0) {
            return Err(format!(
                "Placement region must be in (0, 1], got {}",
                self.placement_region
            ));
        }
        if self.placement_scale.is_empty() || self.width_of_height.is_empty() {
            return Err("Size ranges must be non-empty".to_string());
        }
        if self.palette_size == 0 {
            return Err("Palette needs at least one colour".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_validates() {
        assert!(CycleParams::default().validate().is_ok());
    }

    #[test]
    fn test_burst_window() {
        let params = CycleParams::default();

        assert!(!params.is_burst(params.position(59)));
        assert!(params.is_burst(params.position(60)));
        assert!(params.is_burst(params.position(65)));
        // 66 wraps to position 0, which is steady state
        assert!(!params.is_burst(params.position(66)));
        assert!(params.is_burst(params.position(66 + 62)));
    }

    #[test]
    fn test_rejects_burst_outside_cycle() {
        let params = CycleParams {
            burst_start: 66,
            ..CycleParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_width_range_scales_with_height() {
        let params = CycleParams::default();
        let range = params.width_range(800.0);
        assert_eq!(range.start, 300.0);
        assert_eq!(range.end, 700.0);
    }
}
