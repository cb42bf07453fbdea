//! Per-glyph animation parameters.

/// Frame-by-frame animation of a single glyph
#[derive(Debug, Clone)]
pub struct GlyphParams {
    /// Width added per frame to a growing glyph (pixels)
    pub growth_px_per_frame: f32,

    /// Rotation per frame (degrees)
    pub rotation_deg_per_frame: f32,

    /// Upper bound of the random easing step toward base width (pixels)
    pub ease_step_max_px: f32,

    /// Octagon radius as a fraction of glyph width
    pub octagon_radius_fraction: f32,

    /// Divisor applied to the coloured star's coordinates
    pub hue_star_reducer: f32,

    /// Alpha of the white star drawn over the coloured one
    pub white_star_alpha: f32,

    /// Outline width of the saturation circles and octagon (pixels)
    pub stroke_width_px: f32,
}

impl Default for GlyphParams {
    fn default() -> Self {
        Self {
            growth_px_per_frame: 2.0,
            rotation_deg_per_frame: 1.0,
            ease_step_max_px: 0.25,
            octagon_radius_fraction: 1.0 / 3.0,
            hue_star_reducer: 3.0,
            white_star_alpha: 0.8,
            stroke_width_px: 1.0,
        }
    }
}

impl GlyphParams {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.growth_px_per_frame.is_finite() && self.growth_px_per_frame >= 0.0) {
            return Err(format!(
                "Growth must be >= 0 px/frame, got {}",
                self.growth_px_per_frame
            ));
        }
        if !(self.ease_step_max_px.is_finite() && self.ease_step_max_px >= 0.0) {
            return Err(format!(
                "Ease step must be >= 0 px, got {}",
                self.ease_step_max_px
            ));
        }
        if !(self.hue_star_reducer.is_finite() && self.hue_star_reducer > 0.0) {
            return Err(format!(
                "Hue star reducer must be > 0, got {}",
                self.hue_star_reducer
            ));
        }
        if !(self.octagon_radius_fraction > 0.0 && self.octagon_radius_fraction <= 1.0) {
            return Err(format!(
                "Octagon radius fraction must be in (0, 1], got {}",
                self.octagon_radius_fraction
            ));
        }
        if !(0.0..=1.0).contains(&self.white_star_alpha) {
            return Err(format!(
                "White star alpha must be in [0, 1], got {}",
                self.white_star_alpha
            ));
        }
        if !self.rotation_deg_per_frame.is_finite() || self.stroke_width_px < 0.0 {
            return Err("Rotation must be finite and stroke width >= 0".to_string());
        }
        Ok(())
    }
}
