//! The running show: cue timeline, glyph stage and frame composition
//! wired together behind a single per-frame `tick`.

use std::sync::Arc;

use glam::Vec2;
use log::info;

use crate::audio::{AudioBands, AudioTrack, SpectrumAnalyzer};
use crate::cue::{register_cues, CueAction, CueTimeline};
use crate::error::{GlyphsError, Result};
use crate::midi::NoteEvent;
use crate::params::{AudioReactiveMapping, CycleParams, FFTConfig, GlyphParams, RenderConfig};
use crate::scene::{Scene, Vertex};
use crate::stage::Stage;

/// Everything needed to set up a show
#[derive(Clone, Debug, Default)]
pub struct ShowConfig {
    pub cycle: CycleParams,
    pub glyph: GlyphParams,
    pub render: RenderConfig,
    pub mapping: AudioReactiveMapping,
    pub fft: FFTConfig,
    /// One cue per note instead of one per distinct tick
    pub poly: bool,
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
}

impl ShowConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.cycle.validate()?;
        self.glyph.validate()?;
        self.render.validate()?;
        self.fft.validate()
    }
}

pub struct Show {
    timeline: CueTimeline<CueAction>,
    stage: Stage,
    scene: Scene,
    analyzer: SpectrumAnalyzer,
    track: Arc<AudioTrack>,
}

impl Show {
    /// Register the track's cues and build an empty stage sized to the canvas
    pub fn new(track: Arc<AudioTrack>, notes: &[NoteEvent], config: ShowConfig) -> Result<Self> {
        config.validate().map_err(GlyphsError::Config)?;

        let mut timeline = CueTimeline::new();
        let total_cues = register_cues(&mut timeline, notes, CueAction::Glyphs, config.poly);
        info!(
            "Scheduled {} cues from {} notes{}",
            total_cues,
            notes.len(),
            if config.poly { " (poly)" } else { "" }
        );

        let canvas = Vec2::new(
            config.render.window_width as f32,
            config.render.window_height as f32,
        );
        let stage = Stage::new(canvas, config.cycle, config.glyph, total_cues, config.seed);
        let analyzer =
            SpectrumAnalyzer::new(config.fft.with_sample_rate(track.sample_rate() as usize))?;
        let scene = Scene::new(config.render, config.mapping);

        Ok(Self {
            timeline,
            stage,
            scene,
            analyzer,
            track,
        })
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn track(&self) -> &AudioTrack {
        &self.track
    }

    /// Cues still waiting to fire
    pub fn pending_cues(&self) -> usize {
        self.timeline.pending()
    }

    /// Fire every cue due at `now`, then compose a frame if anything is showing
    ///
    /// While paused (or before the first glyph) the previous frame is returned
    /// unchanged.
    pub fn tick(&mut self, now: f64, playing: bool) -> &[Vertex] {
        for scheduled in self.timeline.advance(now) {
            match scheduled.action {
                CueAction::Glyphs => {
                    self.stage.handle_cue(scheduled.cue.number);
                }
            }
        }

        if !playing || self.stage.glyphs().is_empty() {
            return self.scene.vertices();
        }

        let bands = if self.track.frames() > 0 {
            self.analyzer.bands_at(&self.track, now)
        } else {
            AudioBands::default()
        };
        self.scene.compose(&mut self.stage, &bands)
    }

    /// Start again from the first cue with a fresh palette
    pub fn restart(&mut self) {
        self.timeline.rewind();
        self.stage.reset();
        self.scene.reset();
        info!("Show restarted");
    }
}
