//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use glyphs::params::{RecordingConfig, RenderConfig};
use glyphs::show::ShowConfig;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "glyphs")]
#[command(about = "MIDI-cued generative glyph animation", long_about = None)]
pub struct Args {
    /// Audio file to play (WAV)
    #[arg(long, value_name = "WAV", default_value = "data/music.wav")]
    pub audio: PathBuf,

    /// MIDI file whose notes cue the animation
    #[arg(long, value_name = "MID", default_value = "data/music.mid")]
    pub midi: PathBuf,

    /// Index of the MIDI track to follow
    #[arg(long, value_name = "N", default_value_t = 4)]
    pub track: usize,

    /// One cue per note instead of one per chord
    #[arg(long)]
    pub poly: bool,

    /// Seed for reproducible palettes and placement
    #[arg(long, value_name = "U64")]
    pub seed: Option<u64>,

    /// Canvas width (pixels)
    #[arg(long, value_name = "PX", default_value_t = RenderConfig::default().window_width)]
    pub width: u32,

    /// Canvas height (pixels)
    #[arg(long, value_name = "PX", default_value_t = RenderConfig::default().window_height)]
    pub height: u32,

    /// Render frames offline instead of opening a window
    #[arg(long)]
    pub record: bool,

    /// Recording length (seconds, defaults to the audio duration)
    #[arg(long, value_name = "SECONDS", requires = "record")]
    pub duration: Option<f32>,

    /// Recording output directory
    #[arg(long, value_name = "DIR", default_value = "recording")]
    pub output: PathBuf,

    /// Recording frame rate
    #[arg(long, value_name = "FPS", default_value_t = 60)]
    pub fps: u32,

    /// Print the MIDI file's tracks and exit
    #[arg(long)]
    pub list_tracks: bool,
}

impl Args {
    /// Show configuration from the defaults plus command-line overrides
    pub fn show_config(&self) -> ShowConfig {
        let mut config = ShowConfig {
            poly: self.poly,
            seed: self.seed,
            ..ShowConfig::default()
        };
        config.render.window_width = self.width;
        config.render.window_height = self.height;
        config
    }

    /// Recording configuration, falling back to `audio_duration` when no
    /// `--duration` was given
    pub fn recording_config(&self, audio_duration: f64) -> RecordingConfig {
        let mut config = RecordingConfig::new(self.duration.unwrap_or(audio_duration as f32));
        config.output_dir = self.output.clone();
        config.fps = self.fps;
        config
    }
}
