//! Rendering and recording configuration.

use std::path::{Path, PathBuf};

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Canvas width (pixels)
    pub window_width: u32,

    /// Canvas height (pixels)
    pub window_height: u32,

    /// Inset of the gradient border rectangle from the canvas edge (pixels)
    pub border_inset_px: f32,

    /// Stroke width of the gradient border before audio modulation (pixels)
    pub border_width_px: f32,

    /// Colour stops around the conic gradient
    pub gradient_stops: usize,

    /// Gradient start-angle advance per drawn frame (radians)
    pub gradient_speed_rad_per_frame: f32,

    /// Segments per border side used to approximate the gradient
    pub border_segments: usize,

    /// Segments used to approximate a full circle
    pub circle_segments: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            border_inset_px: 40.0,
            border_width_px: 40.0,
            gradient_stops: 16,
            gradient_speed_rad_per_frame: 0.01,
            border_segments: 96,
            circle_segments: 64,
        }
    }
}

impl RenderConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.window_width == 0 || self.window_height == 0 {
            return Err(format!(
                "Canvas must be non-empty, got {}x{}",
                self.window_width, self.window_height
            ));
        }
        if self.gradient_stops == 0 {
            return Err("Gradient needs at least one stop".to_string());
        }
        if self.border_segments == 0 || self.circle_segments < 3 {
            return Err("Tessellation segment counts are too small".to_string());
        }
        Ok(())
    }
}

/// Recording mode configuration
#[derive(Debug, Clone)]
pub struct RecordingConfig {
    /// Duration to record (seconds)
    pub duration_secs: f32,

    /// Output directory for frames and audio
    pub output_dir: PathBuf,

    /// Frame rate (FPS)
    pub fps: u32,
}

impl RecordingConfig {
    pub fn new(duration_secs: f32) -> Self {
        Self {
            duration_secs,
            output_dir: PathBuf::from("recording"),
            fps: 60,
        }
    }

    /// Total number of frames to capture
    pub fn total_frames(&self) -> usize {
        (self.duration_secs * self.fps as f32).ceil() as usize
    }

    /// Playback time of a frame (seconds)
    pub fn frame_time(&self, frame: usize) -> f64 {
        frame as f64 / self.fps as f64
    }

    /// Frame directory path
    pub fn frames_dir(&self) -> PathBuf {
        self.output_dir.join("frames")
    }

    /// Path of a single frame image
    pub fn frame_path(&self, frame: usize) -> PathBuf {
        self.frames_dir().join(format!("frame_{:05}.png", frame))
    }

    /// Audio file path (the source audio is copied here)
    pub fn audio_path(&self, source: &Path) -> PathBuf {
        let name = source
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "audio.wav".into());
        self.output_dir.join(name)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.fps == 0 {
            return Err("Frame rate must be > 0".to_string());
        }
        if !(self.duration_secs.is_finite() && self.duration_secs >= 0.0) {
            return Err(format!(
                "Recording duration must be >= 0, got {}",
                self.duration_secs
            ));
        }
        Ok(())
    }
}
