//! Offline recording: render every frame headlessly to numbered PNGs.
//!
//! Frame time stands in for playback time, so cue timing matches the live
//! window exactly regardless of how long each frame takes to render.

use std::fs;
use std::path::Path;

use log::info;

use crate::error::{GlyphsError, Result};
use crate::params::RecordingConfig;
use crate::rendering::HeadlessRenderer;
use crate::show::Show;

/// Summary of a finished recording
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RecordingStats {
    pub frames: usize,
    /// Frames where at least one glyph was showing
    pub active_frames: usize,
}

/// Create the output layout and copy the source audio next to the frames
///
/// Nothing is written when `config` is invalid. When the output directory
/// already holds the source audio the copy is skipped.
pub fn prepare_output(config: &RecordingConfig, audio_source: &Path) -> Result<()> {
    config.validate().map_err(GlyphsError::Config)?;

    let source = fs::canonicalize(audio_source).map_err(|e| GlyphsError::io(audio_source, e))?;

    let frames_dir = config.frames_dir();
    fs::create_dir_all(&frames_dir).map_err(|e| GlyphsError::io(&frames_dir, e))?;

    let audio_dest = config.audio_path(audio_source);
    if fs::canonicalize(&audio_dest).is_ok_and(|dest| dest == source) {
        info!("Audio already in {}", config.output_dir.display());
        return Ok(());
    }

    fs::copy(audio_source, &audio_dest).map_err(|e| GlyphsError::io(audio_source, e))?;
    Ok(())
}

/// Render `config.total_frames()` frames of `show` into `config.frames_dir()`
pub fn record(
    show: &mut Show,
    renderer: &mut HeadlessRenderer,
    config: &RecordingConfig,
) -> Result<RecordingStats> {
    config.validate().map_err(GlyphsError::Config)?;

    let total_frames = config.total_frames();
    let mut active_frames = 0;

    info!(
        "Recording {} frames at {} fps to {}",
        total_frames,
        config.fps,
        config.frames_dir().display()
    );

    for frame in 0..total_frames {
        let vertices = show.tick(config.frame_time(frame), true);
        let image = renderer.render_to_image(vertices)?;
        if !show.stage().glyphs().is_empty() {
            active_frames += 1;
        }

        image
            .save(config.frame_path(frame))
            .map_err(|source| GlyphsError::Frame { frame, source })?;

        if frame > 0 && frame % (config.fps as usize * 10) == 0 {
            info!("  {} / {} frames", frame, total_frames);
        }
    }

    info!("Recording complete: {} frames", total_frames);
    Ok(RecordingStats {
        frames: total_frames,
        active_frames,
    })
}
