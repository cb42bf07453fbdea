//! Audio playback through the default output device.

use std::sync::{Arc, Mutex, MutexGuard};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::{info, warn};

use super::AudioTrack;
use crate::error::{GlyphsError, Result};

/// Read cursor shared with the audio callback
#[derive(Debug, Default)]
struct PlaybackState {
    /// Position in source frames (fractional when resampling)
    position: f64,
    playing: bool,
    finished: bool,
}

impl PlaybackState {
    /// Fill one interleaved output buffer and advance the cursor
    fn render(&mut self, track: &AudioTrack, data: &mut [f32], channels: usize, step: f64) {
        for frame in data.chunks_mut(channels) {
            let source = self.position as usize;
            if !self.playing || source >= track.frames() {
                frame.fill(0.0);
                if self.playing {
                    self.playing = false;
                    self.finished = true;
                }
                continue;
            }

            for (channel, sample) in frame.iter_mut().enumerate() {
                // Safety limiter: hard clip to ±1.0
                *sample = track.sample(source, channel).clamp(-1.0, 1.0);
            }
            self.position += step;
        }
    }
}

/// Plays one track; exposes play/pause and the playhead as the show's clock
pub struct AudioSystem {
    track: Arc<AudioTrack>,
    state: Arc<Mutex<PlaybackState>>,

    /// Audio output stream (kept alive)
    _stream: cpal::Stream,
}

impl AudioSystem {
    /// Open the default output device, paused at the start of `track`
    pub fn new(track: Arc<AudioTrack>) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| GlyphsError::Audio("No audio output device found".to_string()))?;

        let config = device
            .default_output_config()
            .map_err(|e| GlyphsError::Audio(format!("Failed to get audio config: {}", e)))?;

        info!(
            "Audio: {} @ {}Hz",
            device.name().unwrap_or_else(|_| "Unknown".to_string()),
            config.sample_rate().0
        );

        let channels = config.channels() as usize;
        let step = track.sample_rate() as f64 / config.sample_rate().0 as f64;

        let state = Arc::new(Mutex::new(PlaybackState::default()));
        let state_clone = Arc::clone(&state);
        let track_clone = Arc::clone(&track);

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    match state_clone.lock() {
                        Ok(mut state) => state.render(&track_clone, data, channels, step),
                        Err(_) => data.fill(0.0),
                    }
                },
                |err| warn!("Audio stream error: {}", err),
                None,
            )
            .map_err(|e| GlyphsError::Audio(format!("Failed to build audio stream: {}", e)))?;

        stream
            .play()
            .map_err(|e| GlyphsError::Audio(format!("Failed to start audio stream: {}", e)))?;

        Ok(Self {
            track,
            state,
            _stream: stream,
        })
    }

    fn state(&self) -> MutexGuard<'_, PlaybackState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn track(&self) -> &AudioTrack {
        &self.track
    }

    pub fn play(&self) {
        let mut state = self.state();
        state.playing = true;
        state.finished = false;
    }

    pub fn pause(&self) {
        self.state().playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.state().playing
    }

    /// True once playback ran off the end of the track
    pub fn has_finished(&self) -> bool {
        self.state().finished
    }

    /// Playhead in seconds
    pub fn current_time(&self) -> f64 {
        self.state().position / self.track.sample_rate() as f64
    }

    /// Back to the start, keeping the play/pause state
    pub fn rewind(&self) {
        let mut state = self.state();
        state.position = 0.0;
        state.finished = false;
    }
}
