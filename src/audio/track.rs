//! Decoded audio file held in memory.

use std::path::Path;

use log::info;

use crate::error::{GlyphsError, Result};

/// Interleaved samples in `[-1, 1]` with their format
#[derive(Clone, Debug, PartialEq)]
pub struct AudioTrack {
    samples: Vec<f32>,
    channels: u16,
    sample_rate: u32,
}

impl AudioTrack {
    /// Decode a WAV file (integer or float samples)
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = hound::WavReader::open(path)?;
        let spec = reader.spec();

        let samples = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<std::result::Result<Vec<_>, _>>()?,
            hound::SampleFormat::Int => {
                let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / scale))
                    .collect::<std::result::Result<Vec<_>, _>>()?
            }
        };

        let track = Self::from_samples(samples, spec.channels, spec.sample_rate)?;
        info!(
            "Audio loaded: {} ({:.1}s, {} Hz, {} ch)",
            path.display(),
            track.duration(),
            track.sample_rate,
            track.channels
        );
        Ok(track)
    }

    pub fn from_samples(samples: Vec<f32>, channels: u16, sample_rate: u32) -> Result<Self> {
        if channels == 0 || sample_rate == 0 {
            return Err(GlyphsError::Config(format!(
                "audio needs channels and a sample rate, got {} ch @ {} Hz",
                channels, sample_rate
            )));
        }
        Ok(Self {
            samples,
            channels,
            sample_rate,
        })
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of sample frames (one sample per channel each)
    pub fn frames(&self) -> usize {
        self.samples.len() / self.channels as usize
    }

    /// Length in seconds
    pub fn duration(&self) -> f64 {
        self.frames() as f64 / self.sample_rate as f64
    }

    /// Sample of `channel` in `frame`; channels past the file's wrap around
    pub fn sample(&self, frame: usize, channel: usize) -> f32 {
        let channels = self.channels as usize;
        self.samples
            .get(frame * channels + channel % channels)
            .copied()
            .unwrap_or(0.0)
    }

    /// Channel-averaged samples starting at `start`, zero-padded past the end
    pub fn mono_window(&self, start: usize, len: usize) -> Vec<f32> {
        let channels = self.channels as usize;
        (start..start + len)
            .map(|frame| {
                let sum: f32 = (0..channels).map(|ch| self.sample(frame, ch)).sum();
                sum / channels as f32
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_and_frames() {
        let track = AudioTrack::from_samples(vec![0.0; 44100 * 2], 2, 44100).unwrap();
        assert_eq!(track.frames(), 44100);
        assert!((track.duration() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_mono_window_averages_and_pads() {
        let track = AudioTrack::from_samples(vec![1.0, 0.0, 0.5, 0.5], 2, 8000).unwrap();
        assert_eq!(track.mono_window(0, 3), vec![0.5, 0.5, 0.0]);
    }

    #[test]
    fn test_mono_track_feeds_every_output_channel() {
        let track = AudioTrack::from_samples(vec![0.25, 0.75], 1, 8000).unwrap();
        assert_eq!(track.sample(1, 0), 0.75);
        assert_eq!(track.sample(1, 1), 0.75);
    }

    #[test]
    fn test_rejects_zero_channels() {
        assert!(AudioTrack::from_samples(vec![], 0, 44100).is_err());
    }

    #[test]
    fn test_wav_round_trip_through_hound() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for _ in 0..8000 {
            writer.write_sample(i16::MAX / 2).unwrap();
        }
        writer.finalize().unwrap();

        let track = AudioTrack::load(&path).unwrap();
        assert_eq!(track.sample_rate(), 8000);
        assert!((track.duration() - 1.0).abs() < 1e-9);
        assert!((track.sample(10, 0) - 0.5).abs() < 1e-3);
    }
}
