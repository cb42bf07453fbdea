//! Frequency band extraction with a windowed FFT.

use std::f32::consts::PI;
use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};

use super::{AudioBands, AudioTrack};
use crate::error::{GlyphsError, Result};
use crate::params::FFTConfig;

/// Band energies for the window of audio under the playhead
pub struct SpectrumAnalyzer {
    config: FFTConfig,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    buffer: Vec<Complex<f32>>,
}

impl SpectrumAnalyzer {
    pub fn new(config: FFTConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| GlyphsError::Config(format!("Invalid FFT config: {}", e)))?;

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(config.fft_size);
        let window = (0..config.fft_size)
            .map(|i| hann_window(i, config.fft_size))
            .collect();

        Ok(Self {
            buffer: vec![Complex::new(0.0, 0.0); config.fft_size],
            config,
            fft,
            window,
        })
    }

    /// Bands of the window centred on `time_s`
    pub fn bands_at(&mut self, track: &AudioTrack, time_s: f64) -> AudioBands {
        let center = (time_s.max(0.0) * track.sample_rate() as f64) as usize;
        let start = center.saturating_sub(self.config.fft_size / 2);
        let samples = track.mono_window(start, self.config.fft_size);
        self.analyze(&samples)
    }

    /// Bands of `samples` (zero-padded or truncated to the FFT size)
    pub fn analyze(&mut self, samples: &[f32]) -> AudioBands {
        for (i, slot) in self.buffer.iter_mut().enumerate() {
            let sample = samples.get(i).copied().unwrap_or(0.0);
            *slot = Complex::new(sample * self.window[i], 0.0);
        }

        self.fft.process(&mut self.buffer);

        // A full-scale sine under a Hann window peaks at fft_size / 4
        let norm = 4.0 / self.config.fft_size as f32;
        let band = |bins: std::ops::Range<usize>| {
            let len = bins.len().max(1) as f32;
            self.buffer[bins].iter().map(|c| c.norm()).sum::<f32>() * norm / len
        };

        AudioBands {
            low: band(self.config.bass_bins()),
            mid: band(self.config.mid_bins()),
            high: band(self.config.high_bins()),
        }
    }
}

/// Hann window function for FFT analysis
pub fn hann_window(index: usize, size: usize) -> f32 {
    0.5 * (1.0 - ((2.0 * PI * index as f32) / (size as f32 - 1.0)).cos())
}
