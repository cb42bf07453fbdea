//! Audio analysis configuration and audio-reactive mapping.

use std::ops::Range;

/// FFT analysis configuration with frequency band mappings
#[derive(Debug, Clone)]
pub struct FFTConfig {
    /// Audio sample rate (Hz), taken from the loaded track
    pub sample_rate_hz: usize,

    /// FFT window size (must be power of 2)
    pub fft_size: usize,

    /// Bass frequency range (Hz)
    pub bass_range_hz: (f32, f32),

    /// Mid frequency range (Hz)
    pub mid_range_hz: (f32, f32),

    /// High frequency range (Hz)
    pub high_range_hz: (f32, f32),
}

impl Default for FFTConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 44100,
            fft_size: 1024,
            bass_range_hz: (20.0, 200.0),
            mid_range_hz: (200.0, 1000.0),
            high_range_hz: (1000.0, 4000.0),
        }
    }
}

impl FFTConfig {
    /// Same band layout for a track with a different sample rate
    pub fn with_sample_rate(mut self, sample_rate_hz: usize) -> Self {
        self.sample_rate_hz = sample_rate_hz;
        self
    }

    /// Convert frequency (Hz) to FFT bin index
    pub fn hz_to_bin(&self, hz: f32) -> usize {
        ((hz * self.fft_size as f32) / self.sample_rate_hz as f32) as usize
    }

    /// Get FFT bin range for bass frequencies
    pub fn bass_bins(&self) -> Range<usize> {
        self.band_bins(self.bass_range_hz)
    }

    /// Get FFT bin range for mid frequencies
    pub fn mid_bins(&self) -> Range<usize> {
        self.band_bins(self.mid_range_hz)
    }

    /// Get FFT bin range for high frequencies
    pub fn high_bins(&self) -> Range<usize> {
        self.band_bins(self.high_range_hz)
    }

    // Clamped to the lower half of the spectrum and at least one bin wide
    fn band_bins(&self, (lo, hi): (f32, f32)) -> Range<usize> {
        let nyquist_bin = self.fft_size / 2;
        let start = self.hz_to_bin(lo).min(nyquist_bin - 1);
        let end = self.hz_to_bin(hi).clamp(start + 1, nyquist_bin);
        start..end
    }

    /// Validate configuration (FFT size must be power of 2, etc.)
    pub fn validate(&self) -> Result<(), String> {
        if !self.fft_size.is_power_of_two() || self.fft_size < 2 {
            return Err(format!(
                "FFT size must be a power of 2, got {}",
                self.fft_size
            ));
        }
        if self.sample_rate_hz == 0 {
            return Err("Sample rate must be > 0".to_string());
        }
        Ok(())
    }
}

/// Mapping from audio frequency bands to visual parameters
#[derive(Debug, Clone)]
pub struct AudioReactiveMapping {
    /// Scale factor: bass energy → extra gradient border width (pixels per unit energy)
    /// Formula: border_width = base_border_width + bass * this_scale
    pub bass_to_border_scale: f32,

    /// Ceiling on the extra border width (pixels)
    pub max_border_boost_px: f32,
}

impl Default for AudioReactiveMapping {
    fn default() -> Self {
        Self {
            bass_to_border_scale: 60.0,
            max_border_boost_px: 24.0,
        }
    }
}

impl AudioReactiveMapping {
    /// Extra border width for the given bass energy
    pub fn border_boost(&self, bass: f32) -> f32 {
        (bass * self.bass_to_border_scale).clamp(0.0, self.max_border_boost_px)
    }
}
