//! Audio decoding, playback and spectrum analysis.

mod fft;
mod system;
mod track;

// Re-export public types
pub use fft::{hann_window, SpectrumAnalyzer};
pub use system::AudioSystem;
pub use track::AudioTrack;

/// Audio frequency band energies at one point of the track
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AudioBands {
    pub low: f32,  // Bass (20-200 Hz)
    pub mid: f32,  // Mids (200-1000 Hz)
    pub high: f32, // Highs (1000-4000 Hz)
}
