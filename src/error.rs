//! Error type shared by loaders, audio, and rendering.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GlyphsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid MIDI file: {0}")]
    Midi(#[from] midly::Error),

    #[error("invalid WAV file: {0}")]
    Wav(#[from] hound::Error),

    #[error("track {index} out of range (file has {count} tracks)")]
    TrackOutOfRange { index: usize, count: usize },

    #[error("audio device error: {0}")]
    Audio(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("failed to write frame {frame}: {source}")]
    Frame {
        frame: usize,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl GlyphsError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T, E = GlyphsError> = std::result::Result<T, E>;
