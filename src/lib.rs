//! Glyphs library - MIDI-cued generative glyph animation

pub mod audio;
pub mod cue;
pub mod error;
pub mod glyph;
pub mod midi;
pub mod palette;
pub mod params;
pub mod recording;
pub mod rendering;
pub mod scene;
pub mod show;
pub mod stage;

pub use error::{GlyphsError, Result};
