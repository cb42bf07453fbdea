//! Parameter definitions with units and documented semantics.
//!
//! All magic numbers of the animation are extracted here with:
//! - Units (pixels, frames, degrees, Hz, etc.)
//! - Documented ranges and meanings
//! - Type safety where possible

mod audio;
mod cycle;
mod glyph;
mod render;

// Re-export all types
pub use audio::{AudioReactiveMapping, FFTConfig};
pub use cycle::CycleParams;
pub use glyph::GlyphParams;
pub use render::{RecordingConfig, RenderConfig};
