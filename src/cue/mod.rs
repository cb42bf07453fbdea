//! Cue scheduling: note events in, time-ordered animation triggers out.

mod scheduler;
mod timeline;

pub use scheduler::{register_cues, schedule_cues, Cue};
pub use timeline::{CueTimeline, ScheduledCue};

/// What a fired cue does
///
/// Dispatched with a `match`; each variant names one reaction of the show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CueAction {
    /// Drive the glyph stage's cycle with the cue number
    Glyphs,
}
