//! Turns a track's note events into numbered cues.

use crate::midi::NoteEvent;

use super::timeline::CueTimeline;

/// A note event that triggers the animation
///
/// Simultaneous notes collapse into one cue unless scheduling in poly mode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cue {
    /// 1-based, strictly increasing along the track
    pub number: u32,
    pub note: NoteEvent,
}

impl Cue {
    pub fn time(&self) -> f64 {
        self.note.time
    }
}

/// Number the notes of a track as cues
///
/// A note starts a new cue when its tick differs from the previous cue's
/// tick; in poly mode every note does.
pub fn schedule_cues(notes: &[NoteEvent], poly: bool) -> Vec<Cue> {
    let mut cues = Vec::new();
    let mut last_tick = None;
    let mut number = 1;

    for note in notes {
        if poly || last_tick != Some(note.tick) {
            cues.push(Cue {
                number,
                note: *note,
            });
            last_tick = Some(note.tick);
            number += 1;
        }
    }

    cues
}

/// Schedule `notes` and register every cue on `timeline` with `action`
///
/// Returns the number of cues registered.
pub fn register_cues<A: Copy>(
    timeline: &mut CueTimeline<A>,
    notes: &[NoteEvent],
    action: A,
    poly: bool,
) -> u32 {
    let cues = schedule_cues(notes, poly);
    let count = cues.len() as u32;
    for cue in cues {
        timeline.add_cue(cue.time(), action, cue);
    }
    count
}
