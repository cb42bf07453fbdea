//! Standard MIDI File loading.
//!
//! Parses a file with `midly` and flattens every track into note-on events
//! stamped with both their absolute tick and their time in seconds.

mod tempo;

pub use tempo::TempoMap;

use std::path::Path;

use log::info;
use midly::{MetaMessage, MidiMessage, Smf, TrackEventKind};

use crate::error::{GlyphsError, Result};

/// A note-on event of one track
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoteEvent {
    /// Absolute position in MIDI ticks
    pub tick: u64,
    /// Absolute position in seconds
    pub time: f64,
    pub key: u8,
    pub velocity: u8,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MidiTrack {
    pub name: Option<String>,
    /// Sorted by tick; notes on the same tick keep file order
    pub notes: Vec<NoteEvent>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MidiDocument {
    pub tracks: Vec<MidiTrack>,
}

impl MidiDocument {
    /// Read and parse a `.mid` file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| GlyphsError::io(path, e))?;
        let document = Self::parse(&bytes)?;
        info!(
            "MIDI loaded: {} ({} tracks)",
            path.display(),
            document.tracks.len()
        );
        Ok(document)
    }

    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let smf = Smf::parse(bytes)?;
        let tempo = TempoMap::from_smf(&smf);

        let tracks = smf
            .tracks
            .iter()
            .map(|events| {
                let mut track = MidiTrack::default();
                let mut tick = 0u64;

                for event in events {
                    tick += event.delta.as_int() as u64;
                    match event.kind {
                        TrackEventKind::Meta(MetaMessage::TrackName(name)) => {
                            track.name = Some(String::from_utf8_lossy(name).into_owned());
                        }
                        TrackEventKind::Midi {
                            message: MidiMessage::NoteOn { key, vel },
                            ..
                        } if vel.as_int() > 0 => {
                            track.notes.push(NoteEvent {
                                tick,
                                time: tempo.seconds_at(tick),
                                key: key.as_int(),
                                velocity: vel.as_int(),
                            });
                        }
                        _ => {}
                    }
                }

                track.notes.sort_by_key(|n| n.tick);
                track
            })
            .collect();

        Ok(Self { tracks })
    }

    /// Notes of track `index`
    pub fn track(&self, index: usize) -> Result<&MidiTrack> {
        self.tracks.get(index).ok_or(GlyphsError::TrackOutOfRange {
            index,
            count: self.tracks.len(),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use midly::num::{u15, u24, u28, u4, u7};
    use midly::{Format, Header, Timing, TrackEvent};

    fn note_on(delta: u32, key: u8, vel: u8) -> TrackEvent<'static> {
        TrackEvent {
            delta: u28::new(delta),
            kind: TrackEventKind::Midi {
                channel: u4::new(0),
                message: MidiMessage::NoteOn {
                    key: u7::new(key),
                    vel: u7::new(vel),
                },
            },
        }
    }

    fn meta(delta: u32, message: MetaMessage<'static>) -> TrackEvent<'static> {
        TrackEvent {
            delta: u28::new(delta),
            kind: TrackEventKind::Meta(message),
        }
    }

    /// Two-track file: tempo map on track 0, a chord and two notes on track 1
    pub(crate) fn sample_file() -> Vec<u8> {
        let mut smf = Smf::new(Header::new(Format::Parallel, Timing::Metrical(u15::new(480))));
        smf.tracks.push(vec![
            meta(0, MetaMessage::TrackName(b"Conductor")),
            meta(0, MetaMessage::Tempo(u24::new(500_000))),
            meta(960, MetaMessage::Tempo(u24::new(1_000_000))),
            meta(0, MetaMessage::EndOfTrack),
        ]);
        smf.tracks.push(vec![
            meta(0, MetaMessage::TrackName(b"Dream Piano")),
            note_on(480, 60, 100),
            note_on(0, 64, 100),
            note_on(0, 67, 0), // note-off in disguise
            note_on(480, 62, 90),
            note_on(480, 65, 80),
            meta(0, MetaMessage::EndOfTrack),
        ]);

        let mut bytes = Vec::new();
        smf.write_std(&mut bytes).expect("in-memory write");
        bytes
    }

    #[test]
    fn test_parse_tracks_and_names() {
        let doc = MidiDocument::parse(&sample_file()).unwrap();
        assert_eq!(doc.tracks.len(), 2);
        assert_eq!(doc.tracks[0].name.as_deref(), Some("Conductor"));
        assert!(doc.tracks[0].notes.is_empty());
        assert_eq!(doc.tracks[1].name.as_deref(), Some("Dream Piano"));
    }

    #[test]
    fn test_notes_carry_ticks_and_seconds() {
        let doc = MidiDocument::parse(&sample_file()).unwrap();
        let notes = &doc.track(1).unwrap().notes;

        let ticks: Vec<u64> = notes.iter().map(|n| n.tick).collect();
        assert_eq!(ticks, vec![480, 480, 960, 1440]);

        // 120 BPM up to tick 960, 60 BPM after
        assert!((notes[0].time - 0.5).abs() < 1e-9);
        assert!((notes[2].time - 1.0).abs() < 1e-9);
        assert!((notes[3].time - 2.0).abs() < 1e-9);
        assert_eq!(notes[1].key, 64);
    }

    #[test]
    fn test_track_out_of_range() {
        let doc = MidiDocument::parse(&sample_file()).unwrap();
        match doc.track(4) {
            Err(GlyphsError::TrackOutOfRange { index, count }) => {
                assert_eq!(index, 4);
                assert_eq!(count, 2);
            }
            other => panic!("expected out of range, got {:?}", other),
        }
    }

    #[test]
    fn test_garbage_is_a_midi_error() {
        assert!(matches!(
            MidiDocument::parse(b"not a midi file"),
            Err(GlyphsError::Midi(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            MidiDocument::load("/definitely/not/here.mid"),
            Err(GlyphsError::Io { .. })
        ));
    }
}
