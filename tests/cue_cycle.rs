//! Drives MIDI loading, cue scheduling, the timeline and the stage together
//! through a full track.

use std::path::Path;
use std::sync::Arc;

use glam::Vec2;
use midly::num::{u15, u24, u28, u4, u7};
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};

use glyphs::audio::AudioTrack;
use glyphs::cue::{register_cues, CueAction, CueTimeline};
use glyphs::midi::MidiDocument;
use glyphs::params::{CycleParams, GlyphParams};
use glyphs::show::{Show, ShowConfig};
use glyphs::stage::{CuePhase, Stage};

/// Quarter notes at 120 BPM, so note `i` sounds at `i * 0.5` seconds
const TICKS_PER_QUARTER: u16 = 480;

fn note_on(delta: u32, key: u8) -> TrackEvent<'static> {
    TrackEvent {
        delta: u28::new(delta),
        kind: TrackEventKind::Midi {
            channel: u4::new(0),
            message: MidiMessage::NoteOn {
                key: u7::new(key),
                vel: u7::new(100),
            },
        },
    }
}

fn meta(message: MetaMessage<'static>) -> TrackEvent<'static> {
    TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(message),
    }
}

/// Track 1 holds a two-note chord followed by `beats - 1` single notes
fn write_midi(path: &Path, beats: u32) {
    let mut smf = Smf::new(Header::new(
        Format::Parallel,
        Timing::Metrical(u15::new(TICKS_PER_QUARTER)),
    ));
    smf.tracks.push(vec![
        meta(MetaMessage::Tempo(u24::new(500_000))),
        meta(MetaMessage::EndOfTrack),
    ]);

    let mut melody = vec![
        meta(MetaMessage::TrackName(b"Melody")),
        note_on(TICKS_PER_QUARTER as u32, 60),
        note_on(0, 64),
    ];
    for beat in 1..beats {
        melody.push(note_on(TICKS_PER_QUARTER as u32, 60 + (beat % 12) as u8));
    }
    melody.push(meta(MetaMessage::EndOfTrack));
    smf.tracks.push(melody);

    smf.save(path).unwrap();
}

fn write_wav(path: &Path, seconds: f32) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 8_000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    let frames = (seconds * spec.sample_rate as f32) as usize;
    for i in 0..frames {
        let t = i as f32 / spec.sample_rate as f32;
        let sample = (t * 110.0 * std::f32::consts::TAU).sin() * 0.5;
        writer.write_sample((sample * i16::MAX as f32) as i16).unwrap();
    }
    writer.finalize().unwrap();
}

#[test]
fn test_full_track_walks_every_phase() {
    let dir = tempfile::tempdir().unwrap();
    let midi_path = dir.path().join("song.mid");
    write_midi(&midi_path, 140);

    let midi = MidiDocument::load(&midi_path).unwrap();
    let notes = &midi.track(1).unwrap().notes;
    assert_eq!(notes.len(), 141);

    let mut timeline = CueTimeline::new();
    let total = register_cues(&mut timeline, notes, CueAction::Glyphs, false);
    assert_eq!(total, 140);

    let cycle = CycleParams::default();
    let padding = cycle.placement_padding_px;
    let mut stage = Stage::new(
        Vec2::new(1280.0, 720.0),
        cycle.clone(),
        GlyphParams::default(),
        total,
        Some(2024),
    );

    let mut expected = 1;
    let mut now = 0.0;
    while now < 80.0 {
        now += 0.25;
        for scheduled in timeline.advance(now) {
            let number = scheduled.cue.number;
            assert_eq!(number, expected);
            assert!(scheduled.time <= now);
            expected += 1;

            let position = cycle.position(number);
            let phase = match scheduled.action {
                CueAction::Glyphs => stage.handle_cue(number),
            };
            let glyphs = stage.glyphs();

            if number == total {
                assert_eq!(phase, CuePhase::Finale);
                assert_eq!(glyphs.len(), 1);
                assert!(glyphs[0].is_finale());
            } else if position == 1 {
                assert_eq!(phase, CuePhase::Reset);
                assert_eq!(glyphs.len(), 1);
                assert!(!glyphs[0].is_growing());
            } else if (60..66).contains(&position) {
                assert_eq!(phase, CuePhase::Burst);
                assert_eq!(glyphs.len(), 1);
                assert!(glyphs[0].is_growing());
            } else {
                assert!(matches!(phase, CuePhase::Steady { .. }));
                assert!((1..=5).contains(&glyphs.len()));
            }

            // Nothing moves between cues here, so packing must hold pairwise
            for (i, a) in glyphs.iter().enumerate() {
                for b in &glyphs[i + 1..] {
                    let gap = a.position().distance(b.position());
                    assert!(gap > a.radius() + b.radius() + padding);
                }
            }
        }
    }

    assert_eq!(expected, total + 1);
    assert_eq!(timeline.pending(), 0);
    assert!(stage.is_finished());
    assert_eq!(stage.handle_cue(1), CuePhase::Ignored);
}

#[test]
fn test_show_plays_loaded_files() {
    let dir = tempfile::tempdir().unwrap();
    let midi_path = dir.path().join("song.mid");
    let wav_path = dir.path().join("song.wav");
    write_midi(&midi_path, 8);
    write_wav(&wav_path, 5.0);

    let midi = MidiDocument::load(&midi_path).unwrap();
    let track = Arc::new(AudioTrack::load(&wav_path).unwrap());
    assert!((track.duration() - 5.0).abs() < 1e-3);

    let config = ShowConfig {
        seed: Some(5),
        ..ShowConfig::default()
    };
    let mut show = Show::new(track, &midi.track(1).unwrap().notes, config).unwrap();
    assert_eq!(show.stage().total_cues(), 8);

    let fps = 30.0;
    let mut drawn_frames = 0;
    for frame in 0..(5.0 * fps) as usize {
        let vertices = show.tick(frame as f64 / fps, true);
        if !vertices.is_empty() {
            drawn_frames += 1;
        }
    }

    // First cue at 0.5s, so the opening frames stay empty
    assert!(drawn_frames > 0);
    assert!(drawn_frames < 150);
    assert_eq!(show.scene().frame_count(), drawn_frames);
    assert!(show.stage().is_finished());
    assert!(show.stage().glyphs()[0].is_finale());
}

#[test]
fn test_missing_track_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let midi_path = dir.path().join("song.mid");
    write_midi(&midi_path, 3);

    let midi = MidiDocument::load(&midi_path).unwrap();
    assert!(matches!(
        midi.track(4),
        Err(glyphs::GlyphsError::TrackOutOfRange { index: 4, count: 2 })
    ));
}
