//! Tick to seconds conversion.

use midly::{MetaMessage, Smf, Timing, TrackEventKind};

/// 120 BPM, the Standard MIDI File default
const DEFAULT_US_PER_QUARTER: f64 = 500_000.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TempoSegment {
    tick: u64,
    seconds: f64,
    us_per_quarter: f64,
}

/// Global tempo map merged from the tempo events of every track
#[derive(Clone, Debug, PartialEq)]
pub enum TempoMap {
    /// Ticks per quarter note, with tempo changes
    Metrical {
        ticks_per_quarter: f64,
        segments: Vec<TempoSegment>,
    },
    /// Fixed ticks per second (SMPTE timing ignores tempo events)
    Timecode { ticks_per_second: f64 },
}

impl TempoMap {
    pub fn from_smf(smf: &Smf<'_>) -> Self {
        match smf.header.timing {
            Timing::Metrical(ticks) => {
                let mut changes = Vec::new();
                for track in &smf.tracks {
                    let mut tick = 0u64;
                    for event in track {
                        tick += event.delta.as_int() as u64;
                        if let TrackEventKind::Meta(MetaMessage::Tempo(tempo)) = event.kind {
                            changes.push((tick, tempo.as_int() as f64));
                        }
                    }
                }
                Self::metrical(ticks.as_int() as f64, changes)
            }
            Timing::Timecode(fps, ticks_per_frame) => Self::Timecode {
                ticks_per_second: fps.as_f32() as f64 * ticks_per_frame as f64,
            },
        }
    }

    /// Build from `(tick, microseconds per quarter)` changes in any order
    pub fn metrical(ticks_per_quarter: f64, mut changes: Vec<(u64, f64)>) -> Self {
        changes.sort_by_key(|&(tick, _)| tick);

        let mut segments = vec![TempoSegment {
            tick: 0,
            seconds: 0.0,
            us_per_quarter: DEFAULT_US_PER_QUARTER,
        }];

        for (tick, us_per_quarter) in changes {
            let Some(last) = segments.last_mut() else {
                continue;
            };
            if last.tick == tick {
                // a later change at the same tick wins
                last.us_per_quarter = us_per_quarter;
                continue;
            }
            let seconds = last.seconds
                + (tick - last.tick) as f64 * last.us_per_quarter / 1_000_000.0
                    / ticks_per_quarter;
            segments.push(TempoSegment {
                tick,
                seconds,
                us_per_quarter,
            });
        }

        Self::Metrical {
            ticks_per_quarter,
            segments,
        }
    }

    /// Absolute time of `tick` in seconds
    pub fn seconds_at(&self, tick: u64) -> f64 {
        match self {
            Self::Metrical {
                ticks_per_quarter,
                segments,
            } => {
                let index = segments.partition_point(|s| s.tick <= tick).max(1) - 1;
                let segment = &segments[index];
                segment.seconds
                    + (tick - segment.tick) as f64 * segment.us_per_quarter / 1_000_000.0
                        / ticks_per_quarter
            }
            Self::Timecode { ticks_per_second } => tick as f64 / ticks_per_second,
        }
    }
}
