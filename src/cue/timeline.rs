//! Time-ordered cue registry that fires entries as playback passes them.

use super::scheduler::Cue;

/// A cue registered to fire `action` at `time`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduledCue<A> {
    pub time: f64,
    pub action: A,
    pub cue: Cue,
}

/// Cues sorted by time with a cursor past the ones already fired
#[derive(Clone, Debug)]
pub struct CueTimeline<A> {
    entries: Vec<ScheduledCue<A>>,
    cursor: usize,
}

impl<A> Default for CueTimeline<A> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
        }
    }
}

impl<A> CueTimeline<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cues not fired yet
    pub fn pending(&self) -> usize {
        self.entries.len() - self.cursor
    }

    /// Register a cue; equal times fire in registration order
    ///
    /// A cue landing before already-fired entries is treated as fired too.
    pub fn add_cue(&mut self, time: f64, action: A, cue: Cue) {
        let index = self.entries.partition_point(|e| e.time <= time);
        if index < self.cursor {
            self.cursor += 1;
        }
        self.entries.insert(index, ScheduledCue { time, action, cue });
    }

    /// Fire every pending cue with `time <= now`, in order
    pub fn advance(&mut self, now: f64) -> &[ScheduledCue<A>] {
        let start = self.cursor;
        let end = start + self.entries[start..].partition_point(|e| e.time <= now);
        self.cursor = end;
        &self.entries[start..end]
    }

    /// Make every cue pending again
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::midi::NoteEvent;

    fn cue(number: u32, time: f64) -> Cue {
        Cue {
            number,
            note: NoteEvent {
                tick: number as u64,
                time,
                key: 64,
                velocity: 90,
            },
        }
    }

    fn fired(timeline: &mut CueTimeline<()>, now: f64) -> Vec<u32> {
        timeline.advance(now).iter().map(|e| e.cue.number).collect()
    }

    #[test]
    fn test_fires_only_when_reached() {
        let mut timeline = CueTimeline::new();
        timeline.add_cue(1.0, (), cue(1, 1.0));
        timeline.add_cue(2.0, (), cue(2, 2.0));

        assert!(fired(&mut timeline, 0.5).is_empty());
        assert_eq!(fired(&mut timeline, 1.0), vec![1]);
        assert_eq!(fired(&mut timeline, 5.0), vec![2]);
        assert_eq!(timeline.pending(), 0);
    }

    #[test]
    fn test_each_cue_fires_once() {
        let mut timeline = CueTimeline::new();
        timeline.add_cue(1.0, (), cue(1, 1.0));

        assert_eq!(fired(&mut timeline, 3.0), vec![1]);
        assert!(fired(&mut timeline, 3.0).is_empty());
        // going back in time does not re-fire
        assert!(fired(&mut timeline, 0.0).is_empty());
    }

    #[test]
    fn test_out_of_order_registration_is_sorted() {
        let mut timeline = CueTimeline::new();
        timeline.add_cue(3.0, (), cue(3, 3.0));
        timeline.add_cue(1.0, (), cue(1, 1.0));
        timeline.add_cue(2.0, (), cue(2, 2.0));

        assert_eq!(fired(&mut timeline, 10.0), vec![1, 2, 3]);
    }

    #[test]
    fn test_equal_times_keep_registration_order() {
        let mut timeline = CueTimeline::new();
        timeline.add_cue(1.0, (), cue(1, 1.0));
        timeline.add_cue(1.0, (), cue(2, 1.0));

        assert_eq!(fired(&mut timeline, 1.0), vec![1, 2]);
    }

    #[test]
    fn test_late_registration_in_the_past_does_not_fire() {
        let mut timeline = CueTimeline::new();
        timeline.add_cue(1.0, (), cue(1, 1.0));
        timeline.add_cue(2.0, (), cue(2, 2.0));
        assert_eq!(fired(&mut timeline, 2.5), vec![1, 2]);

        timeline.add_cue(0.5, (), cue(9, 0.5));
        timeline.add_cue(3.0, (), cue(3, 3.0));
        assert_eq!(fired(&mut timeline, 10.0), vec![3]);
    }

    #[test]
    fn test_rewind_replays() {
        let mut timeline = CueTimeline::new();
        timeline.add_cue(1.0, (), cue(1, 1.0));
        fired(&mut timeline, 2.0);

        timeline.rewind();
        assert_eq!(timeline.pending(), 1);
        assert_eq!(fired(&mut timeline, 2.0), vec![1]);
    }
}
