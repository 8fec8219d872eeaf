//! # Note State Tracking
//!
//! Keeps one onset record per sounding pitch while the compilers walk the
//! event sequence, and reports how long each pitch has been sounding.
//!
//! ## Processing Order
//!
//! Each event is applied in a fixed order: **first** every released pitch is
//! removed, **then** every struck pitch is inserted with the event's own
//! timestamp. When a pitch is released and struck again at the same instant,
//! the new onset wins and the old sustain is discarded. Within one event,
//! the last strike of a pitch wins.
//!
//! A release with no matching record is ignored; a strike of a pitch that is
//! already sounding replaces its record.
//!
//! ## Example
//! ```rust
//! use scoremap::NoteStateTracker;
//!
//! let mut tracker = NoteStateTracker::new();
//! tracker.apply_event([], [60, 64], 0_i64);
//! let snapshot = tracker.apply_event([60], [60], 500_i64);
//!
//! assert_eq!(snapshot[0].midi_number, 60);
//! assert_eq!(snapshot[0].elapsed, 0);
//! assert_eq!(snapshot[1].midi_number, 64);
//! assert_eq!(snapshot[1].elapsed, 500);
//! ```

use std::collections::BTreeMap;
use std::ops::Sub;

use tracing::trace;

/// A point in time the tracker can measure sustain against.
pub trait Timestamp: Copy + PartialOrd + Sub<Output = Self> + Default {}

impl<T: Copy + PartialOrd + Sub<Output = T> + Default> Timestamp for T {}

/// One sounding pitch in a snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveNote<T> {
    pub midi_number: u8,
    pub onset: T,
    /// Time since onset; never negative.
    pub elapsed: T,
}

/// Mapping from sounding pitch to its onset record.
///
/// Records are kept ordered by pitch, so snapshots come out in ascending
/// `midi_number` order. One tracker is created per compile run.
#[derive(Debug, Clone)]
pub struct NoteStateTracker<T> {
    active: BTreeMap<u8, T>,
}

impl<T> Default for NoteStateTracker<T> {
    fn default() -> Self {
        Self {
            active: BTreeMap::new(),
        }
    }
}

impl<T: Copy> NoteStateTracker<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove the record for `midi_number`, returning it if one existed.
    pub fn release(&mut self, midi_number: u8) -> Option<T> {
        let removed = self.active.remove(&midi_number);
        if removed.is_none() {
            trace!(midi_number, "release without a sounding note");
        }
        removed
    }

    /// Insert or overwrite the record for `midi_number`, returning the
    /// replaced record if the pitch was already sounding.
    pub fn strike(&mut self, midi_number: u8, record: T) -> Option<T> {
        self.active.insert(midi_number, record)
    }

    pub fn get(&self, midi_number: u8) -> Option<T> {
        self.active.get(&midi_number).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// Take every remaining record, in ascending pitch order.
    pub fn drain(&mut self) -> Vec<(u8, T)> {
        std::mem::take(&mut self.active).into_iter().collect()
    }
}

impl<T: Timestamp> NoteStateTracker<T> {
    /// Apply one event: releases first, then strikes at `at`.
    ///
    /// Returns the snapshot of every pitch sounding after the event.
    pub fn apply_event<R, S>(&mut self, released: R, struck: S, at: T) -> Vec<ActiveNote<T>>
    where
        R: IntoIterator<Item = u8>,
        S: IntoIterator<Item = u8>,
    {
        for midi_number in released {
            self.release(midi_number);
        }
        for midi_number in struck {
            self.strike(midi_number, at);
        }
        self.snapshot(at)
    }

    /// Every sounding pitch with its sustain as of `now`, ascending by pitch.
    pub fn snapshot(&self, now: T) -> Vec<ActiveNote<T>> {
        self.active
            .iter()
            .map(|(&midi_number, &onset)| ActiveNote {
                midi_number,
                onset,
                elapsed: if now > onset { now - onset } else { T::default() },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strike_then_release() {
        let mut tracker = NoteStateTracker::new();
        let snapshot = tracker.apply_event([], [60], 0_i64);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].elapsed, 0);

        let snapshot = tracker.apply_event([60], [], 250_i64);
        assert!(snapshot.is_empty());
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_sustain_accumulates() {
        let mut tracker = NoteStateTracker::new();
        tracker.apply_event([], [60], 100_i64);
        let snapshot = tracker.apply_event([], [67], 400_i64);

        assert_eq!(
            snapshot,
            vec![
                ActiveNote { midi_number: 60, onset: 100, elapsed: 300 },
                ActiveNote { midi_number: 67, onset: 400, elapsed: 0 },
            ]
        );
    }

    #[test]
    fn test_release_and_restrike_same_instant_uses_new_onset() {
        let mut tracker = NoteStateTracker::new();
        tracker.apply_event([], [60], 0_i64);
        let snapshot = tracker.apply_event([60], [60], 800_i64);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].onset, 800);
        assert_eq!(snapshot[0].elapsed, 0);

        let snapshot = tracker.apply_event([], [], 1000_i64);
        assert_eq!(snapshot[0].elapsed, 200);
    }

    #[test]
    fn test_release_without_record_is_ignored() {
        let mut tracker: NoteStateTracker<i64> = NoteStateTracker::new();
        let snapshot = tracker.apply_event([72], [], 10);
        assert!(snapshot.is_empty());
        assert_eq!(tracker.release(72), None);
    }

    #[test]
    fn test_restrike_without_release_replaces_record() {
        let mut tracker = NoteStateTracker::new();
        tracker.apply_event([], [60], 0_i64);
        assert_eq!(tracker.strike(60, 300), Some(0));
        assert_eq!(tracker.get(60), Some(300));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_duplicate_strikes_in_one_event_last_wins() {
        let mut tracker = NoteStateTracker::new();
        let snapshot = tracker.apply_event([], [64, 64], 50_i64);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].onset, 50);
    }

    #[test]
    fn test_snapshot_sorted_by_pitch() {
        let mut tracker = NoteStateTracker::new();
        let snapshot = tracker.apply_event([], [72, 48, 60], 0_i64);
        let pitches: Vec<u8> = snapshot.iter().map(|n| n.midi_number).collect();
        assert_eq!(pitches, vec![48, 60, 72]);
    }

    #[test]
    fn test_elapsed_never_negative() {
        let mut tracker = NoteStateTracker::new();
        tracker.strike(60, 1.5_f64);
        let snapshot = tracker.snapshot(1.0);
        assert_eq!(snapshot[0].elapsed, 0.0);
    }

    #[test]
    fn test_drain_empties_in_pitch_order() {
        let mut tracker = NoteStateTracker::new();
        tracker.strike(67, 1_usize);
        tracker.strike(60, 2_usize);
        assert_eq!(tracker.drain(), vec![(60, 2), (67, 1)]);
        assert!(tracker.is_empty());
    }
}
