//! Note eligibility
//!
//! Decides which notes take part in the compiled outputs.

use crate::event::{EventSequence, Note};

/// Rejects rests, pitchless notes and, in multi-part scores, the first part.
///
/// The first part of a multi-part score is the reference/accompaniment
/// track and is never played back or annotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteFilter {
    part_count: usize,
}

impl NoteFilter {
    pub fn new(part_count: usize) -> Self {
        Self { part_count }
    }

    pub fn for_sequence(sequence: &EventSequence) -> Self {
        Self::new(sequence.part_count)
    }

    pub fn is_eligible(&self, note: &Note) -> bool {
        if note.rest || note.midi_number == 0 {
            return false;
        }
        !(self.part_count > 1 && note.part == 0)
    }

    /// Pitches of the eligible notes, in input order.
    pub fn eligible_pitches<'a>(&'a self, notes: &'a [Note]) -> impl Iterator<Item = u8> + 'a {
        notes
            .iter()
            .filter(move |note| self.is_eligible(note))
            .map(|note| note.midi_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rests_are_rejected() {
        let filter = NoteFilter::new(1);
        assert!(!filter.is_eligible(&Note::rest(0)));
        assert!(filter.is_eligible(&Note::pitched(60, 0)));
    }

    #[test]
    fn test_first_part_rejected_in_multi_part_score() {
        let filter = NoteFilter::new(2);
        assert!(!filter.is_eligible(&Note::pitched(60, 0)));
        assert!(filter.is_eligible(&Note::pitched(60, 1)));
    }

    #[test]
    fn test_single_part_score_keeps_first_part() {
        let filter = NoteFilter::new(1);
        assert!(filter.is_eligible(&Note::pitched(72, 0)));
    }

    #[test]
    fn test_pitchless_note_rejected() {
        let filter = NoteFilter::new(1);
        assert!(!filter.is_eligible(&Note::pitched(0, 0)));
    }

    #[test]
    fn test_eligible_pitches_preserves_order() {
        let filter = NoteFilter::new(2);
        let notes = vec![
            Note::pitched(67, 1),
            Note::pitched(48, 0),
            Note::rest(1),
            Note::pitched(60, 1),
        ];
        let pitches: Vec<u8> = filter.eligible_pitches(&notes).collect();
        assert_eq!(pitches, vec![67, 60]);
    }
}
