//! # Sequence Module
//!
//! Compile an event sequence into a performable music sequence: a tempo track
//! and a note track, both in beat time, ready for a standard tempo-track +
//! note-track sequence writer.
//!
//! ## Sub-modules
//! - `types` - TempoEvent, NoteEvent, Track, MusicSequence and the SequenceSink seam
//! - `engine` - Traversal and two-phase build
//!
//! ## Entry Points
//! - [`compile_sequence()`] - Build an owned [`MusicSequence`]
//! - [`compile_sequence_into()`] - Build into any [`SequenceSink`]
//!
//! ## Note Modes
//!
//! ### With duration (default)
//! One event per onset. Its duration in beats is fixed when the note is
//! released: `release_beat - onset_beat`.
//!
//! ### Paired on/off
//! An on event at the onset with the note's velocity, and an off event with
//! velocity zero at the release.
//!
//! In both modes a pitch struck again while still sounding is closed at the
//! new onset, off-notes for silent pitches produce nothing, and pitches still
//! sounding after the last event are closed at the last event's beat.
//!
//! ## Beat Positions
//! `absolute_time / divisions_per_beat`. A measure that changes the division
//! unit starts a new span, see [`BeatClock`](crate::time::BeatClock).
//!
//! ## Tempo Track
//! One entry per tempo change, starting with the first event's tempo. The
//! tempo multiplier scales every bpm.

mod engine;
mod types;


pub use engine::{compile_sequence, compile_sequence_into};
pub use types::{BeatStamped, MusicSequence, NoteEvent, NoteMode, SequenceSink, TempoEvent, Track};
