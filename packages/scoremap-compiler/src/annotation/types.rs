//! Annotation timeline type definitions
//!
//! Field names on the wire are fixed by the downstream matcher; the serde
//! renames below are part of the output contract.

use serde::{Deserialize, Serialize};

/// A pitch sounding at an annotated instant.
///
/// # Fields
/// - `midi_number`: MIDI pitch
/// - `on_duration_millis`: time since the pitch's onset (`"on_duration"` on the wire)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationNote {
    pub midi_number: u8,
    #[serde(rename = "on_duration")]
    pub on_duration_millis: i64,
}

/// Snapshot of every sounding pitch at one event.
///
/// # Fields
/// - `time_stamp_millis`: event time in milliseconds (`"time_stamp"` on the wire)
/// - `measure_number`: fractional measure position (0.5 = halfway through the first measure)
/// - `notes`: all sounding pitches, ascending by `midi_number`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationEvent {
    #[serde(rename = "time_stamp")]
    pub time_stamp_millis: i64,
    pub measure_number: f64,
    pub notes: Vec<AnnotationNote>,
}

impl AnnotationEvent {
    pub fn midi_numbers(&self) -> Vec<u8> {
        self.notes.iter().map(|n| n.midi_number).collect()
    }
}
