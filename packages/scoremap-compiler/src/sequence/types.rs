//! Music sequence type definitions
//!
//! This module defines the owned tempo and note tracks handed to a sequence
//! writer, and the [`SequenceSink`] seam through which tracks accept events.

use serde::{Deserialize, Serialize};

use crate::error::TrackError;

/// A tempo change at a beat position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TempoEvent {
    pub time_stamp_beats: f64,
    pub beats_per_minute: f64,
}

/// How notes are laid out on the note track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoteMode {
    /// One event per onset carrying its duration in beats.
    #[default]
    WithDuration,
    /// An on event with velocity and an off event with velocity zero.
    PairedOnOff,
}

impl NoteMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "with-duration" | "duration" => Some(NoteMode::WithDuration),
            "paired-on-off" | "paired" => Some(NoteMode::PairedOnOff),
            _ => None,
        }
    }
}

/// A note event on the note track.
///
/// # Shapes
/// - `duration: Some(d)` - note-with-duration (`NoteMode::WithDuration`)
/// - `duration: None, velocity > 0` - note on (`NoteMode::PairedOnOff`)
/// - `duration: None, velocity == 0` - note off (`NoteMode::PairedOnOff`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    pub time_stamp_beats: f64,
    pub pitch: u8,
    pub velocity: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl NoteEvent {
    pub fn is_note_off(&self) -> bool {
        self.duration.is_none() && self.velocity == 0
    }
}

/// Anything with a position in beats.
pub trait BeatStamped {
    fn time_stamp_beats(&self) -> f64;
}

impl BeatStamped for TempoEvent {
    fn time_stamp_beats(&self) -> f64 {
        self.time_stamp_beats
    }
}

impl BeatStamped for NoteEvent {
    fn time_stamp_beats(&self) -> f64 {
        self.time_stamp_beats
    }
}

/// An owned, time-ordered track.
#[derive(Debug, Clone, PartialEq)]
pub struct Track<E> {
    events: Vec<E>,
}

impl<E> Default for Track<E> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<E: BeatStamped> Track<E> {
    /// Append an event; timestamps must be finite, non-negative and non-decreasing.
    fn push(&mut self, event: E) -> Result<(), TrackError> {
        let time = event.time_stamp_beats();
        if !time.is_finite() || time < 0.0 {
            return Err(TrackError::InvalidTimestamp(time));
        }
        if let Some(previous) = self.events.last().map(BeatStamped::time_stamp_beats) {
            if time < previous {
                return Err(TrackError::OutOfOrder { time, previous });
            }
        }
        self.events.push(event);
        Ok(())
    }
}

impl<E> Track<E> {
    pub fn events(&self) -> &[E] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.events.iter()
    }
}

/// Receiver of compiled sequence events.
///
/// A sink may refuse an event; the compiler then abandons the whole build.
pub trait SequenceSink {
    fn add_tempo_event(&mut self, event: TempoEvent) -> Result<(), TrackError>;
    fn add_note_event(&mut self, event: NoteEvent) -> Result<(), TrackError>;
}

/// A compiled music sequence: one tempo track and one note track in beat time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MusicSequence {
    mode: NoteMode,
    tempo_track: Track<TempoEvent>,
    note_track: Track<NoteEvent>,
}

impl MusicSequence {
    pub fn new(mode: NoteMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> NoteMode {
        self.mode
    }

    pub fn tempo_track(&self) -> &Track<TempoEvent> {
        &self.tempo_track
    }

    pub fn note_track(&self) -> &Track<NoteEvent> {
        &self.note_track
    }

    /// Beat position of the last sounding instant on either track.
    pub fn end_beat(&self) -> f64 {
        let tempo_end = self
            .tempo_track
            .iter()
            .map(|e| e.time_stamp_beats)
            .fold(0.0, f64::max);
        self.note_track
            .iter()
            .map(|e| e.time_stamp_beats + e.duration.unwrap_or(0.0))
            .fold(tempo_end, f64::max)
    }
}

impl SequenceSink for MusicSequence {
    fn add_tempo_event(&mut self, event: TempoEvent) -> Result<(), TrackError> {
        if !event.beats_per_minute.is_finite() || event.beats_per_minute <= 0.0 {
            return Err(TrackError::InvalidTempo(event.beats_per_minute));
        }
        self.tempo_track.push(event)
    }

    fn add_note_event(&mut self, event: NoteEvent) -> Result<(), TrackError> {
        if event.pitch > 127 {
            return Err(TrackError::InvalidPitch(event.pitch));
        }
        if event.velocity > 127 {
            return Err(TrackError::InvalidVelocity(event.velocity));
        }
        if let Some(duration) = event.duration {
            if !duration.is_finite() || duration < 0.0 {
                return Err(TrackError::InvalidDuration(duration));
            }
        }
        self.note_track.push(event)
    }
}
