//! Tempo change detection
//!
//! Walks tempo values event by event and records one tempo event per change.

use tracing::trace;

use crate::sequence::TempoEvent;

/// Builds the tempo track of a music sequence.
///
/// The first observed tempo always produces an entry. After that an entry is
/// added only when the tempo differs from the previously observed one, so no
/// two consecutive entries share a bpm. Entries are strictly increasing in
/// beat position: a second change at the same beat replaces the first.
#[derive(Debug, Clone)]
pub struct TempoTrackBuilder {
    tempo_multiplier: f64,
    previous_tempo: Option<f64>,
    events: Vec<TempoEvent>,
}

impl TempoTrackBuilder {
    pub fn new(tempo_multiplier: f64) -> Self {
        Self {
            tempo_multiplier,
            previous_tempo: None,
            events: Vec::new(),
        }
    }

    /// Record `tempo` at `beat`, emitting an event if it changed.
    ///
    /// Returns the emitted (or updated) event.
    pub fn observe(&mut self, beat: f64, tempo: f64) -> Option<&TempoEvent> {
        if self.previous_tempo == Some(tempo) {
            return None;
        }
        self.previous_tempo = Some(tempo);
        let bpm = tempo * self.tempo_multiplier;
        trace!(beat, bpm, "tempo change");

        if let Some(last) = self.events.last_mut() {
            if last.time_stamp_beats == beat {
                last.beats_per_minute = bpm;
                let len = self.events.len();
                if len >= 2 && self.events[len - 2].beats_per_minute == bpm {
                    self.events.pop();
                }
                return self.events.last();
            }
        }

        self.events.push(TempoEvent {
            time_stamp_beats: beat,
            beats_per_minute: bpm,
        });
        self.events.last()
    }

    pub fn events(&self) -> &[TempoEvent] {
        &self.events
    }

    pub fn finish(self) -> Vec<TempoEvent> {
        self.events
    }
}
