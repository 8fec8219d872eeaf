//! # Score Properties
//!
//! Read-only queries about the score that both compilers need per event:
//! measure and beat lengths in divisions, the tempo in effect at a position,
//! and the loudness of a note.
//!
//! [`ScoreProperties`] is the seam; any upstream score model can implement it.
//! [`StaticProperties`] is a table-driven implementation that is deserialized
//! together with a timeline document.

use serde::{Deserialize, Serialize};

use crate::error::ScoreMapError;
use crate::event::Note;

/// Tempo used when no tempo mark applies to a position.
pub const DEFAULT_TEMPO: f64 = 120.0;

/// Loudness used for notes without a marking when none is configured.
pub const DEFAULT_DYNAMICS_PERCENT: f64 = 50.0;

/// Oracle answering score-level questions for an event position.
pub trait ScoreProperties {
    fn divisions_per_measure(&self, measure_index: usize) -> u32;
    fn divisions_per_beat(&self, measure_index: usize) -> u32;
    /// Tempo in beats per minute at `measure_time` divisions into the measure.
    fn tempo(&self, measure_index: usize, measure_time: u32) -> f64;
    /// Loudness of the note on a 0-100 scale.
    fn dynamics(&self, note: &Note) -> f64;
}

/// A tempo mark taking effect at a measure position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TempoMark {
    pub measure: usize,
    #[serde(default)]
    pub time: u32,
    pub bpm: f64,
}

/// Per-measure override of the default meter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureMeter {
    pub measure: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub divisions_per_beat: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beats_per_measure: Option<u32>,
}

/// Table-driven [`ScoreProperties`].
///
/// # Example
/// ```rust
/// use scoremap::{ScoreProperties, StaticProperties, TempoMark};
///
/// let properties = StaticProperties {
///     tempo_marks: vec![
///         TempoMark { measure: 0, time: 0, bpm: 90.0 },
///         TempoMark { measure: 2, time: 0, bpm: 60.0 },
///     ],
///     ..StaticProperties::default()
/// };
///
/// assert_eq!(properties.divisions_per_measure(0), 4);
/// assert_eq!(properties.tempo(1, 3), 90.0);
/// assert_eq!(properties.tempo(2, 0), 60.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticProperties {
    pub divisions_per_beat: u32,
    pub beats_per_measure: u32,
    pub meters: Vec<MeasureMeter>,
    pub tempo_marks: Vec<TempoMark>,
    pub default_dynamics: f64,
}

impl Default for StaticProperties {
    fn default() -> Self {
        Self {
            divisions_per_beat: 1,
            beats_per_measure: 4,
            meters: Vec::new(),
            tempo_marks: Vec::new(),
            default_dynamics: DEFAULT_DYNAMICS_PERCENT,
        }
    }
}

impl StaticProperties {
    /// Check the tables for values that would make time conversion meaningless.
    pub fn validate(&self) -> Result<(), ScoreMapError> {
        if self.divisions_per_beat == 0 || self.beats_per_measure == 0 {
            return Err(ScoreMapError::UnsupportedInput {
                message: "divisions_per_beat and beats_per_measure must be positive".to_string(),
            });
        }
        for meter in &self.meters {
            if meter.divisions_per_beat == Some(0) || meter.beats_per_measure == Some(0) {
                return Err(ScoreMapError::UnsupportedInput {
                    message: format!("measure {} has a zero-length meter", meter.measure),
                });
            }
        }
        for mark in &self.tempo_marks {
            if !mark.bpm.is_finite() || mark.bpm <= 0.0 {
                return Err(ScoreMapError::UnsupportedInput {
                    message: format!(
                        "tempo mark at measure {} has invalid bpm {}",
                        mark.measure, mark.bpm
                    ),
                });
            }
        }
        Ok(())
    }

    /// Latest override at or before `measure_index`; meter changes carry forward.
    fn meter(&self, measure_index: usize) -> (u32, u32) {
        let mut divisions = self.divisions_per_beat;
        let mut beats = self.beats_per_measure;
        let mut overrides: Vec<&MeasureMeter> = self
            .meters
            .iter()
            .filter(|m| m.measure <= measure_index)
            .collect();
        overrides.sort_by_key(|m| m.measure);
        for meter in overrides {
            if let Some(d) = meter.divisions_per_beat {
                divisions = d;
            }
            if let Some(b) = meter.beats_per_measure {
                beats = b;
            }
        }
        (divisions, beats)
    }
}

impl ScoreProperties for StaticProperties {
    fn divisions_per_measure(&self, measure_index: usize) -> u32 {
        let (divisions, beats) = self.meter(measure_index);
        divisions * beats
    }

    fn divisions_per_beat(&self, measure_index: usize) -> u32 {
        self.meter(measure_index).0
    }

    fn tempo(&self, measure_index: usize, measure_time: u32) -> f64 {
        self.tempo_marks
            .iter()
            .filter(|mark| (mark.measure, mark.time) <= (measure_index, measure_time))
            .max_by_key(|mark| (mark.measure, mark.time))
            .map(|mark| mark.bpm)
            .unwrap_or(DEFAULT_TEMPO)
    }

    fn dynamics(&self, note: &Note) -> f64 {
        note.dynamics_percent
            .or_else(|| note.dynamics.map(|d| d.percentage()))
            .unwrap_or(self.default_dynamics)
    }
}
