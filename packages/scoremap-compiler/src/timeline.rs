//! # Timeline Documents
//!
//! A timeline document bundles an event sequence with the property tables
//! needed to compile it. It is the hand-off format from an upstream score
//! reader; parsing the score itself happens elsewhere.
//!
//! ## Format (YAML)
//! ```yaml
//! parts: 2
//! properties:
//!   divisions_per_beat: 2
//!   beats_per_measure: 4
//!   tempo_marks:
//!     - { measure: 0, bpm: 96 }
//! events:
//!   - measure_index: 0
//!     absolute_time: 0
//!     wall_time: 0.0
//!     on_notes: [{ midi: 60, part: 1, dynamics: mf }]
//! ```
//!
//! JSON documents use the same field names and are selected by a `.json`
//! extension.
//!
//! ## Validation
//! - Property tables must have non-zero meters and positive tempo marks
//! - Event times must be finite and non-negative
//! - Events must be in non-decreasing `absolute_time` and `wall_time` order
//! - `measure_time` cannot exceed `absolute_time`

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ScoreMapError;
use crate::event::{Event, EventSequence};
use crate::properties::StaticProperties;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    #[serde(default = "default_parts")]
    pub parts: usize,
    #[serde(default)]
    pub properties: StaticProperties,
    #[serde(default)]
    pub events: Vec<Event>,
}

fn default_parts() -> usize {
    1
}

impl Timeline {
    pub fn from_yaml(source: &str) -> Result<Self, ScoreMapError> {
        let timeline: Timeline = serde_yaml::from_str(source)?;
        timeline.validate()?;
        Ok(timeline)
    }

    pub fn from_json(source: &str) -> Result<Self, ScoreMapError> {
        let timeline: Timeline = serde_json::from_str(source)?;
        timeline.validate()?;
        Ok(timeline)
    }

    /// Read a timeline file, choosing JSON or YAML from the extension.
    pub fn load(path: &Path) -> Result<Self, ScoreMapError> {
        let source = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
        let timeline = if is_json {
            Self::from_json(&source)?
        } else {
            Self::from_yaml(&source)?
        };
        debug!(
            path = %path.display(),
            parts = timeline.parts,
            events = timeline.events.len(),
            "loaded timeline"
        );
        Ok(timeline)
    }

    pub fn validate(&self) -> Result<(), ScoreMapError> {
        self.properties.validate()?;

        let mut previous: Option<&Event> = None;
        for (i, event) in self.events.iter().enumerate() {
            if !event.wall_time.is_finite() || event.wall_time < 0.0 {
                return Err(unsupported(format!(
                    "event {} has invalid wall time {}",
                    i, event.wall_time
                )));
            }
            if !event.wall_time_duration.is_finite() || event.wall_time_duration < 0.0 {
                return Err(unsupported(format!(
                    "event {} has invalid duration {}",
                    i, event.wall_time_duration
                )));
            }
            if event.measure_time > event.absolute_time {
                return Err(unsupported(format!(
                    "event {} is {} divisions into its measure but only {} into the score",
                    i, event.measure_time, event.absolute_time
                )));
            }
            if let Some(prev) = previous {
                if event.absolute_time < prev.absolute_time || event.wall_time < prev.wall_time {
                    return Err(unsupported(format!(
                        "event {} starts before event {}",
                        i,
                        i - 1
                    )));
                }
            }
            previous = Some(event);
        }
        Ok(())
    }

    /// Split into the event sequence and its property oracle.
    pub fn into_parts(self) -> (EventSequence, StaticProperties) {
        (EventSequence::new(self.parts, self.events), self.properties)
    }
}

fn unsupported(message: String) -> ScoreMapError {
    ScoreMapError::UnsupportedInput { message }
}
