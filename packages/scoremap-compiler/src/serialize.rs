//! # Annotation JSON
//!
//! Renders an annotation timeline as the JSON document read by the practice
//! matcher: an array with one object per entry, in timeline order.
//!
//! ```text
//! [
//!   {
//!     "time_stamp": 500,
//!     "measure_number": 0.5,
//!     "notes": [ { "midi_number": 64, "on_duration": 0 } ]
//!   }
//! ]
//! ```

use std::io::Write;

use crate::annotation::AnnotationEvent;
use crate::error::ScoreMapError;

/// Compact JSON, as written to annotation files.
pub fn to_json(timeline: &[AnnotationEvent]) -> Result<String, ScoreMapError> {
    Ok(serde_json::to_string(timeline)?)
}

/// Indented JSON for inspection.
pub fn to_json_pretty(timeline: &[AnnotationEvent]) -> Result<String, ScoreMapError> {
    Ok(serde_json::to_string_pretty(timeline)?)
}

pub fn write_json<W: Write>(writer: W, timeline: &[AnnotationEvent]) -> Result<(), ScoreMapError> {
    serde_json::to_writer(writer, timeline)?;
    Ok(())
}

/// Parse a previously written annotation document.
pub fn from_json(json: &str) -> Result<Vec<AnnotationEvent>, ScoreMapError> {
    Ok(serde_json::from_str(json)?)
}
