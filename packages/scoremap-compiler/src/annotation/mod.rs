//! # Annotation Module
//!
//! Build the practice annotation timeline: for every event, which pitches
//! are sounding and for how long, in wall-clock milliseconds.
//!
//! ## Sub-modules
//! - `types` - AnnotationEvent and AnnotationNote
//! - `engine` - Traversal through the note state tracker
//!
//! ## Entry Point
//! [`compile_annotations()`] - Convert an event sequence to a timeline
//!
//! ## Contract with the matcher
//! - One entry per event that leaves at least one pitch sounding
//! - `notes` is the full set of sounding pitches, not just the changes
//! - No entry means nothing is sounding, not missing data
//! - Timestamps are `round(wall_time * 1000 * tempo_multiplier)`
//! - `measure_number` is the measure index plus the fraction of that
//!   measure already elapsed

mod engine;
mod types;


pub use engine::compile_annotations;
pub use types::{AnnotationEvent, AnnotationNote};
