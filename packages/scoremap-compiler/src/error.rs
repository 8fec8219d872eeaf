//! # Error Types
//!
//! This module defines all error types for the scoremap compiler.
//!
//! ## Error Types
//! - `UnsupportedInput` - The timeline document could not be used (bad ordering, zero divisions, ...)
//! - `BuildFailure` - A sequence track rejected an event; the whole sequence is discarded
//! - `InvalidOption` - A compile option or configuration value is out of range
//! - `Io`, `Json`, `Yaml` - Wrapped I/O and decoding failures
//!
//! Malformed off-notes and out-of-range velocities are *not* errors: the first
//! are ignored, the second are clamped.
//!
//! ## Usage
//! ```rust
//! use scoremap::{compile_sequence, CompileOptions, EventSequence, ScoreMapError, StaticProperties};
//!
//! let events = EventSequence::default();
//! let properties = StaticProperties::default();
//!
//! match compile_sequence(&events, &properties, &CompileOptions::default()) {
//!     Ok(sequence) => assert!(sequence.note_track().is_empty()),
//!     Err(ScoreMapError::BuildFailure { track, message }) => {
//!         eprintln!("{} track rejected an event: {}", track, message);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoreMapError {
    /// The input timeline cannot be compiled.
    ///
    /// # Example
    /// ```
    /// # use scoremap::ScoreMapError;
    /// let err = ScoreMapError::UnsupportedInput {
    ///     message: "event 3 starts before event 2".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Unsupported input: event 3 starts before event 2");
    /// ```
    #[error("Unsupported input: {message}")]
    UnsupportedInput { message: String },

    /// A track of the music sequence refused an event.
    ///
    /// Fatal for the sequence output: a partial sequence is never returned.
    ///
    /// # Example
    /// ```
    /// # use scoremap::ScoreMapError;
    /// let err = ScoreMapError::BuildFailure {
    ///     track: "tempo".to_string(),
    ///     message: "bpm must be positive, got 0".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Failed to build tempo track: bpm must be positive, got 0");
    /// ```
    #[error("Failed to build {track} track: {message}")]
    BuildFailure { track: String, message: String },

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Rejection reported by a sequence track when it cannot accept an event.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackError {
    #[error("timestamp {0} is not a finite, non-negative beat position")]
    InvalidTimestamp(f64),

    #[error("timestamp {time} precedes the previous event at {previous}")]
    OutOfOrder { time: f64, previous: f64 },

    #[error("bpm must be positive, got {0}")]
    InvalidTempo(f64),

    #[error("pitch {0} is outside the MIDI range")]
    InvalidPitch(u8),

    #[error("velocity {0} is outside the MIDI range")]
    InvalidVelocity(u8),

    #[error("duration {0} is not a finite, non-negative beat count")]
    InvalidDuration(f64),
}
