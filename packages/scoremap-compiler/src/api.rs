//! # Public API
//!
//! Entry points that run both compilers over one event sequence.
//!
//! ## Compilation Functions
//!
//! - [`compile_all()`] - Music sequence and annotation timeline from borrowed inputs
//! - [`compile_file()`] - Load a timeline document, then [`compile_all()`]
//! - [`compile_sequence()`](crate::compile_sequence) / [`compile_annotations()`](crate::compile_annotations) - One output only
//!
//! ## Typical Usage
//!
//! ```rust
//! use scoremap::{compile_all, CompileOptions, Timeline};
//!
//! let timeline = Timeline::from_yaml(r#"
//! events:
//!   - { measure_index: 0, absolute_time: 0, wall_time: 0.0, on_notes: [{ midi: 60 }] }
//!   - { measure_index: 0, absolute_time: 2, wall_time: 1.0, off_notes: [{ midi: 60 }] }
//! "#)?;
//! let (events, properties) = timeline.into_parts();
//!
//! let compiled = compile_all(&events, &properties, &CompileOptions::default())?;
//! assert_eq!(compiled.sequence.note_track().len(), 1);
//! assert_eq!(compiled.annotations.len(), 1);
//! # Ok::<(), scoremap::ScoreMapError>(())
//! ```

use std::path::Path;

use crate::annotation::{compile_annotations, AnnotationEvent};
use crate::error::ScoreMapError;
use crate::event::EventSequence;
use crate::options::CompileOptions;
use crate::properties::ScoreProperties;
use crate::sequence::{compile_sequence, MusicSequence};
use crate::timeline::Timeline;

/// Both outputs of one compile run.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledScore {
    pub sequence: MusicSequence,
    pub annotations: Vec<AnnotationEvent>,
}

/// Compile the music sequence and the annotation timeline.
///
/// The two compilers are independent and only read `sequence` and
/// `properties`. Either failure fails the whole call.
///
/// # Errors
/// Returns [`ScoreMapError`] if the options are invalid or the sequence
/// cannot be built.
pub fn compile_all<P>(
    sequence: &EventSequence,
    properties: &P,
    options: &CompileOptions,
) -> Result<CompiledScore, ScoreMapError>
where
    P: ScoreProperties + ?Sized,
{
    let music = compile_sequence(sequence, properties, options)?;
    let annotations = compile_annotations(sequence, properties, options)?;
    Ok(CompiledScore {
        sequence: music,
        annotations,
    })
}

/// Load a timeline document (YAML, or JSON by extension) and compile it.
///
/// # Errors
/// Returns [`ScoreMapError::Io`] for unreadable files,
/// [`ScoreMapError::UnsupportedInput`] for invalid timelines, and any
/// error of [`compile_all()`].
pub fn compile_file(path: &Path, options: &CompileOptions) -> Result<CompiledScore, ScoreMapError> {
    let (sequence, properties) = Timeline::load(path)?.into_parts();
    compile_all(&sequence, &properties, options)
}
