pub mod annotation;
pub mod api;
pub mod error;
pub mod event;
pub mod filter;
pub mod options;
pub mod properties;
pub mod sequence;
pub mod serialize;
pub mod tempo;
pub mod time;
pub mod timeline;
pub mod tracker;
pub mod velocity;

pub use annotation::{compile_annotations, AnnotationEvent, AnnotationNote};
pub use api::{compile_all, compile_file, CompiledScore};
pub use error::*;
pub use event::*;
pub use filter::NoteFilter;
pub use options::CompileOptions;
pub use properties::{MeasureMeter, ScoreProperties, StaticProperties, TempoMark};
pub use sequence::{
    compile_sequence, compile_sequence_into, MusicSequence, NoteEvent, NoteMode, SequenceSink,
    TempoEvent, Track,
};
pub use tempo::TempoTrackBuilder;
pub use timeline::Timeline;
pub use tracker::{ActiveNote, NoteStateTracker, Timestamp};
pub use velocity::velocity;
