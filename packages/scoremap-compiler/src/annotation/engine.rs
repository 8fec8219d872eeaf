//! Annotation timeline compilation engine
//!
//! Runs every event through a [`NoteStateTracker`] in millisecond time and
//! records one snapshot per event that leaves at least one pitch sounding.

use tracing::debug;

use super::types::{AnnotationEvent, AnnotationNote};
use crate::error::ScoreMapError;
use crate::event::EventSequence;
use crate::filter::NoteFilter;
use crate::options::CompileOptions;
use crate::properties::ScoreProperties;
use crate::time::{measure_position, to_millis};
use crate::tracker::NoteStateTracker;

/// Compile an event sequence into its annotation timeline.
///
/// Events that leave nothing sounding produce no entry, so the timeline has
/// gaps during silence. Only `tempo_multiplier` is read from `options`.
///
/// # Example
/// ```rust
/// use scoremap::{compile_annotations, CompileOptions, Event, EventSequence, Note, StaticProperties};
///
/// let events = EventSequence::new(1, vec![
///     Event::new(0, 0, 0, 0.0).with_on(Note::pitched(60, 0)),
///     Event::new(0, 2, 2, 0.5).with_off(Note::pitched(60, 0)).with_on(Note::pitched(64, 0)),
/// ]);
/// let timeline = compile_annotations(&events, &StaticProperties::default(), &CompileOptions::default())?;
///
/// assert_eq!(timeline[1].time_stamp_millis, 500);
/// assert_eq!(timeline[1].measure_number, 0.5);
/// assert_eq!(timeline[1].midi_numbers(), vec![64]);
/// # Ok::<(), scoremap::ScoreMapError>(())
/// ```
pub fn compile_annotations<P>(
    sequence: &EventSequence,
    properties: &P,
    options: &CompileOptions,
) -> Result<Vec<AnnotationEvent>, ScoreMapError>
where
    P: ScoreProperties + ?Sized,
{
    options.validate()?;

    let filter = NoteFilter::for_sequence(sequence);
    let mut tracker: NoteStateTracker<i64> = NoteStateTracker::new();
    let mut timeline = Vec::new();

    for event in sequence.events() {
        let time_stamp = to_millis(event.wall_time, options.tempo_multiplier);
        let snapshot = tracker.apply_event(
            filter.eligible_pitches(&event.off_notes),
            filter.eligible_pitches(&event.on_notes),
            time_stamp,
        );
        if snapshot.is_empty() {
            continue;
        }

        let divisions_per_measure = properties.divisions_per_measure(event.measure_index);
        timeline.push(AnnotationEvent {
            time_stamp_millis: time_stamp,
            measure_number: measure_position(
                event.measure_index,
                event.measure_time,
                divisions_per_measure,
            ),
            notes: snapshot
                .into_iter()
                .map(|active| AnnotationNote {
                    midi_number: active.midi_number,
                    on_duration_millis: active.elapsed,
                })
                .collect(),
        });
    }

    debug!(
        events = sequence.events().len(),
        annotations = timeline.len(),
        "compiled annotation timeline"
    );
    Ok(timeline)
}
