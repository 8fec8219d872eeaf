//! Music sequence compilation engine
//!
//! Walks the event sequence once, collecting tempo changes and note events in
//! beat time, then pushes them into a [`SequenceSink`]. The sink is owned by
//! the compile call: if it refuses any event the sink is dropped and the
//! error is returned, so a partial sequence never escapes.

use tracing::debug;

use super::types::{MusicSequence, NoteEvent, NoteMode, SequenceSink, TempoEvent};
use crate::error::{ScoreMapError, TrackError};
use crate::event::EventSequence;
use crate::filter::NoteFilter;
use crate::options::CompileOptions;
use crate::properties::ScoreProperties;
use crate::tempo::TempoTrackBuilder;
use crate::time::BeatClock;
use crate::tracker::NoteStateTracker;
use crate::velocity::velocity;

/// Compile an event sequence into an owned [`MusicSequence`].
///
/// # Pipeline
/// 1. Validate options
/// 2. Collect tempo changes and note events in beat time
/// 3. Push every event into a fresh sequence; abort on the first rejection
///
/// # Example
/// ```rust
/// use scoremap::{compile_sequence, CompileOptions, Event, EventSequence, Note, StaticProperties};
///
/// let events = EventSequence::new(1, vec![
///     Event::new(0, 0, 0, 0.0).with_on(Note::pitched(60, 0)),
///     Event::new(0, 2, 2, 1.0).with_off(Note::pitched(60, 0)),
/// ]);
/// let sequence = compile_sequence(&events, &StaticProperties::default(), &CompileOptions::default())?;
///
/// assert_eq!(sequence.tempo_track().len(), 1);
/// assert_eq!(sequence.note_track().events()[0].duration, Some(2.0));
/// # Ok::<(), scoremap::ScoreMapError>(())
/// ```
///
/// # Errors
/// [`ScoreMapError::InvalidOption`] for a bad tempo multiplier and
/// [`ScoreMapError::BuildFailure`] when a track refuses an event.
pub fn compile_sequence<P>(
    sequence: &EventSequence,
    properties: &P,
    options: &CompileOptions,
) -> Result<MusicSequence, ScoreMapError>
where
    P: ScoreProperties + ?Sized,
{
    compile_sequence_into(sequence, properties, options, MusicSequence::new(options.note_mode))
}

/// Compile into a caller-supplied sink, returning it once every event was accepted.
pub fn compile_sequence_into<P, S>(
    sequence: &EventSequence,
    properties: &P,
    options: &CompileOptions,
    mut sink: S,
) -> Result<S, ScoreMapError>
where
    P: ScoreProperties + ?Sized,
    S: SequenceSink,
{
    options.validate()?;
    let (tempo_events, note_events) = collect_events(sequence, properties, options);
    debug!(
        events = sequence.events().len(),
        tempo_events = tempo_events.len(),
        note_events = note_events.len(),
        "building music sequence"
    );

    for event in tempo_events {
        sink.add_tempo_event(event)
            .map_err(|e| build_failure("tempo", e))?;
    }
    for event in note_events {
        sink.add_note_event(event)
            .map_err(|e| build_failure("note", e))?;
    }
    Ok(sink)
}

fn build_failure(track: &str, error: TrackError) -> ScoreMapError {
    ScoreMapError::BuildFailure {
        track: track.to_string(),
        message: error.to_string(),
    }
}

/// First pass: tempo track and note events, in traversal order.
fn collect_events<P>(
    sequence: &EventSequence,
    properties: &P,
    options: &CompileOptions,
) -> (Vec<TempoEvent>, Vec<NoteEvent>)
where
    P: ScoreProperties + ?Sized,
{
    let filter = NoteFilter::for_sequence(sequence);
    let mode = options.note_mode;
    let mut tempo_track = TempoTrackBuilder::new(options.tempo_multiplier);
    let mut notes: Vec<NoteEvent> = Vec::new();
    // Sounding pitch -> index of its on event in `notes`.
    let mut sounding: NoteStateTracker<usize> = NoteStateTracker::new();
    let mut clock = BeatClock::new();
    let mut last_beat = 0.0;

    for event in sequence.events() {
        let beat = clock.beat(
            event.absolute_time,
            event.measure_time,
            properties.divisions_per_beat(event.measure_index),
        );
        last_beat = beat;

        tempo_track.observe(beat, properties.tempo(event.measure_index, event.measure_time));

        for pitch in filter.eligible_pitches(&event.off_notes) {
            if let Some(index) = sounding.release(pitch) {
                close_note(&mut notes, mode, index, beat);
            }
        }

        for note in event.on_notes.iter().filter(|n| filter.is_eligible(n)) {
            // Re-struck while still sounding: end the old note here.
            if let Some(index) = sounding.get(note.midi_number) {
                close_note(&mut notes, mode, index, beat);
            }
            let on_velocity = velocity(properties.dynamics(note));
            let (on_velocity, duration) = match mode {
                NoteMode::WithDuration => (on_velocity, Some(0.0)),
                // Velocity zero would read as a note off.
                NoteMode::PairedOnOff => (on_velocity.max(1), None),
            };
            sounding.strike(note.midi_number, notes.len());
            notes.push(NoteEvent {
                time_stamp_beats: beat,
                pitch: note.midi_number,
                velocity: on_velocity,
                duration,
            });
        }
    }

    let unreleased = sounding.drain();
    if !unreleased.is_empty() {
        debug!(count = unreleased.len(), beat = last_beat, "closing notes still sounding at end");
    }
    for (_, index) in unreleased {
        close_note(&mut notes, mode, index, last_beat);
    }

    (tempo_track.finish(), notes)
}

fn close_note(notes: &mut Vec<NoteEvent>, mode: NoteMode, index: usize, beat: f64) {
    let on = notes[index];
    match mode {
        NoteMode::WithDuration => {
            notes[index].duration = Some((beat - on.time_stamp_beats).max(0.0));
        }
        NoteMode::PairedOnOff => notes.push(NoteEvent {
            time_stamp_beats: beat,
            pitch: on.pitch,
            velocity: 0,
            duration: None,
        }),
    }
}
