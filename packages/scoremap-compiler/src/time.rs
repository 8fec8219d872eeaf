//! Time-domain conversion
//!
//! Maps an event position between the three coordinate systems the outputs
//! use: score divisions, beats and wall-clock milliseconds.
//!
//! The free functions are pure. `tempo_multiplier` scales derived timestamps
//! uniformly; `1.0` reproduces the score's native timing exactly.

/// Position in beats: `absolute_time / divisions_per_beat`.
pub fn to_beats(absolute_time: u32, divisions_per_beat: u32) -> f64 {
    f64::from(absolute_time) / f64::from(divisions_per_beat)
}

/// Divisions expressed in measures: `divisions / divisions_per_measure`.
pub fn to_measure_number(divisions: u32, divisions_per_measure: u32) -> f64 {
    f64::from(divisions) / f64::from(divisions_per_measure)
}

/// Fractional measure number of a position. The integer part is the
/// measure index, the fractional part the position within the measure,
/// so a meter change never shifts the numbering of later measures.
pub fn measure_position(measure_index: usize, measure_time: u32, divisions_per_measure: u32) -> f64 {
    measure_index as f64 + to_measure_number(measure_time, divisions_per_measure)
}

/// Converts absolute division counts to beats across changes of the
/// division unit.
///
/// While `divisions_per_beat` stays the same the result is exactly
/// [`to_beats`]. When it changes, the start of the event's measure becomes
/// the new anchor: divisions before it are counted in the old unit and
/// divisions after it in the new one, so beat positions never run backwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct BeatClock {
    anchor_time: u32,
    anchor_beat: f64,
    divisions_per_beat: Option<u32>,
}

impl BeatClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn beat(&mut self, absolute_time: u32, measure_time: u32, divisions_per_beat: u32) -> f64 {
        match self.divisions_per_beat {
            Some(current) if current != divisions_per_beat => {
                let measure_start = absolute_time.saturating_sub(measure_time).max(self.anchor_time);
                self.anchor_beat += to_beats(measure_start - self.anchor_time, current);
                self.anchor_time = measure_start;
                self.divisions_per_beat = Some(divisions_per_beat);
            }
            Some(_) => {}
            None => self.divisions_per_beat = Some(divisions_per_beat),
        }
        self.anchor_beat
            + to_beats(absolute_time.saturating_sub(self.anchor_time), divisions_per_beat)
    }
}

/// Wall time in seconds to rounded milliseconds.
pub fn to_millis(wall_time: f64, tempo_multiplier: f64) -> i64 {
    (wall_time * 1000.0 * tempo_multiplier).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_to_beats() {
        assert_eq!(to_beats(0, 4), 0.0);
        assert_eq!(to_beats(6, 4), 1.5);
        assert_approx_eq!(to_beats(1, 3), 1.0 / 3.0);
    }

    #[test]
    fn test_to_measure_number() {
        assert_eq!(to_measure_number(2, 4), 0.5);
        assert_eq!(to_measure_number(12, 4), 3.0);
        assert_eq!(to_measure_number(13, 4), 3.25);
    }

    #[test]
    fn test_measure_position() {
        assert_eq!(measure_position(0, 2, 4), 0.5);
        assert_eq!(measure_position(3, 0, 4), 3.0);
        // 4/4 followed by 3/4: the downbeat of measure 1 stays 1.0
        assert_eq!(measure_position(1, 0, 3), 1.0);
        assert_approx_eq!(measure_position(1, 1, 3), 1.0 + 1.0 / 3.0);
    }

    #[test]
    fn test_beat_clock_uniform_unit_matches_to_beats() {
        let mut clock = BeatClock::new();
        for (absolute, measure_time) in [(0, 0), (1, 1), (5, 2), (13, 1)] {
            assert_eq!(clock.beat(absolute, measure_time, 3), to_beats(absolute, 3));
        }
    }

    #[test]
    fn test_beat_clock_unit_change() {
        // Four beats at one division each, then two divisions per beat.
        let mut clock = BeatClock::new();
        assert_eq!(clock.beat(0, 0, 1), 0.0);
        assert_eq!(clock.beat(3, 3, 1), 3.0);
        assert_eq!(clock.beat(4, 0, 2), 4.0);
        assert_eq!(clock.beat(6, 2, 2), 5.0);
        // Back to one division per beat at absolute time 8.
        assert_eq!(clock.beat(9, 1, 1), 7.0);
    }

    #[test]
    fn test_to_millis_native_tempo() {
        assert_eq!(to_millis(0.0, 1.0), 0);
        assert_eq!(to_millis(0.5, 1.0), 500);
        assert_eq!(to_millis(1.2346, 1.0), 1235);
        assert_eq!(to_millis(1.2344, 1.0), 1234);
    }

    #[test]
    fn test_to_millis_scaled() {
        assert_eq!(to_millis(0.5, 2.0), 1000);
        assert_eq!(to_millis(0.75, 0.5), 375);
    }
}
