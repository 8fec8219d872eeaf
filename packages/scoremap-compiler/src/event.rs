//! # Event Timeline Types
//!
//! The chronological event sequence consumed by both compilers.
//!
//! ## Type Hierarchy
//! ```text
//! EventSequence
//!   ├── part_count: usize
//!   └── Vec<Event>
//!         ├── measure_index, measure_time, absolute_time (divisions)
//!         ├── wall_time, wall_time_duration (seconds)
//!         ├── on_notes: Vec<Note>
//!         └── off_notes: Vec<Note>
//!
//! Note
//!   ├── midi_number: u8 (0 = no pitch)
//!   ├── rest: bool
//!   ├── part: usize (document order, 0 = first part)
//!   └── dynamics: Option<Dynamics> / dynamics_percent: Option<f64>
//! ```
//!
//! Events are produced upstream in non-decreasing time order. Several notes
//! may begin or end at the same event (chords). Both compilers only borrow
//! the sequence; nothing here is mutated during a compile.

use serde::{Deserialize, Serialize};

/// Dynamic marking attached to a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dynamics {
    Ppp,
    Pp,
    P,
    Mp,
    Mf,
    F,
    Ff,
    Fff,
    Sf,
    Sfz,
    Fp,
}

impl Dynamics {
    /// Loudness of the marking on a 0-100 scale.
    pub fn percentage(self) -> f64 {
        match self {
            Dynamics::Ppp => 10.0,
            Dynamics::Pp => 20.0,
            Dynamics::P => 35.0,
            Dynamics::Mp => 50.0,
            Dynamics::Mf => 60.0,
            Dynamics::F => 75.0,
            Dynamics::Ff => 88.0,
            Dynamics::Fff => 100.0,
            Dynamics::Sf => 85.0,
            Dynamics::Sfz => 90.0,
            Dynamics::Fp => 75.0,
        }
    }

    /// Parse a marking such as "mf" or "ff".
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ppp" => Some(Dynamics::Ppp),
            "pp" => Some(Dynamics::Pp),
            "p" => Some(Dynamics::P),
            "mp" => Some(Dynamics::Mp),
            "mf" => Some(Dynamics::Mf),
            "f" => Some(Dynamics::F),
            "ff" => Some(Dynamics::Ff),
            "fff" => Some(Dynamics::Fff),
            "sf" => Some(Dynamics::Sf),
            "sfz" => Some(Dynamics::Sfz),
            "fp" => Some(Dynamics::Fp),
            _ => None,
        }
    }
}

/// A note beginning or ending at an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    #[serde(default, alias = "midi")]
    pub midi_number: u8,
    #[serde(default)]
    pub rest: bool,
    /// Index of the owning part in document order.
    #[serde(default)]
    pub part: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamics: Option<Dynamics>,
    /// Explicit loudness (0-100), takes precedence over `dynamics`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dynamics_percent: Option<f64>,
}

impl Note {
    pub fn pitched(midi_number: u8, part: usize) -> Self {
        Self {
            midi_number,
            rest: false,
            part,
            dynamics: None,
            dynamics_percent: None,
        }
    }

    pub fn rest(part: usize) -> Self {
        Self {
            midi_number: 0,
            rest: true,
            part,
            dynamics: None,
            dynamics_percent: None,
        }
    }

    pub fn with_dynamics(mut self, dynamics: Dynamics) -> Self {
        self.dynamics = Some(dynamics);
        self
    }

    pub fn with_dynamics_percent(mut self, percent: f64) -> Self {
        self.dynamics_percent = Some(percent);
        self
    }
}

/// A musical instant at which notes begin and/or end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub measure_index: usize,
    /// Position inside the measure, in divisions.
    #[serde(default)]
    pub measure_time: u32,
    /// Position from the start of the score, in divisions.
    pub absolute_time: u32,
    /// Seconds from the start of the score, already tempo-rendered.
    pub wall_time: f64,
    #[serde(default)]
    pub wall_time_duration: f64,
    #[serde(default)]
    pub on_notes: Vec<Note>,
    #[serde(default)]
    pub off_notes: Vec<Note>,
}

impl Event {
    pub fn new(measure_index: usize, measure_time: u32, absolute_time: u32, wall_time: f64) -> Self {
        Self {
            measure_index,
            measure_time,
            absolute_time,
            wall_time,
            wall_time_duration: 0.0,
            on_notes: Vec::new(),
            off_notes: Vec::new(),
        }
    }

    pub fn with_on(mut self, note: Note) -> Self {
        self.on_notes.push(note);
        self
    }

    pub fn with_off(mut self, note: Note) -> Self {
        self.off_notes.push(note);
        self
    }

    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.wall_time_duration = seconds;
        self
    }
}

/// Ordered events of one score.
///
/// The default value is the empty score, which compiles to empty outputs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventSequence {
    #[serde(default = "default_part_count")]
    pub part_count: usize,
    #[serde(default)]
    pub events: Vec<Event>,
}

fn default_part_count() -> usize {
    1
}

impl EventSequence {
    pub fn new(part_count: usize, events: Vec<Event>) -> Self {
        Self { part_count, events }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
