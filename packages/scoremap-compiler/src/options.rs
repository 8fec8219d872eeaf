//! Compile options shared by both compilers.

use serde::{Deserialize, Serialize};

use crate::error::ScoreMapError;
use crate::sequence::NoteMode;

/// Options for one compile run.
///
/// `tempo_multiplier` scales tempo and wall-clock timestamps uniformly to
/// simulate slowed or sped-up practice; `1.0` keeps the score's own timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    pub tempo_multiplier: f64,
    pub note_mode: NoteMode,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            tempo_multiplier: 1.0,
            note_mode: NoteMode::default(),
        }
    }
}

impl CompileOptions {
    pub fn with_tempo_multiplier(mut self, tempo_multiplier: f64) -> Self {
        self.tempo_multiplier = tempo_multiplier;
        self
    }

    pub fn with_note_mode(mut self, note_mode: NoteMode) -> Self {
        self.note_mode = note_mode;
        self
    }

    pub fn validate(&self) -> Result<(), ScoreMapError> {
        if !self.tempo_multiplier.is_finite() || self.tempo_multiplier <= 0.0 {
            return Err(ScoreMapError::InvalidOption(format!(
                "tempo multiplier must be a positive number, got {}",
                self.tempo_multiplier
            )));
        }
        Ok(())
    }
}
