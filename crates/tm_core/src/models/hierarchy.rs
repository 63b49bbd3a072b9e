//! Nested Season → Game → Inning → PlateAppearance → Pitch structure.
//!
//! This is the shape the data layer hands over. Building and walking it lives
//! in [`crate::analysis::hierarchy`].

use super::pitch::{HalfInning, PitchEvent};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateAppearance {
    pub pa_of_inning: u16,
    /// Ordered by `pitch_of_pa`; the last pitch decides the outcome.
    pub pitches: Vec<PitchEvent>,
}

impl PlateAppearance {
    pub fn final_pitch(&self) -> Option<&PitchEvent> {
        self.pitches.last()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inning {
    pub inning: u8,
    #[serde(alias = "top_bottom")]
    pub half: HalfInning,
    pub plate_appearances: Vec<PlateAppearance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub game_id: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub innings: Vec<Inning>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Season {
    /// Display label, e.g. "2024" or "Preseason 2023-2024".
    pub label: String,
    pub games: Vec<Game>,
}
