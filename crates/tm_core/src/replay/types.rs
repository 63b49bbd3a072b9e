//! Replay document: one game's pitches in play order, with curves attached.

use crate::analysis::hierarchy::group;
use crate::error::{CoreError, Result};
use crate::models::{HalfInning, PitchCall, PitchEvent, PlayResult};
use crate::trajectory::{Curve, CurveBuilder};
use chrono::NaiveDate;
use rayon::prelude::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Count before the pitch, e.g. `"1-2"`. `"-"` when either side is missing.
pub fn count_label(balls: Option<u8>, strikes: Option<u8>) -> String {
    match (balls, strikes) {
        (Some(b), Some(s)) => format!("{b}-{s}"),
        _ => "-".to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReplayEntry {
    pub pitch_id: Uuid,
    pub inning: u8,
    pub half: HalfInning,
    /// "Top 3"
    pub inning_label: String,
    pub pa_of_inning: u16,
    pub pitch_of_pa: u16,
    pub count: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outs: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitcher_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batter_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch_type: Option<String>,
    pub pitch_call: PitchCall,
    pub play_result: PlayResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch_curve: Option<Curve>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hit_curve: Option<Curve>,
}

impl ReplayEntry {
    pub fn from_pitch(pitch: &PitchEvent, builder: &CurveBuilder) -> Self {
        let pitch_curve = builder.build_pitch_curve(pitch);
        let hit_curve = pitch_curve.as_ref().and_then(|c| builder.build_hit_curve(pitch, c));
        Self {
            pitch_id: pitch.id,
            inning: pitch.inning,
            half: pitch.half,
            inning_label: pitch.inning_label(),
            pa_of_inning: pitch.pa_of_inning,
            pitch_of_pa: pitch.pitch_of_pa,
            count: count_label(pitch.balls, pitch.strikes),
            outs: pitch.outs,
            pitcher_name: pitch.pitcher_name.clone(),
            batter_name: pitch.batter_name.clone(),
            pitch_type: pitch.tagged_pitch_type.clone(),
            pitch_call: pitch.pitch_call.clone(),
            play_result: pitch.play_result.clone(),
            pitch_curve,
            hit_curve,
        }
    }

    /// Last point the ball reaches: landing when hit, the plate otherwise.
    pub fn ball_end(&self) -> Option<[f64; 3]> {
        let curve = self.hit_curve.as_ref().or(self.pitch_curve.as_ref())?;
        curve.last().map(|p| [p.x, p.y, p.z])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReplayDoc {
    pub game_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub entries: Vec<ReplayEntry>,
}

impl ReplayDoc {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the first pitch of each half inning, for chapter navigation.
    pub fn inning_starts(&self) -> Vec<usize> {
        let mut starts = Vec::new();
        let mut prev: Option<(u8, HalfInning)> = None;
        for (i, e) in self.entries.iter().enumerate() {
            let key = Some((e.inning, e.half));
            if key != prev {
                starts.push(i);
                prev = key;
            }
        }
        starts
    }
}

/// Replay for `game_id` out of a mixed pitch slice.
pub fn build_replay(pitches: &[PitchEvent], game_id: &str, builder: &CurveBuilder) -> Result<ReplayDoc> {
    let game: Vec<PitchEvent> = pitches.iter().filter(|p| p.game_id == game_id).cloned().collect();
    if game.is_empty() {
        return Err(CoreError::GameNotFound(game_id.to_string()));
    }

    let innings = group(&game);
    let ordered: Vec<&PitchEvent> = innings
        .iter()
        .flat_map(|i| i.plate_appearances.iter())
        .flat_map(|pa| pa.pitches.iter())
        .collect();

    let entries: Vec<ReplayEntry> =
        ordered.par_iter().map(|p| ReplayEntry::from_pitch(p, builder)).collect();

    let with_curves = entries.iter().filter(|e| e.pitch_curve.is_some()).count();
    tracing::info!(game_id, pitches = entries.len(), with_curves, "built replay");

    Ok(ReplayDoc {
        game_id: game_id.to_string(),
        date: game.iter().filter_map(|p| p.date).min(),
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PitchTrajectory, PitchingMetrics};

    fn pitch(game: &str, inning: u8, half: HalfInning, pa: u16, n: u16) -> PitchEvent {
        let mut p = PitchEvent::new(game, inning, half, pa, n);
        p.balls = Some(1);
        p.strikes = Some(2);
        p
    }

    fn tracked(mut p: PitchEvent) -> PitchEvent {
        p.pitch_trajectory = Some(PitchTrajectory::from_values(
            [55.0, -130.0, 12.0],
            [0.4, -1.5, 2.0],
            [6.0, -3.0, -14.0],
        ));
        p.pitching = Some(PitchingMetrics { zone_time: Some(0.42), ..Default::default() });
        p
    }

    #[test]
    fn test_replay_orders_game_pitches() {
        let input = vec![
            pitch("G", 1, HalfInning::Bottom, 1, 1),
            pitch("Other", 1, HalfInning::Top, 1, 1),
            tracked(pitch("G", 1, HalfInning::Top, 1, 2)),
            pitch("G", 1, HalfInning::Top, 1, 1),
        ];
        let doc = build_replay(&input, "G", &CurveBuilder::default()).unwrap();

        assert_eq!(doc.game_id, "G");
        assert_eq!(doc.len(), 3);
        let order: Vec<(HalfInning, u16)> =
            doc.entries.iter().map(|e| (e.half, e.pitch_of_pa)).collect();
        assert_eq!(
            order,
            vec![(HalfInning::Top, 1), (HalfInning::Top, 2), (HalfInning::Bottom, 1)]
        );
        assert_eq!(doc.entries[0].inning_label, "Top 1");
        assert_eq!(doc.entries[0].count, "1-2");
        assert!(doc.entries[0].pitch_curve.is_none());
        assert_eq!(doc.entries[1].pitch_curve.as_ref().map(|c| c.len()), Some(150));
        assert!(doc.entries[1].ball_end().is_some());
        assert_eq!(doc.inning_starts(), vec![0, 2]);
    }

    #[test]
    fn test_unknown_game() {
        let input = vec![pitch("G", 1, HalfInning::Top, 1, 1)];
        let err = build_replay(&input, "missing", &CurveBuilder::default()).unwrap_err();
        assert!(matches!(err, CoreError::GameNotFound(id) if id == "missing"));
    }

    #[test]
    fn test_count_label() {
        assert_eq!(count_label(Some(3), Some(0)), "3-0");
        assert_eq!(count_label(None, Some(0)), "-");
    }
}
