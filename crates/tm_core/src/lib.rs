//! # tm_core - TrackMan Pitch Analytics Core
//!
//! Turns recorded TrackMan pitch rows into the numbers and geometry a
//! baseball dashboard renders.
//!
//! ## Features
//! - Pitch and batted-ball curves from polynomial trajectory coefficients
//! - Season → Game → Inning → PA → Pitch grouping
//! - Conjunctive pitch filtering from UI criteria
//! - Hitter and pitcher rate stats as fixed-decimal strings
//! - Strike zone classification and per-zone metrics
//! - JSON API for easy integration with the dashboard host

// Doc formatting lints - purely cosmetic, fix incrementally
#![allow(clippy::doc_lazy_continuation)]
// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]
// Loop style - can fix incrementally
#![allow(clippy::needless_range_loop)]

pub mod analysis;
pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod replay;
pub mod trajectory;

// Re-export main API functions
pub use api::{
    charts_json, replay_json, response_schema_json, stats_json, zone_report_json, SCHEMA_VERSION,
};
pub use error::{CoreError, Result};

// Re-export analysis entry points
pub use analysis::{
    aggregate, classify, filter, flatten, group, zone_report, FilterCriteria, PlayerRole,
    StatReport,
};

pub use config::AnalyticsConfig;
pub use models::{PitchEvent, Season, SeasonLabel};
pub use replay::{CameraControl, ReplayController, ReplayDoc};
pub use trajectory::{CurveBuilder, HIT, PITCH, STRIKE_ZONE};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HalfInning, PitchCall, PlayResult, StrikeoutOrWalk};

    fn game() -> Vec<PitchEvent> {
        let mut pitches = Vec::new();
        for (pa, (call, result, kbb)) in [
            (PitchCall::InPlay, PlayResult::HomeRun, StrikeoutOrWalk::Undefined),
            (PitchCall::StrikeSwinging, PlayResult::Undefined, StrikeoutOrWalk::Strikeout),
            (PitchCall::BallCalled, PlayResult::Undefined, StrikeoutOrWalk::Walk),
        ]
        .into_iter()
        .enumerate()
        {
            let mut p = PitchEvent::new("G", 1, HalfInning::Top, pa as u16 + 1, 1);
            p.batter_id = 7;
            p.pitcher_id = 9;
            p.pitch_call = call;
            p.play_result = result;
            p.kor_bb = kbb;
            p.outs = Some(pa as u8);
            pitches.push(p);
        }
        pitches
    }

    #[test]
    fn test_hierarchy_filter_stats_pipeline() {
        let seasons = models::Season {
            label: "2024".into(),
            games: vec![models::Game { game_id: "G".into(), date: None, innings: group(&game()) }],
        };
        let flat = flatten(&[seasons]);
        let mine = filter(&flat, &FilterCriteria::for_batter(7));
        let report = aggregate(&mine, PlayerRole::Hitter);

        assert_eq!(report.counts().plate_appearances, 3);
        assert_eq!(report.rates().ba, "0.500");
        assert_eq!(report.rates().slg, "2.000");
        assert_eq!(report.rates().ops, "2.667");
        // BABIP: (1 - 1) / (3 - 1 - 1 - 1 - 0) -> zero denominator
        assert_eq!(report.rates().babip, "0.000");
    }

    #[test]
    fn test_stats_json_is_deterministic() {
        let request = serde_json::json!({
            "schema_version": SCHEMA_VERSION,
            "pitches": game(),
            "role": "pitcher",
            "player_id": 9
        })
        .to_string();

        let first = stats_json(&request).unwrap();
        let second = stats_json(&request).unwrap();
        assert_eq!(first, second);
    }
}
