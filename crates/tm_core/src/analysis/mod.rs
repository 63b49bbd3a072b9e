//! # Analysis Module
//!
//! Everything derived from a flat pitch slice.
//!
//! ## Submodules
//!
//! - `hierarchy` - Season → Game → Inning → PA → Pitch grouping and walking
//! - `filter` - conjunctive pitch filtering from UI criteria
//! - `stats` - rate-stat aggregation for hitters and pitchers
//! - `zones` - strike zone classification and per-zone metrics
//! - `charts` - spray, movement and strike-zone chart points
//! - `pitch_summary` - per pitch-type arsenal summary

pub mod charts;
pub mod filter;
pub mod hierarchy;
pub mod pitch_summary;
pub mod stats;
pub mod zones;

pub use charts::{build_charts, ChartSet, MovementPoint, SprayPoint, StrikeZonePoint};
pub use filter::{filter, FilterCriteria, PitchFilter};
pub use hierarchy::{
    final_pitches, flatten, group, group_games, group_seasons, iter_pitches, OFFSEASON_LABEL,
};
pub use pitch_summary::{summarize_pitch_types, PitchTypeSummary};
pub use stats::{
    aggregate, baseball_to_decimal_ip, count_outs, display_innings_pitched, OutcomeCounts,
    PlayerRole, RateLine, StatReport,
};
pub use zones::{classify, zone_report, ZoneId, ZoneMetrics, ZoneReport};
