//! JSON entry points for the dashboard host.
//!
//! Every request carries `schema_version` and a pitch source: either a flat
//! `pitches` array or a nested `seasons` hierarchy (never both). Responses are
//! serialized structs that also publish a JSON schema.

use crate::analysis::zones::{zones, Zone};
use crate::analysis::{
    aggregate, build_charts, filter, flatten, zone_report, ChartSet, FilterCriteria, PlayerRole,
    StatReport, ZoneReport,
};
use crate::config::CurveConfig;
use crate::error::{CoreError, Result};
use crate::models::{PitchEvent, Season};
use crate::replay::{build_replay, ReplayDoc};
use crate::trajectory::CurveBuilder;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const SCHEMA_VERSION: u8 = 1;

fn check_schema(found: u8) -> Result<()> {
    if found != SCHEMA_VERSION {
        return Err(CoreError::UnsupportedSchema { found, expected: SCHEMA_VERSION });
    }
    Ok(())
}

/// Where a request's pitches come from.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PitchSource {
    #[serde(default)]
    pub pitches: Option<Vec<PitchEvent>>,
    #[serde(default)]
    pub seasons: Option<Vec<Season>>,
}

impl PitchSource {
    pub fn into_pitches(self) -> Result<Vec<PitchEvent>> {
        match (self.pitches, self.seasons) {
            (Some(pitches), None) => Ok(pitches),
            (None, Some(seasons)) => Ok(flatten(&seasons)),
            (Some(_), Some(_)) => {
                Err(CoreError::InvalidRequest("provide either pitches or seasons, not both".into()))
            }
            (None, None) => Err(CoreError::InvalidRequest("missing pitches or seasons".into())),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StatsRequest {
    pub schema_version: u8,
    #[serde(flatten)]
    pub source: PitchSource,
    #[serde(default)]
    pub criteria: FilterCriteria,
    pub role: PlayerRole,
    /// Narrows the criteria to this batter or pitcher, matching `role`.
    #[serde(default)]
    pub player_id: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct FilteredRequest {
    pub schema_version: u8,
    #[serde(flatten)]
    pub source: PitchSource,
    #[serde(default)]
    pub criteria: FilterCriteria,
}

#[derive(Debug, Deserialize)]
pub struct ReplayRequest {
    pub schema_version: u8,
    #[serde(flatten)]
    pub source: PitchSource,
    pub game_id: String,
    #[serde(default)]
    pub curves: Option<CurveConfig>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct StatsResponse {
    pub schema_version: u8,
    /// Pitches left after filtering.
    pub pitches: usize,
    pub report: StatReport,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ZoneResponse {
    pub schema_version: u8,
    pub report: ZoneReport,
    pub geometry: Vec<Zone>,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ReplayResponse {
    pub schema_version: u8,
    pub replay: ReplayDoc,
}

#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct ChartsResponse {
    pub schema_version: u8,
    pub pitches: usize,
    pub charts: ChartSet,
}

/// Union of every response body, for schema export.
#[derive(Serialize, JsonSchema)]
#[serde(untagged)]
pub enum ApiResponse {
    Stats(StatsResponse),
    Zones(ZoneResponse),
    Replay(ReplayResponse),
    Charts(ChartsResponse),
}

fn selected(source: PitchSource, criteria: &FilterCriteria) -> Result<Vec<PitchEvent>> {
    Ok(filter(&source.into_pitches()?, criteria))
}

/// Stat line for one role over the filtered pitches.
pub fn stats_json(request_json: &str) -> Result<String> {
    let request: StatsRequest = serde_json::from_str(request_json)?;
    check_schema(request.schema_version)?;

    let mut criteria = request.criteria;
    if let Some(id) = request.player_id {
        match request.role {
            PlayerRole::Hitter => criteria.batter_id = Some(id.to_string()),
            PlayerRole::Pitcher => criteria.pitcher_id = Some(id.to_string()),
        }
    }

    let pitches = selected(request.source, &criteria)?;
    let response = StatsResponse {
        schema_version: SCHEMA_VERSION,
        pitches: pitches.len(),
        report: aggregate(&pitches, request.role),
    };
    Ok(serde_json::to_string(&response)?)
}

/// Per-zone metrics plus the zone outlines to draw them in.
pub fn zone_report_json(request_json: &str) -> Result<String> {
    let request: FilteredRequest = serde_json::from_str(request_json)?;
    check_schema(request.schema_version)?;

    let pitches = selected(request.source, &request.criteria)?;
    let response = ZoneResponse {
        schema_version: SCHEMA_VERSION,
        report: zone_report(&pitches),
        geometry: zones().cloned().collect(),
    };
    Ok(serde_json::to_string(&response)?)
}

/// Replay document for one game.
pub fn replay_json(request_json: &str) -> Result<String> {
    let request: ReplayRequest = serde_json::from_str(request_json)?;
    check_schema(request.schema_version)?;

    let curves = request.curves.unwrap_or_default();
    curves.validate()?;
    let pitches = request.source.into_pitches()?;
    let replay = build_replay(&pitches, &request.game_id, &CurveBuilder::new(curves))?;

    let response = ReplayResponse { schema_version: SCHEMA_VERSION, replay };
    Ok(serde_json::to_string(&response)?)
}

/// Spray, movement and strike-zone points plus the pitch-type summary.
pub fn charts_json(request_json: &str) -> Result<String> {
    let request: FilteredRequest = serde_json::from_str(request_json)?;
    check_schema(request.schema_version)?;

    let pitches = selected(request.source, &request.criteria)?;
    let response = ChartsResponse {
        schema_version: SCHEMA_VERSION,
        pitches: pitches.len(),
        charts: build_charts(&pitches),
    };
    Ok(serde_json::to_string(&response)?)
}

/// JSON schema covering every response body.
pub fn response_schema_json() -> Result<String> {
    let schema = schemars::schema_for!(ApiResponse);
    Ok(serde_json::to_string_pretty(&schema)?)
}
