pub mod json_api;

pub use json_api::{
    charts_json, replay_json, response_schema_json, stats_json, zone_report_json, ApiResponse,
    ChartsResponse, PitchSource, ReplayResponse, StatsResponse, ZoneResponse, SCHEMA_VERSION,
};
