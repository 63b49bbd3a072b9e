//! # Chart Points
//!
//! Render-ready points for the spray, movement and strike-zone charts. The
//! renderer draws these as-is; nothing here is re-derived downstream.

use super::pitch_summary::{summarize_pitch_types, PitchTypeSummary};
use super::zones::classify_pitch;
use super::zones::ZoneId;
use crate::models::{PitchCall, PitchEvent, PlayResult};
use crate::trajectory::{landing_point, HIT, STRIKE_ZONE};
use nalgebra::Point3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Color for pitches with no usable category.
pub const NEUTRAL_COLOR: &str = "#9e9e9e";

/// One landed batted ball.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SprayPoint {
    pub position: [f64; 3],
    pub color: String,
    pub key: Uuid,
    pub play_result: PlayResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MovementPoint {
    pub horz_break: f64,
    pub induced_vert_break: f64,
    pub pitch_type: Option<String>,
    pub color: String,
    pub key: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StrikeZonePoint {
    pub position: [f64; 3],
    pub zone: Option<ZoneId>,
    pub pitch_call: PitchCall,
    pub color: String,
    pub key: Uuid,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ChartSet {
    pub spray: Vec<SprayPoint>,
    pub movement: Vec<MovementPoint>,
    pub strike_zone: Vec<StrikeZonePoint>,
    pub pitch_types: Vec<PitchTypeSummary>,
}

pub fn play_result_color(result: &PlayResult) -> &'static str {
    match result {
        PlayResult::Single => "#4caf50",
        PlayResult::Double => "#2196f3",
        PlayResult::Triple => "#9c27b0",
        PlayResult::HomeRun => "#f44336",
        PlayResult::Out => "#607d8b",
        PlayResult::Sacrifice | PlayResult::SacrificeFly => "#ff9800",
        PlayResult::FieldersChoice | PlayResult::Error => "#ffc107",
        PlayResult::Undefined | PlayResult::Other(_) => NEUTRAL_COLOR,
    }
}

pub fn pitch_type_color(pitch_type: Option<&str>) -> &'static str {
    match pitch_type.map(str::trim) {
        Some("Fastball") | Some("FourSeamFastBall") => "#e53935",
        Some("Sinker") | Some("TwoSeamFastBall") => "#fb8c00",
        Some("Cutter") => "#8d6e63",
        Some("Slider") => "#fdd835",
        Some("Sweeper") => "#c0ca33",
        Some("Curveball") => "#1e88e5",
        Some("ChangeUp") | Some("Changeup") => "#43a047",
        Some("Splitter") => "#00acc1",
        Some("Knuckleball") => "#8e24aa",
        _ => NEUTRAL_COLOR,
    }
}

pub fn pitch_call_color(call: &PitchCall) -> &'static str {
    match call {
        PitchCall::StrikeCalled => "#d32f2f",
        PitchCall::StrikeSwinging => "#7b1fa2",
        PitchCall::BallCalled | PitchCall::BallIntentional => "#388e3c",
        PitchCall::InPlay => "#1976d2",
        PitchCall::HitByPitch => "#f57c00",
        PitchCall::FoulBall | PitchCall::FoulBallNotFieldable | PitchCall::FoulBallFieldable => {
            "#fbc02d"
        }
        PitchCall::Undefined | PitchCall::Other(_) => NEUTRAL_COLOR,
    }
}

fn to_array(p: Point3<f64>) -> [f64; 3] {
    [p.x, p.y, p.z]
}

/// Landing point of every batted ball with a usable trajectory and hang time.
pub fn spray_points(pitches: &[PitchEvent]) -> Vec<SprayPoint> {
    pitches
        .iter()
        .filter_map(|p| {
            let trajectory = p.hit_trajectory.as_ref()?;
            let hang_time = p.hitting.as_ref().and_then(|h| h.hang_time);
            let landing = landing_point(trajectory, hang_time)?;
            Some(SprayPoint {
                position: to_array(HIT.project(&landing)),
                color: play_result_color(&p.play_result).to_string(),
                key: p.id,
                play_result: p.play_result.clone(),
            })
        })
        .collect()
}

/// `(horz_break, induced_vert_break)` for each pitch with both measured.
pub fn movement_points(pitches: &[PitchEvent]) -> Vec<MovementPoint> {
    pitches
        .iter()
        .filter_map(|p| {
            let m = p.pitching.as_ref()?;
            let hb = m.horz_break.filter(|v| v.is_finite())?;
            let ivb = m.induced_vert_break.filter(|v| v.is_finite())?;
            Some(MovementPoint {
                horz_break: hb,
                induced_vert_break: ivb,
                pitch_type: p.tagged_pitch_type.clone(),
                color: pitch_type_color(p.tagged_pitch_type.as_deref()).to_string(),
                key: p.id,
            })
        })
        .collect()
}

/// Plate locations projected into the strike-zone view.
pub fn strike_zone_points(pitches: &[PitchEvent]) -> Vec<StrikeZonePoint> {
    pitches
        .iter()
        .filter_map(|p| {
            let (side, height) = p.plate_location()?;
            let projected = STRIKE_ZONE.project(&Point3::new(0.0, side, height));
            Some(StrikeZonePoint {
                position: to_array(projected),
                zone: classify_pitch(p),
                pitch_call: p.pitch_call.clone(),
                color: pitch_call_color(&p.pitch_call).to_string(),
                key: p.id,
            })
        })
        .collect()
}

pub fn build_charts(pitches: &[PitchEvent]) -> ChartSet {
    let charts = ChartSet {
        spray: spray_points(pitches),
        movement: movement_points(pitches),
        strike_zone: strike_zone_points(pitches),
        pitch_types: summarize_pitch_types(pitches),
    };
    tracing::debug!(
        pitches = pitches.len(),
        spray = charts.spray.len(),
        movement = charts.movement.len(),
        strike_zone = charts.strike_zone.len(),
        "built chart points"
    );
    charts
}
