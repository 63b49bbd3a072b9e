use super::trajectory::{HitTrajectory, PitchTrajectory};
use chrono::NaiveDate;
use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Which half of the inning a pitch was thrown in.
///
/// Declaration order doubles as sort order: `Top` sorts before `Bottom`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum HalfInning {
    #[serde(alias = "top", alias = "T")]
    Top,
    #[serde(alias = "bottom", alias = "B")]
    Bottom,
}

impl HalfInning {
    pub fn as_str(&self) -> &'static str {
        match self {
            HalfInning::Top => "Top",
            HalfInning::Bottom => "Bottom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum BatterSide {
    #[serde(alias = "L")]
    Left,
    #[serde(alias = "R")]
    Right,
}

impl BatterSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatterSide::Left => "Left",
            BatterSide::Right => "Right",
        }
    }
}

impl FromStr for BatterSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Left" | "L" => Ok(BatterSide::Left),
            "Right" | "R" => Ok(BatterSide::Right),
            other => Err(format!("Unknown batter side: {other}")),
        }
    }
}

/// Serde, schema and string conversions for TrackMan columns with an open
/// value set. Known names map to variants; anything else is kept verbatim in
/// `Other` so it survives caching and can still be filtered on.
macro_rules! open_string_enum {
    ($name:ident) => {
        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::from(s))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = Option::<String>::deserialize(deserializer)?;
                Ok(raw.as_deref().map_or(Self::Undefined, Self::from))
            }
        }

        impl JsonSchema for $name {
            fn schema_name() -> String {
                stringify!($name).to_string()
            }

            fn json_schema(generator: &mut SchemaGenerator) -> Schema {
                String::json_schema(generator)
            }
        }
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum PitchCall {
    StrikeCalled,
    StrikeSwinging,
    BallCalled,
    BallIntentional,
    InPlay,
    HitByPitch,
    FoulBall,
    FoulBallNotFieldable,
    FoulBallFieldable,
    #[default]
    Undefined,
    Other(String),
}

impl PitchCall {
    pub fn as_str(&self) -> &str {
        match self {
            PitchCall::StrikeCalled => "StrikeCalled",
            PitchCall::StrikeSwinging => "StrikeSwinging",
            PitchCall::BallCalled => "BallCalled",
            PitchCall::BallIntentional => "BallIntentional",
            PitchCall::InPlay => "InPlay",
            PitchCall::HitByPitch => "HitByPitch",
            PitchCall::FoulBall => "FoulBall",
            PitchCall::FoulBallNotFieldable => "FoulBallNotFieldable",
            PitchCall::FoulBallFieldable => "FoulBallFieldable",
            PitchCall::Undefined => "Undefined",
            PitchCall::Other(raw) => raw,
        }
    }

    pub fn is_foul(&self) -> bool {
        matches!(
            self,
            PitchCall::FoulBall | PitchCall::FoulBallNotFieldable | PitchCall::FoulBallFieldable
        )
    }

    /// Swinging strike, foul or ball put in play.
    pub fn is_swing(&self) -> bool {
        matches!(self, PitchCall::StrikeSwinging | PitchCall::InPlay) || self.is_foul()
    }
}

impl From<&str> for PitchCall {
    fn from(s: &str) -> Self {
        match s.trim() {
            "StrikeCalled" => PitchCall::StrikeCalled,
            "StrikeSwinging" => PitchCall::StrikeSwinging,
            "BallCalled" => PitchCall::BallCalled,
            "BallIntentional" => PitchCall::BallIntentional,
            "InPlay" => PitchCall::InPlay,
            "HitByPitch" => PitchCall::HitByPitch,
            "FoulBall" => PitchCall::FoulBall,
            "FoulBallNotFieldable" => PitchCall::FoulBallNotFieldable,
            "FoulBallFieldable" => PitchCall::FoulBallFieldable,
            "" | "Undefined" => PitchCall::Undefined,
            other => PitchCall::Other(other.to_string()),
        }
    }
}

open_string_enum!(PitchCall);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum PlayResult {
    Single,
    Double,
    Triple,
    HomeRun,
    Out,
    FieldersChoice,
    Error,
    Sacrifice,
    SacrificeFly,
    #[default]
    Undefined,
    Other(String),
}

impl PlayResult {
    pub fn as_str(&self) -> &str {
        match self {
            PlayResult::Single => "Single",
            PlayResult::Double => "Double",
            PlayResult::Triple => "Triple",
            PlayResult::HomeRun => "HomeRun",
            PlayResult::Out => "Out",
            PlayResult::FieldersChoice => "FieldersChoice",
            PlayResult::Error => "Error",
            PlayResult::Sacrifice => "Sacrifice",
            PlayResult::SacrificeFly => "SacrificeFly",
            PlayResult::Undefined => "Undefined",
            PlayResult::Other(raw) => raw,
        }
    }

    pub fn is_hit(&self) -> bool {
        self.total_bases() > 0
    }

    pub fn is_sacrifice(&self) -> bool {
        matches!(self, PlayResult::Sacrifice | PlayResult::SacrificeFly)
    }

    /// Bases credited to the batter (0 for anything that is not a hit).
    pub fn total_bases(&self) -> u32 {
        match self {
            PlayResult::Single => 1,
            PlayResult::Double => 2,
            PlayResult::Triple => 3,
            PlayResult::HomeRun => 4,
            _ => 0,
        }
    }
}

impl From<&str> for PlayResult {
    fn from(s: &str) -> Self {
        match s.trim() {
            "Single" => PlayResult::Single,
            "Double" => PlayResult::Double,
            "Triple" => PlayResult::Triple,
            "HomeRun" => PlayResult::HomeRun,
            "Out" => PlayResult::Out,
            "FieldersChoice" => PlayResult::FieldersChoice,
            "Error" => PlayResult::Error,
            "Sacrifice" => PlayResult::Sacrifice,
            "SacrificeFly" | "Sacrifice Fly" => PlayResult::SacrificeFly,
            "" | "Undefined" => PlayResult::Undefined,
            other => PlayResult::Other(other.to_string()),
        }
    }
}

open_string_enum!(PlayResult);

/// TrackMan `KorBB` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
pub enum StrikeoutOrWalk {
    Strikeout,
    Walk,
    #[default]
    #[serde(other)]
    Undefined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
pub enum HitType {
    GroundBall,
    LineDrive,
    FlyBall,
    Popup,
    Bunt,
    #[default]
    #[serde(other)]
    Undefined,
}

/// Release and approach measurements for a pitch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PitchingMetrics {
    pub rel_speed: Option<f64>,
    pub spin_rate: Option<f64>,
    pub spin_axis: Option<f64>,
    pub induced_vert_break: Option<f64>,
    pub horz_break: Option<f64>,
    pub rel_height: Option<f64>,
    pub rel_side: Option<f64>,
    pub extension: Option<f64>,
    /// Seconds from release to the front of the plate.
    pub zone_time: Option<f64>,
    pub vert_appr_angle: Option<f64>,
    pub horz_appr_angle: Option<f64>,
}

/// Batted-ball measurements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HittingMetrics {
    pub exit_speed: Option<f64>,
    pub angle: Option<f64>,
    pub direction: Option<f64>,
    pub distance: Option<f64>,
    /// Seconds from contact to landing.
    pub hang_time: Option<f64>,
    pub contact_position_x: Option<f64>,
    pub contact_position_y: Option<f64>,
    pub contact_position_z: Option<f64>,
}

impl HittingMetrics {
    /// Contact position in sensor space, if every axis is finite.
    pub fn contact_position(&self) -> Option<[f64; 3]> {
        let x = self.contact_position_x.filter(|v| v.is_finite())?;
        let y = self.contact_position_y.filter(|v| v.is_finite())?;
        let z = self.contact_position_z.filter(|v| v.is_finite())?;
        Some([x, y, z])
    }

    /// Hang time when present, finite and positive.
    pub fn valid_hang_time(&self) -> Option<f64> {
        self.hang_time.filter(|t| t.is_finite() && *t > 0.0)
    }
}

/// One recorded pitch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchEvent {
    #[serde(alias = "pitch_uid")]
    pub id: Uuid,
    pub game_id: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    pub inning: u8,
    #[serde(alias = "top_bottom")]
    pub half: HalfInning,
    pub pa_of_inning: u16,
    pub pitch_of_pa: u16,
    pub pitcher_id: u64,
    #[serde(default)]
    pub pitcher_name: Option<String>,
    pub batter_id: u64,
    #[serde(default)]
    pub batter_name: Option<String>,
    #[serde(default)]
    pub batter_side: Option<BatterSide>,
    #[serde(default)]
    pub balls: Option<u8>,
    #[serde(default)]
    pub strikes: Option<u8>,
    #[serde(default)]
    pub outs: Option<u8>,
    #[serde(default)]
    pub pitch_call: PitchCall,
    #[serde(default)]
    pub play_result: PlayResult,
    #[serde(default)]
    pub kor_bb: StrikeoutOrWalk,
    #[serde(default)]
    pub outs_on_play: Option<u8>,
    #[serde(default)]
    pub tagged_pitch_type: Option<String>,
    #[serde(default, alias = "tagged_hit_type")]
    pub hit_type: HitType,
    #[serde(default)]
    pub plate_loc_side: Option<f64>,
    #[serde(default)]
    pub plate_loc_height: Option<f64>,
    #[serde(default)]
    pub pitching: Option<PitchingMetrics>,
    #[serde(default)]
    pub hitting: Option<HittingMetrics>,
    #[serde(default)]
    pub hit_trajectory: Option<HitTrajectory>,
    #[serde(default)]
    pub pitch_trajectory: Option<PitchTrajectory>,
}

/// Identity of the plate appearance a pitch belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlateAppearanceKey {
    pub game_id: String,
    pub inning: u8,
    pub half: HalfInning,
    pub pa_of_inning: u16,
}

/// Identity of one half inning of one game.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HalfInningKey {
    pub game_id: String,
    pub inning: u8,
    pub half: HalfInning,
}

impl PitchEvent {
    /// Minimal pitch with every optional field empty.
    pub fn new(game_id: impl Into<String>, inning: u8, half: HalfInning, pa: u16, pitch: u16) -> Self {
        Self {
            id: Uuid::new_v4(),
            game_id: game_id.into(),
            date: None,
            inning,
            half,
            pa_of_inning: pa,
            pitch_of_pa: pitch,
            pitcher_id: 0,
            pitcher_name: None,
            batter_id: 0,
            batter_name: None,
            batter_side: None,
            balls: None,
            strikes: None,
            outs: None,
            pitch_call: PitchCall::Undefined,
            play_result: PlayResult::Undefined,
            kor_bb: StrikeoutOrWalk::Undefined,
            outs_on_play: None,
            tagged_pitch_type: None,
            hit_type: HitType::Undefined,
            plate_loc_side: None,
            plate_loc_height: None,
            pitching: None,
            hitting: None,
            hit_trajectory: None,
            pitch_trajectory: None,
        }
    }

    pub fn pa_key(&self) -> PlateAppearanceKey {
        PlateAppearanceKey {
            game_id: self.game_id.clone(),
            inning: self.inning,
            half: self.half,
            pa_of_inning: self.pa_of_inning,
        }
    }

    pub fn half_inning_key(&self) -> HalfInningKey {
        HalfInningKey { game_id: self.game_id.clone(), inning: self.inning, half: self.half }
    }

    /// Plate location when both coordinates are finite.
    pub fn plate_location(&self) -> Option<(f64, f64)> {
        let side = self.plate_loc_side.filter(|v| v.is_finite())?;
        let height = self.plate_loc_height.filter(|v| v.is_finite())?;
        Some((side, height))
    }

    /// Short label such as "Top 3" used by replay and chart tooltips.
    pub fn inning_label(&self) -> String {
        format!("{} {}", self.half.as_str(), self.inning)
    }
}
