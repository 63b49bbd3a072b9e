//! # Pitch Filter
//!
//! Declarative, conjunctive pitch filtering. Each criterion is a raw string
//! as sent by the UI; absent, empty or `"all"` disables that dimension.
//! An active criterion never matches a pitch whose source field is missing,
//! and a criterion that does not parse (e.g. `balls: "two"`) matches nothing.

use crate::models::{BatterSide, PitchCall, PitchEvent, SeasonLabel};
use chrono::Datelike;
use fxhash::FxHashSet;
use schemars::JsonSchema;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentinel that disables a criterion.
pub const ALL: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    #[serde(deserialize_with = "lenient_string")]
    pub season: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub month: Option<String>,
    #[serde(alias = "pitch_type", deserialize_with = "lenient_string")]
    pub pitch_type: Option<String>,
    #[serde(alias = "pitch_call", deserialize_with = "lenient_string")]
    pub pitch_call: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub outs: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub balls: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub strikes: Option<String>,
    #[serde(alias = "batter_side", deserialize_with = "lenient_string")]
    pub batter_side: Option<String>,
    #[serde(alias = "game_ids")]
    pub game_ids: Option<Vec<String>>,
    #[serde(alias = "pitcher_id", deserialize_with = "lenient_string")]
    pub pitcher_id: Option<String>,
    #[serde(alias = "batter_id", deserialize_with = "lenient_string")]
    pub batter_id: Option<String>,
}

impl FilterCriteria {
    /// Criteria with every dimension set to `"all"`.
    pub fn all() -> Self {
        let all = || Some(ALL.to_string());
        Self {
            season: all(),
            month: all(),
            pitch_type: all(),
            pitch_call: all(),
            outs: all(),
            balls: all(),
            strikes: all(),
            batter_side: all(),
            game_ids: None,
            pitcher_id: all(),
            batter_id: all(),
        }
    }

    pub fn for_pitcher(id: u64) -> Self {
        Self { pitcher_id: Some(id.to_string()), ..Default::default() }
    }

    pub fn for_batter(id: u64) -> Self {
        Self { batter_id: Some(id.to_string()), ..Default::default() }
    }
}

/// Accepts strings, numbers and null for a criterion value.
fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    struct LenientVisitor;

    impl<'de> Visitor<'de> for LenientVisitor {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a string, a number or null")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, d: D) -> Result<Self::Value, D::Error> {
            d.deserialize_any(LenientVisitor)
        }
    }

    d.deserialize_any(LenientVisitor)
}

/// One compiled criterion.
#[derive(Debug, Clone, PartialEq)]
enum Selector<T> {
    All,
    Only(T),
    Never,
}

impl<T: FromStr + PartialEq> Selector<T> {
    fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None => Selector::All,
            Some(s) if s.is_empty() || s.eq_ignore_ascii_case(ALL) => Selector::All,
            Some(s) => s.parse().map(Selector::Only).unwrap_or(Selector::Never),
        }
    }

    fn matches(&self, value: Option<&T>) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(expected) => value == Some(expected),
            Selector::Never => false,
        }
    }
}

/// Criteria parsed once, applied to many pitches.
#[derive(Debug, Clone)]
pub struct PitchFilter {
    season: Selector<SeasonLabel>,
    month: Selector<u32>,
    pitch_type: Selector<String>,
    pitch_call: Selector<PitchCall>,
    outs: Selector<u8>,
    balls: Selector<u8>,
    strikes: Selector<u8>,
    batter_side: Selector<BatterSide>,
    game_ids: Option<FxHashSet<String>>,
    pitcher_id: Selector<u64>,
    batter_id: Selector<u64>,
}

impl PitchFilter {
    pub fn new(criteria: &FilterCriteria) -> Self {
        let game_ids = criteria
            .game_ids
            .as_ref()
            .filter(|ids| !ids.is_empty())
            .map(|ids| ids.iter().map(|id| id.trim().to_string()).collect());

        Self {
            season: Selector::parse(criteria.season.as_deref()),
            month: Selector::parse(criteria.month.as_deref()),
            pitch_type: Selector::parse(criteria.pitch_type.as_deref()),
            pitch_call: Selector::parse(criteria.pitch_call.as_deref()),
            outs: Selector::parse(criteria.outs.as_deref()),
            balls: Selector::parse(criteria.balls.as_deref()),
            strikes: Selector::parse(criteria.strikes.as_deref()),
            batter_side: Selector::parse(criteria.batter_side.as_deref()),
            game_ids,
            pitcher_id: Selector::parse(criteria.pitcher_id.as_deref()),
            batter_id: Selector::parse(criteria.batter_id.as_deref()),
        }
    }

    pub fn matches(&self, p: &PitchEvent) -> bool {
        let season = p.date.and_then(SeasonLabel::from_date);
        let month = p.date.map(|d| d.month());

        self.season.matches(season.as_ref())
            && self.month.matches(month.as_ref())
            && self.pitch_type.matches(p.tagged_pitch_type.as_ref())
            && self.pitch_call.matches(Some(&p.pitch_call))
            && self.outs.matches(p.outs.as_ref())
            && self.balls.matches(p.balls.as_ref())
            && self.strikes.matches(p.strikes.as_ref())
            && self.batter_side.matches(p.batter_side.as_ref())
            && self.game_ids.as_ref().map_or(true, |ids| ids.contains(&p.game_id))
            && self.pitcher_id.matches(Some(&p.pitcher_id))
            && self.batter_id.matches(Some(&p.batter_id))
    }

    /// Matching pitches in their original relative order.
    pub fn apply(&self, pitches: &[PitchEvent]) -> Vec<PitchEvent> {
        pitches.iter().filter(|p| self.matches(p)).cloned().collect()
    }
}

/// Stable conjunctive filter.
pub fn filter(pitches: &[PitchEvent], criteria: &FilterCriteria) -> Vec<PitchEvent> {
    let out = PitchFilter::new(criteria).apply(pitches);
    tracing::debug!(input = pitches.len(), kept = out.len(), "filtered pitches");
    out
}
