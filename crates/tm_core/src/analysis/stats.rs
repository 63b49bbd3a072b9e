//! # Stat Line Aggregation
//!
//! Rate statistics for one player's pitch set. Counting stats come from the
//! final pitch of every plate appearance; innings pitched walks every pitch
//! of each half inning the pitcher appeared in.
//!
//! All rates are rendered as fixed-decimal strings. A zero denominator yields
//! the zero literal of that stat's format (`0.000`, `0.0`, `0.00`).

use super::hierarchy::final_pitches;
use crate::models::{HalfInningKey, PitchCall, PitchEvent, PlayResult, StrikeoutOrWalk};
use fxhash::FxHashMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PlayerRole {
    Hitter,
    Pitcher,
}

impl FromStr for PlayerRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hitter" | "batter" => Ok(PlayerRole::Hitter),
            "pitcher" => Ok(PlayerRole::Pitcher),
            other => Err(format!("Unknown player role: {other}")),
        }
    }
}

impl fmt::Display for PlayerRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PlayerRole::Hitter => f.write_str("hitter"),
            PlayerRole::Pitcher => f.write_str("pitcher"),
        }
    }
}

/// Raw counting stats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OutcomeCounts {
    pub plate_appearances: u32,
    pub at_bats: u32,
    pub hits: u32,
    pub singles: u32,
    pub doubles: u32,
    pub triples: u32,
    pub home_runs: u32,
    pub walks: u32,
    pub hit_by_pitch: u32,
    pub strikeouts: u32,
    pub sacrifices: u32,
}

impl OutcomeCounts {
    /// Counts over the final pitch of each plate appearance in `pitches`.
    pub fn from_pitches(pitches: &[PitchEvent]) -> Self {
        let finals = final_pitches(pitches);
        let mut c = OutcomeCounts { plate_appearances: finals.len() as u32, ..Default::default() };

        for p in finals.values() {
            match &p.play_result {
                PlayResult::Single => c.singles += 1,
                PlayResult::Double => c.doubles += 1,
                PlayResult::Triple => c.triples += 1,
                PlayResult::HomeRun => c.home_runs += 1,
                r if r.is_sacrifice() => c.sacrifices += 1,
                _ => {}
            }
            match p.kor_bb {
                StrikeoutOrWalk::Strikeout => c.strikeouts += 1,
                StrikeoutOrWalk::Walk => c.walks += 1,
                StrikeoutOrWalk::Undefined => {}
            }
            if p.pitch_call == PitchCall::HitByPitch {
                c.hit_by_pitch += 1;
            }
        }

        c.hits = c.singles + c.doubles + c.triples + c.home_runs;
        c.at_bats = c
            .plate_appearances
            .saturating_sub(c.walks)
            .saturating_sub(c.hit_by_pitch)
            .saturating_sub(c.sacrifices);
        c
    }

    pub fn total_bases(&self) -> u32 {
        self.singles + 2 * self.doubles + 3 * self.triples + 4 * self.home_runs
    }

    fn babip_denominator(&self) -> i64 {
        i64::from(self.plate_appearances)
            - i64::from(self.strikeouts)
            - i64::from(self.home_runs)
            - i64::from(self.walks)
            - i64::from(self.hit_by_pitch)
    }
}

/// Formatted rate stats shared by both roles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RateLine {
    pub ba: String,
    pub obp: String,
    pub slg: String,
    pub ops: String,
    pub babip: String,
    #[serde(rename = "k_pct")]
    pub strikeout_pct: String,
    #[serde(rename = "bb_pct")]
    pub walk_pct: String,
    #[serde(rename = "k_minus_bb_pct")]
    pub strikeout_minus_walk_pct: String,
}

impl RateLine {
    pub fn from_counts(c: &OutcomeCounts) -> Self {
        let pa = f64::from(c.plate_appearances);
        let ab = f64::from(c.at_bats);

        let obp = round_to(ratio(f64::from(c.hits + c.walks + c.hit_by_pitch), pa), 3);
        let slg = round_to(ratio(f64::from(c.total_bases()), ab), 3);
        let babip_den = c.babip_denominator();
        let babip = if babip_den > 0 {
            f64::from(c.hits - c.home_runs) / babip_den as f64
        } else {
            0.0
        };
        let pct = |n: f64| ratio(n, pa) * 100.0;

        Self {
            ba: fixed(ratio(f64::from(c.hits), ab), 3),
            obp: fixed(obp, 3),
            slg: fixed(slg, 3),
            // operands are rounded before summing
            ops: fixed(obp + slg, 3),
            babip: fixed(babip, 3),
            strikeout_pct: fixed(pct(f64::from(c.strikeouts)), 1),
            walk_pct: fixed(pct(f64::from(c.walks)), 1),
            strikeout_minus_walk_pct: fixed(
                pct(f64::from(c.strikeouts) - f64::from(c.walks)),
                1,
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HitterReport {
    pub counts: OutcomeCounts,
    pub rates: RateLine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PitcherReport {
    pub counts: OutcomeCounts,
    pub rates: RateLine,
    pub outs: u32,
    /// Baseball notation, e.g. `"5.2"`.
    pub innings_pitched: String,
    pub whip: String,
}

/// Stat line for one role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum StatReport {
    Hitter(HitterReport),
    Pitcher(PitcherReport),
}

impl StatReport {
    pub fn role(&self) -> PlayerRole {
        match self {
            StatReport::Hitter(_) => PlayerRole::Hitter,
            StatReport::Pitcher(_) => PlayerRole::Pitcher,
        }
    }

    pub fn counts(&self) -> &OutcomeCounts {
        match self {
            StatReport::Hitter(r) => &r.counts,
            StatReport::Pitcher(r) => &r.counts,
        }
    }

    pub fn rates(&self) -> &RateLine {
        match self {
            StatReport::Hitter(r) => &r.rates,
            StatReport::Pitcher(r) => &r.rates,
        }
    }
}

/// Aggregate a player's (already filtered) pitches.
pub fn aggregate(pitches: &[PitchEvent], role: PlayerRole) -> StatReport {
    let counts = OutcomeCounts::from_pitches(pitches);
    let rates = RateLine::from_counts(&counts);

    let report = match role {
        PlayerRole::Hitter => StatReport::Hitter(HitterReport { counts, rates }),
        PlayerRole::Pitcher => {
            let outs = count_outs(pitches);
            let ip = f64::from(outs) / 3.0;
            let whip = if outs > 0 { f64::from(counts.hits + counts.walks) / ip } else { 0.0 };
            StatReport::Pitcher(PitcherReport {
                counts,
                rates,
                outs,
                innings_pitched: display_innings_pitched(ip),
                whip: fixed(whip, 2),
            })
        }
    };

    tracing::debug!(
        role = %role,
        pitches = pitches.len(),
        pa = counts.plate_appearances,
        "aggregated stat line"
    );
    report
}

/// Outs recorded while the pitcher was on the mound.
///
/// Per half inning: `max(outs) - min(outs)`, plus one when the last pitch
/// ended in a strikeout, plus that pitch's `outs_on_play`.
pub fn count_outs(pitches: &[PitchEvent]) -> u32 {
    let mut by_inning: FxHashMap<HalfInningKey, Vec<&PitchEvent>> = FxHashMap::default();
    for p in pitches {
        by_inning.entry(p.half_inning_key()).or_default().push(p);
    }

    by_inning
        .values()
        .map(|seen| {
            let outs = seen.iter().filter_map(|p| p.outs);
            let spread = match (outs.clone().min(), outs.max()) {
                (Some(lo), Some(hi)) => u32::from(hi - lo),
                _ => 0,
            };
            let Some(last) = seen.iter().max_by_key(|p| (p.pa_of_inning, p.pitch_of_pa)) else {
                return spread;
            };
            let strikeout = u32::from(last.kor_bb == StrikeoutOrWalk::Strikeout);
            spread + strikeout + u32::from(last.outs_on_play.unwrap_or(0))
        })
        .sum()
}

/// Fractional innings (thirds) in baseball notation: `5.333 → "5.1"`,
/// `5.667 → "5.2"`.
pub fn display_innings_pitched(ip: f64) -> String {
    if !ip.is_finite() || ip <= 0.0 {
        return "0.0".to_string();
    }
    let tenths = (ip * 10.0).round() as u64;
    let (whole, frac) = (tenths / 10, tenths % 10);
    let frac = match frac {
        3 => 1,
        7 => 2,
        other => other,
    };
    format!("{whole}.{frac}")
}

/// Inverse of [`display_innings_pitched`]: `"5.1" → 5.333…`.
pub fn baseball_to_decimal_ip(display: &str) -> Option<f64> {
    let (whole, frac) = match display.trim().split_once('.') {
        Some((w, f)) => (w, f),
        None => (display.trim(), "0"),
    };
    let whole: u32 = whole.parse().ok()?;
    let outs = match frac {
        "0" | "" => 0.0,
        "1" => 1.0,
        "2" => 2.0,
        _ => return None,
    };
    Some(f64::from(whole) + outs / 3.0)
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Fixed-decimal display with the zero literal for non-finite values.
///
/// Ties round away from zero (`0.0625 → "0.063"`) whichever stat is shown.
pub(crate) fn fixed(value: f64, decimals: usize) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    // `+ 0.0` folds -0.0 so tiny negatives print as the zero literal
    let value = round_to(value, decimals as i32) + 0.0;
    format!("{value:.decimals$}")
}
