//! Per pitch-type arsenal summary.

use super::stats::fixed;
use crate::models::{PitchCall, PitchEvent, PitchingMetrics};
use fxhash::FxHashMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Group name for pitches without a tagged type.
pub const UNTAGGED: &str = "Undefined";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PitchTypeSummary {
    pub pitch_type: String,
    pub count: u32,
    pub usage_pct: String,
    /// Averages are `None` when no pitch of the type carries the metric.
    pub avg_speed: Option<String>,
    pub max_speed: Option<String>,
    pub avg_spin: Option<String>,
    pub avg_induced_vert_break: Option<String>,
    pub avg_horz_break: Option<String>,
    pub whiff_pct: String,
}

#[derive(Default)]
struct Running {
    sum: f64,
    n: u32,
    max: Option<f64>,
}

impl Running {
    fn push(&mut self, v: Option<f64>) {
        let Some(v) = v.filter(|v| v.is_finite()) else {
            return;
        };
        self.sum += v;
        self.n += 1;
        self.max = Some(self.max.map_or(v, |m| m.max(v)));
    }

    fn mean(&self) -> Option<String> {
        (self.n > 0).then(|| fixed(self.sum / f64::from(self.n), 1))
    }

    fn max(&self) -> Option<String> {
        self.max.map(|m| fixed(m, 1))
    }
}

#[derive(Default)]
struct TypeTally {
    count: u32,
    swings: u32,
    whiffs: u32,
    speed: Running,
    spin: Running,
    ivb: Running,
    hb: Running,
}

/// Summaries ordered by count descending, then name.
pub fn summarize_pitch_types(pitches: &[PitchEvent]) -> Vec<PitchTypeSummary> {
    let mut by_type: FxHashMap<&str, TypeTally> = FxHashMap::default();
    let empty = PitchingMetrics::default();

    for p in pitches {
        let name = p
            .tagged_pitch_type
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNTAGGED);
        let t = by_type.entry(name).or_default();
        t.count += 1;
        if p.pitch_call.is_swing() {
            t.swings += 1;
        }
        if p.pitch_call == PitchCall::StrikeSwinging {
            t.whiffs += 1;
        }
        let m = p.pitching.as_ref().unwrap_or(&empty);
        t.speed.push(m.rel_speed);
        t.spin.push(m.spin_rate);
        t.ivb.push(m.induced_vert_break);
        t.hb.push(m.horz_break);
    }

    let total = pitches.len() as u32;
    let mut out: Vec<PitchTypeSummary> = by_type
        .into_iter()
        .map(|(name, t)| PitchTypeSummary {
            pitch_type: name.to_string(),
            count: t.count,
            usage_pct: percent(t.count, total),
            avg_speed: t.speed.mean(),
            max_speed: t.speed.max(),
            avg_spin: t.spin.mean(),
            avg_induced_vert_break: t.ivb.mean(),
            avg_horz_break: t.hb.mean(),
            whiff_pct: percent(t.whiffs, t.swings),
        })
        .collect();

    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.pitch_type.cmp(&b.pitch_type)));
    out
}

fn percent(n: u32, d: u32) -> String {
    if d == 0 {
        return fixed(0.0, 1);
    }
    fixed(f64::from(n) / f64::from(d) * 100.0, 1)
}
