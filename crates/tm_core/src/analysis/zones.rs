//! # Strike Zone Classification
//!
//! Thirteen zones in catcher's-view coordinates (feet):
//!
//! ```text
//!   11 ─────────┬───────── 12
//!   │  1 │  2 │  3 │       │
//!   │  4 │  5 │  6 │       │
//!   │  7 │  8 │  9 │       │
//!   13 ─────────┴───────── 14
//! ```
//!
//! Inner zones are inclusive rectangles and are tested first, in id order.
//! Outer zones are L-shaped polygons wrapping the inner grid, tested with
//! ray casting. Recorded `plate_loc_side` has the opposite sign convention,
//! so it is negated before classification.

use super::hierarchy::final_pitches;
use super::stats::fixed;
use crate::models::{HitType, PitchCall, PitchEvent, StrikeoutOrWalk};
use once_cell::sync::Lazy;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub type ZoneId = u8;

/// Inner grid column edges, left to right.
pub const INNER_X: [f64; 4] = [-0.83, -0.2767, 0.2767, 0.83];
/// Inner grid row edges, top to bottom.
pub const INNER_Y: [f64; 4] = [3.5, 2.8333, 2.1667, 1.5];
/// Plotted bounds of the outer zones.
pub const OUTER_X: (f64, f64) = (-2.0, 2.0);
pub const OUTER_Y: (f64, f64) = (0.0, 5.0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ZoneShape {
    Rect { min_x: f64, max_x: f64, min_y: f64, max_y: f64 },
    Polygon { vertices: Vec<[f64; 2]> },
}

impl ZoneShape {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        match self {
            ZoneShape::Rect { min_x, max_x, min_y, max_y } => {
                *min_x <= x && x <= *max_x && *min_y <= y && y <= *max_y
            }
            ZoneShape::Polygon { vertices } => point_in_polygon(x, y, vertices),
        }
    }

    /// Vertex centroid, used as the label anchor.
    pub fn center(&self) -> [f64; 2] {
        match self {
            ZoneShape::Rect { min_x, max_x, min_y, max_y } => {
                [(min_x + max_x) / 2.0, (min_y + max_y) / 2.0]
            }
            ZoneShape::Polygon { vertices } => {
                let n = vertices.len().max(1) as f64;
                let (sx, sy) = vertices.iter().fold((0.0, 0.0), |(sx, sy), v| (sx + v[0], sy + v[1]));
                [sx / n, sy / n]
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Zone {
    pub id: ZoneId,
    pub shape: ZoneShape,
}

static INNER_ZONES: Lazy<Vec<Zone>> = Lazy::new(|| {
    let mut zones = Vec::with_capacity(9);
    for row in 0..3 {
        for col in 0..3 {
            zones.push(Zone {
                id: (row * 3 + col + 1) as ZoneId,
                shape: ZoneShape::Rect {
                    min_x: INNER_X[col],
                    max_x: INNER_X[col + 1],
                    min_y: INNER_Y[row + 1],
                    max_y: INNER_Y[row],
                },
            });
        }
    }
    zones
});

static OUTER_ZONES: Lazy<Vec<Zone>> = Lazy::new(|| {
    let (left, right) = OUTER_X;
    let (bottom, top) = OUTER_Y;
    let (in_left, in_right) = (INNER_X[0], INNER_X[3]);
    let (in_top, in_bottom) = (INNER_Y[0], INNER_Y[3]);
    let mid_x = 0.0;
    let mid_y = (bottom + top) / 2.0;

    let polygon = |id: ZoneId, vertices: Vec<[f64; 2]>| Zone { id, shape: ZoneShape::Polygon { vertices } };
    vec![
        polygon(
            11,
            vec![
                [left, top],
                [mid_x, top],
                [mid_x, in_top],
                [in_left, in_top],
                [in_left, mid_y],
                [left, mid_y],
            ],
        ),
        polygon(
            12,
            vec![
                [mid_x, top],
                [right, top],
                [right, mid_y],
                [in_right, mid_y],
                [in_right, in_top],
                [mid_x, in_top],
            ],
        ),
        polygon(
            13,
            vec![
                [left, mid_y],
                [in_left, mid_y],
                [in_left, in_bottom],
                [mid_x, in_bottom],
                [mid_x, bottom],
                [left, bottom],
            ],
        ),
        polygon(
            14,
            vec![
                [in_right, mid_y],
                [right, mid_y],
                [right, bottom],
                [mid_x, bottom],
                [mid_x, in_bottom],
                [in_right, in_bottom],
            ],
        ),
    ]
});

/// All zones, inner first, in id order.
pub fn zones() -> impl Iterator<Item = &'static Zone> {
    INNER_ZONES.iter().chain(OUTER_ZONES.iter())
}

/// Zone of a recorded plate location, or `None` outside the plotted area.
pub fn classify(plate_loc_side: f64, plate_loc_height: f64) -> Option<ZoneId> {
    if !plate_loc_side.is_finite() || !plate_loc_height.is_finite() {
        return None;
    }
    let x = -plate_loc_side;
    let y = plate_loc_height;
    zones().find(|z| z.shape.contains(x, y)).map(|z| z.id)
}

pub fn classify_pitch(p: &PitchEvent) -> Option<ZoneId> {
    p.plate_location().and_then(|(side, height)| classify(side, height))
}

/// Even-odd ray casting toward +x.
pub fn point_in_polygon(x: f64, y: f64, vertices: &[[f64; 2]]) -> bool {
    let mut inside = false;
    let n = vertices.len();
    if n < 3 {
        return false;
    }
    let mut j = n - 1;
    for i in 0..n {
        let [xi, yi] = vertices[i];
        let [xj, yj] = vertices[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Formatted metrics for one zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ZoneMetrics {
    pub zone: ZoneId,
    pub pitches: u32,
    pub location_pct: String,
    pub whiff_pct: String,
    pub ba: String,
    pub gb_pct: String,
    pub fb_pct: String,
    pub ld_pct: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ZoneReport {
    pub total_pitches: u32,
    pub unclassified: u32,
    /// One entry per zone, in id order.
    pub zones: Vec<ZoneMetrics>,
}

#[derive(Debug, Default, Clone, Copy)]
struct ZoneTally {
    pitches: u32,
    swinging_strikes: u32,
    swings: u32,
    in_play: u32,
    ground: u32,
    fly: u32,
    line: u32,
    hits: u32,
    at_bats: u32,
}

/// Per-zone metrics over `pitches`.
///
/// Location% divides by every input pitch, classified or not. Batting
/// average uses the final pitch of each plate appearance, placed in the zone
/// of that final pitch.
pub fn zone_report(pitches: &[PitchEvent]) -> ZoneReport {
    let ids: Vec<ZoneId> = zones().map(|z| z.id).collect();
    let mut tallies = vec![ZoneTally::default(); ids.len()];
    let slot = |id: ZoneId| ids.iter().position(|z| *z == id);

    let mut unclassified = 0u32;
    for p in pitches {
        let Some(idx) = classify_pitch(p).and_then(slot) else {
            unclassified += 1;
            continue;
        };
        let t = &mut tallies[idx];
        t.pitches += 1;
        if p.pitch_call == PitchCall::StrikeSwinging {
            t.swinging_strikes += 1;
        }
        if p.pitch_call.is_swing() {
            t.swings += 1;
        }
        if p.pitch_call == PitchCall::InPlay {
            t.in_play += 1;
            match p.hit_type {
                HitType::GroundBall => t.ground += 1,
                HitType::FlyBall | HitType::Popup => t.fly += 1,
                HitType::LineDrive => t.line += 1,
                _ => {}
            }
        }
    }

    for p in final_pitches(pitches).values() {
        let Some(idx) = classify_pitch(p).and_then(slot) else {
            continue;
        };
        let t = &mut tallies[idx];
        let not_at_bat = p.kor_bb == StrikeoutOrWalk::Walk
            || p.pitch_call == PitchCall::HitByPitch
            || p.play_result.is_sacrifice();
        if !not_at_bat {
            t.at_bats += 1;
        }
        if p.play_result.is_hit() {
            t.hits += 1;
        }
    }

    let total = pitches.len() as u32;
    let pct = |n: u32, d: u32| {
        if d > 0 {
            fixed(f64::from(n) / f64::from(d) * 100.0, 1)
        } else {
            fixed(0.0, 1)
        }
    };

    let zones = ids
        .iter()
        .zip(&tallies)
        .map(|(&zone, t)| ZoneMetrics {
            zone,
            pitches: t.pitches,
            location_pct: pct(t.pitches, total),
            whiff_pct: pct(t.swinging_strikes, t.swings),
            ba: if t.at_bats > 0 {
                fixed(f64::from(t.hits) / f64::from(t.at_bats), 3)
            } else {
                fixed(0.0, 3)
            },
            gb_pct: pct(t.ground, t.in_play),
            fb_pct: pct(t.fly, t.in_play),
            ld_pct: pct(t.line, t.in_play),
        })
        .collect();

    tracing::debug!(total, unclassified, "built zone report");
    ZoneReport { total_pitches: total, unclassified, zones }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HalfInning, PlayResult};

    fn at(side: f64, height: f64, pa: u16) -> PitchEvent {
        let mut p = PitchEvent::new("G", 1, HalfInning::Top, pa, 1);
        p.plate_loc_side = Some(side);
        p.plate_loc_height = Some(height);
        p
    }

    #[test]
    fn test_inner_centers_map_to_own_id() {
        for zone in INNER_ZONES.iter() {
            let [x, y] = zone.shape.center();
            assert_eq!(classify(-x, y), Some(zone.id), "zone {}", zone.id);
        }
    }

    #[test]
    fn test_side_is_negated() {
        // recorded side +0.6 is zone-space x = -0.6: left column
        assert_eq!(classify(0.6, 3.2), Some(1));
        assert_eq!(classify(-0.6, 3.2), Some(3));
    }

    #[test]
    fn test_outer_zones() {
        assert_eq!(classify(1.5, 4.5), Some(11));
        assert_eq!(classify(-1.5, 4.5), Some(12));
        assert_eq!(classify(1.5, 0.5), Some(13));
        assert_eq!(classify(-1.5, 0.5), Some(14));
        // beside the inner grid, above the midline
        assert_eq!(classify(1.0, 3.0), Some(11));
    }

    #[test]
    fn test_outside_plotted_bounds() {
        assert_eq!(classify(10.0, 10.0), None);
        assert_eq!(classify(0.0, -1.0), None);
        assert_eq!(classify(f64::NAN, 2.0), None);
    }

    #[test]
    fn test_point_in_polygon_square() {
        let square = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        assert!(point_in_polygon(0.5, 0.5, &square));
        assert!(!point_in_polygon(1.5, 0.5, &square));
        assert!(!point_in_polygon(0.5, 0.5, &square[..2]));
    }

    #[test]
    fn test_zone_report_metrics() {
        let mut swing = at(0.0, 2.5, 1);
        swing.pitch_call = PitchCall::StrikeSwinging;
        let mut foul = at(0.0, 2.5, 1);
        foul.pitch_of_pa = 2;
        foul.pitch_call = PitchCall::FoulBall;
        let mut hit = at(0.0, 2.5, 1);
        hit.pitch_of_pa = 3;
        hit.pitch_call = PitchCall::InPlay;
        hit.play_result = PlayResult::Single;
        hit.hit_type = HitType::LineDrive;
        let mut popup = at(0.0, 2.5, 2);
        popup.pitch_call = PitchCall::InPlay;
        popup.play_result = PlayResult::Out;
        popup.hit_type = HitType::Popup;
        let nowhere = PitchEvent::new("G", 1, HalfInning::Top, 3, 1);

        let report = zone_report(&[swing, foul, hit, popup, nowhere]);
        assert_eq!(report.total_pitches, 5);
        assert_eq!(report.unclassified, 1);
        assert_eq!(report.zones.len(), 13);

        let five = &report.zones[4];
        assert_eq!(five.zone, 5);
        assert_eq!(five.pitches, 4);
        assert_eq!(five.location_pct, "80.0");
        assert_eq!(five.whiff_pct, "25.0");
        assert_eq!(five.ba, "0.500");
        assert_eq!(five.ld_pct, "50.0");
        assert_eq!(five.fb_pct, "50.0");
        assert_eq!(five.gb_pct, "0.0");

        let empty = &report.zones[0];
        assert_eq!((empty.location_pct.as_str(), empty.ba.as_str()), ("0.0", "0.000"));
    }
}
