//! Sampled pitch and batted-ball curves in viewer space.
//!
//! A pitch curve runs from release to the plate using the pitch calibration.
//! A hit curve runs from contact to landing using the hit calibration, then is
//! shifted so it starts exactly where the pitch curve ends. The two recordings
//! use different origins; the shift is a display alignment, not physics.

use super::projection::{AffineTransform, HIT, PITCH};
use super::reconstruct::{is_finite_point, position_at};
use crate::config::CurveConfig;
use crate::models::PitchEvent;
use nalgebra::{Point3, Vector3};
use rayon::prelude::*;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Ordered points with the time parameter each was sampled at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Curve {
    pub times: Vec<f64>,
    #[schemars(with = "Vec<[f64; 3]>")]
    pub points: Vec<Point3<f64>>,
}

/// Column layout for renderers that want one array per axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CurveAxes {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
}

impl Curve {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Point3<f64>> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point3<f64>> {
        self.points.last()
    }

    pub fn to_axes(&self) -> CurveAxes {
        CurveAxes {
            x: self.points.iter().map(|p| p.x).collect(),
            y: self.points.iter().map(|p| p.y).collect(),
            z: self.points.iter().map(|p| p.z).collect(),
        }
    }
}

/// Both curves for one pitch. `hit` is absent for pitches without batted-ball data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PitchGeometry {
    pub pitch_id: Uuid,
    pub pitch: Curve,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hit: Option<Curve>,
}

/// Evenly spaced times over `[0, upper]`, both ends included.
fn sample_times(upper: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let last = (count - 1) as f64;
            (0..count).map(|i| upper * i as f64 / last).collect()
        }
    }
}

/// Project every sample, failing on the first non-finite point.
fn sample_projected<const N: usize>(
    set: &crate::models::CoefficientSet<N>,
    times: &[f64],
    transform: &AffineTransform,
) -> Option<Vec<Point3<f64>>> {
    times
        .iter()
        .map(|&t| {
            let p = transform.project(&position_at(set, t));
            is_finite_point(&p).then_some(p)
        })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct CurveBuilder {
    config: CurveConfig,
}

impl CurveBuilder {
    pub fn new(config: CurveConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CurveConfig {
        &self.config
    }

    /// Release-to-plate curve with exactly `pitch_samples` points.
    ///
    /// Needs pitch coefficients and pitching metrics. A missing or non-positive
    /// zone time falls back to the configured default.
    pub fn build_pitch_curve(&self, pitch: &PitchEvent) -> Option<Curve> {
        let trajectory = pitch.pitch_trajectory.as_ref()?;
        let metrics = pitch.pitching.as_ref()?;
        if trajectory.is_all_na() {
            debug!(pitch_id = %pitch.id, "pitch trajectory is all NA");
            return None;
        }

        let zone_time = metrics
            .zone_time
            .filter(|t| t.is_finite() && *t > 0.0)
            .unwrap_or(self.config.zone_time_fallback);

        let times = sample_times(zone_time, self.config.pitch_samples);
        let Some(points) = sample_projected(trajectory, &times, &PITCH) else {
            debug!(pitch_id = %pitch.id, "pitch curve has non-finite samples");
            return None;
        };
        Some(Curve { times, points })
    }

    /// Contact-to-landing curve aligned to the end of `pitch_curve`.
    ///
    /// The first point is the pitch curve's endpoint, followed by
    /// `hit_steps + 1` samples over `[0, hang_time]` shifted by
    /// `pitch_end - HIT(contact_position)`.
    pub fn build_hit_curve(&self, pitch: &PitchEvent, pitch_curve: &Curve) -> Option<Curve> {
        let trajectory = pitch.hit_trajectory.as_ref()?;
        if trajectory.is_all_na() {
            return None;
        }
        let hitting = pitch.hitting.as_ref()?;
        let hang_time = hitting.valid_hang_time()?;
        let contact = hitting.contact_position()?;
        let pitch_end = *pitch_curve.last()?;
        if !is_finite_point(&pitch_end) {
            return None;
        }

        let contact_view = HIT.project(&Point3::from(contact));
        let shift: Vector3<f64> = pitch_end - contact_view;

        let hit_times = sample_times(hang_time, self.config.hit_steps + 1);
        let Some(samples) = sample_projected(trajectory, &hit_times, &HIT) else {
            debug!(pitch_id = %pitch.id, "hit curve has non-finite samples");
            return None;
        };

        let mut times = Vec::with_capacity(samples.len() + 1);
        let mut points = Vec::with_capacity(samples.len() + 1);
        times.push(0.0);
        points.push(pitch_end);
        times.extend(hit_times);
        points.extend(samples.into_iter().map(|p| p + shift));

        Some(Curve { times, points })
    }

    /// Pitch curve plus the aligned hit curve when batted-ball data exists.
    pub fn build_pitch_geometry(&self, pitch: &PitchEvent) -> Option<PitchGeometry> {
        let pitch_curve = self.build_pitch_curve(pitch)?;
        let hit = self.build_hit_curve(pitch, &pitch_curve);
        Some(PitchGeometry { pitch_id: pitch.id, pitch: pitch_curve, hit })
    }

    /// Geometry for every pitch that has it, in input order.
    pub fn build_game_geometry(&self, pitches: &[PitchEvent]) -> Vec<PitchGeometry> {
        let out: Vec<PitchGeometry> =
            pitches.par_iter().filter_map(|p| self.build_pitch_geometry(p)).collect();
        debug!(input = pitches.len(), built = out.len(), "built pitch geometry");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        HalfInning, HitTrajectory, HittingMetrics, PitchTrajectory, PitchingMetrics,
    };

    fn pitch_with_trajectory() -> PitchEvent {
        let mut p = PitchEvent::new("G1", 1, HalfInning::Top, 1, 1);
        p.pitch_trajectory = Some(PitchTrajectory::from_values(
            [55.0, -130.0, 12.0],
            [0.4, -1.5, 2.0],
            [6.0, -3.0, -14.0],
        ));
        p.pitching = Some(PitchingMetrics { zone_time: Some(0.42), ..Default::default() });
        p
    }

    fn with_batted_ball(mut p: PitchEvent) -> PitchEvent {
        let mut x = [0.0; 9];
        let mut y = [0.0; 9];
        let mut z = [0.0; 9];
        x[0] = 2.0;
        x[1] = 120.0;
        y[1] = 15.0;
        z[0] = 3.0;
        z[1] = 40.0;
        z[2] = -16.0;
        p.hit_trajectory = Some(HitTrajectory::from_values(x, y, z));
        p.hitting = Some(HittingMetrics {
            hang_time: Some(2.5),
            contact_position_x: Some(2.0),
            contact_position_y: Some(0.0),
            contact_position_z: Some(3.0),
            ..Default::default()
        });
        p
    }

    #[test]
    fn test_pitch_curve_sample_count_and_monotonic_time() {
        let builder = CurveBuilder::default();
        let curve = builder.build_pitch_curve(&pitch_with_trajectory()).unwrap();

        assert_eq!(curve.len(), 150);
        assert_eq!(curve.times.len(), 150);
        assert!(curve.times.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(curve.times[0], 0.0);
        assert!((curve.times[149] - 0.42).abs() < 1e-12);
    }

    #[test]
    fn test_pitch_curve_custom_sample_count() {
        let builder = CurveBuilder::new(CurveConfig { pitch_samples: 20, ..Default::default() });
        let curve = builder.build_pitch_curve(&pitch_with_trajectory()).unwrap();
        assert_eq!(curve.len(), 20);
    }

    #[test]
    fn test_zone_time_fallback() {
        let mut p = pitch_with_trajectory();
        p.pitching = Some(PitchingMetrics { zone_time: Some(-1.0), ..Default::default() });
        let curve = CurveBuilder::default().build_pitch_curve(&p).unwrap();
        assert!((curve.times.last().unwrap() - 0.5).abs() < 1e-12);

        p.pitching = Some(PitchingMetrics::default());
        let curve = CurveBuilder::default().build_pitch_curve(&p).unwrap();
        assert!((curve.times.last().unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_pitch_curve_requires_inputs() {
        let builder = CurveBuilder::default();

        let mut no_metrics = pitch_with_trajectory();
        no_metrics.pitching = None;
        assert!(builder.build_pitch_curve(&no_metrics).is_none());

        let mut all_na = pitch_with_trajectory();
        all_na.pitch_trajectory = Some(PitchTrajectory::empty());
        assert!(builder.build_pitch_curve(&all_na).is_none());

        let mut partial = pitch_with_trajectory();
        if let Some(t) = partial.pitch_trajectory.as_mut() {
            t.z[2] = None;
        }
        assert!(builder.build_pitch_curve(&partial).is_none());
    }

    #[test]
    fn test_hit_curve_starts_at_pitch_end() {
        let builder = CurveBuilder::default();
        let pitch = with_batted_ball(pitch_with_trajectory());
        let pitch_curve = builder.build_pitch_curve(&pitch).unwrap();
        let hit_curve = builder.build_hit_curve(&pitch, &pitch_curve).unwrap();

        assert_eq!(hit_curve.first(), pitch_curve.last());
        assert_eq!(hit_curve.len(), 102);
    }

    #[test]
    fn test_hit_curve_shift_aligns_contact_sample() {
        let builder = CurveBuilder::default();
        let pitch = with_batted_ball(pitch_with_trajectory());
        let pitch_curve = builder.build_pitch_curve(&pitch).unwrap();
        let hit_curve = builder.build_hit_curve(&pitch, &pitch_curve).unwrap();

        // contact position equals the t=0 sample, so the first shifted sample
        // lands on the pitch endpoint too
        let end = pitch_curve.last().unwrap();
        let first_sample = hit_curve.points[1];
        assert!((first_sample - end).norm() < 1e-9);
    }

    #[test]
    fn test_hit_curve_missing_data() {
        let builder = CurveBuilder::default();
        let pitch = with_batted_ball(pitch_with_trajectory());
        let pitch_curve = builder.build_pitch_curve(&pitch).unwrap();

        let mut no_hang = pitch.clone();
        if let Some(h) = no_hang.hitting.as_mut() {
            h.hang_time = Some(0.0);
        }
        assert!(builder.build_hit_curve(&no_hang, &pitch_curve).is_none());

        let mut no_contact = pitch.clone();
        if let Some(h) = no_contact.hitting.as_mut() {
            h.contact_position_y = None;
        }
        assert!(builder.build_hit_curve(&no_contact, &pitch_curve).is_none());

        let mut all_na = pitch.clone();
        all_na.hit_trajectory = Some(HitTrajectory::empty());
        assert!(builder.build_hit_curve(&all_na, &pitch_curve).is_none());

        let empty = Curve { times: vec![], points: vec![] };
        assert!(builder.build_hit_curve(&pitch, &empty).is_none());
    }

    #[test]
    fn test_geometry_without_batted_ball() {
        let geometry = CurveBuilder::default().build_pitch_geometry(&pitch_with_trajectory()).unwrap();
        assert!(geometry.hit.is_none());
        assert_eq!(geometry.pitch.len(), 150);
    }

    #[test]
    fn test_game_geometry_preserves_order_and_skips_missing() {
        let a = pitch_with_trajectory();
        let mut b = PitchEvent::new("G1", 1, HalfInning::Top, 1, 2);
        b.pitch_trajectory = None;
        let c = with_batted_ball(pitch_with_trajectory());

        let out = CurveBuilder::default().build_game_geometry(&[a.clone(), b, c.clone()]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].pitch_id, a.id);
        assert_eq!(out[1].pitch_id, c.id);
        assert!(out[1].hit.is_some());
    }

    #[test]
    fn test_curve_axes_layout() {
        let curve = Curve {
            times: vec![0.0, 1.0],
            points: vec![Point3::new(1.0, 2.0, 3.0), Point3::new(4.0, 5.0, 6.0)],
        };
        let axes = curve.to_axes();
        assert_eq!(axes.x, vec![1.0, 4.0]);
        assert_eq!(axes.z, vec![3.0, 6.0]);
    }
}
