//! Ball position from per-axis trajectory polynomials.

use super::polynomial::evaluate;
use crate::models::{CoefficientSet, HitTrajectory};
use nalgebra::Point3;

/// Position in sensor space `t` seconds after the reference event.
///
/// Missing coefficients turn their axis into NaN; check
/// [`CoefficientSet::is_all_na`] and the time bound before calling.
pub fn position_at<const N: usize>(set: &CoefficientSet<N>, t: f64) -> Point3<f64> {
    Point3::new(
        evaluate(t, &set.axis_values(0)),
        evaluate(t, &set.axis_values(1)),
        evaluate(t, &set.axis_values(2)),
    )
}

pub fn is_finite_point(p: &Point3<f64>) -> bool {
    p.iter().all(|v| v.is_finite())
}

/// Landing point of a batted ball in sensor space.
///
/// `None` unless the hang time is finite and positive, the set carries at
/// least one coefficient, and every axis evaluates to a finite value.
pub fn landing_point(trajectory: &HitTrajectory, hang_time: Option<f64>) -> Option<Point3<f64>> {
    let t = hang_time.filter(|t| t.is_finite() && *t > 0.0)?;
    if trajectory.is_all_na() {
        return None;
    }
    let p = position_at(trajectory, t);
    is_finite_point(&p).then_some(p)
}
