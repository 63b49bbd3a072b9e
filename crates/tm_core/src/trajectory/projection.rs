//! Fixed affine calibrations from the TrackMan sensor frame to the viewer frame.
//!
//! ## Sensor frame (feet)
//! - x: from home plate toward the pitcher / center field
//! - y: toward the first/third base side
//! - z: height above ground
//!
//! ## Viewer frame
//! Scaled by 0.254 with a fixed origin shift so the plate sits at the scene
//! origin used by the renderer. Each matrix is 3x4: the first three columns
//! map the input axes, the fourth is the translation.

use nalgebra::{Matrix3x4, Point3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineTransform {
    rows: [[f64; 4]; 3],
}

/// Batted-ball flight.
pub const HIT: AffineTransform = AffineTransform::from_rows([
    [0.0, 0.0, 0.254, 0.0],
    [0.0, 0.254, 0.0, 0.3],
    [-0.254, 0.0, 0.0, 38.0],
]);

/// Pitch flight, release to plate.
pub const PITCH: AffineTransform = AffineTransform::from_rows([
    [0.0, 0.0, 0.254, -0.33],
    [0.0, 0.254, 0.0, 0.3],
    [-0.254, 0.0, 0.0, 38.47],
]);

/// Locations at the plate. Side and height swap target axes relative to
/// [`PITCH`] so the strike zone faces the camera.
pub const STRIKE_ZONE: AffineTransform = AffineTransform::from_rows([
    [0.0, 0.254, 0.0, -0.33],
    [0.0, 0.0, 0.254, 0.3],
    [-0.254, 0.0, 0.0, 38.47],
]);

impl AffineTransform {
    pub const fn from_rows(rows: [[f64; 4]; 3]) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[[f64; 4]; 3] {
        &self.rows
    }

    pub fn matrix(&self) -> Matrix3x4<f64> {
        let [a, b, c] = self.rows;
        Matrix3x4::new(
            a[0], a[1], a[2], a[3], //
            b[0], b[1], b[2], b[3], //
            c[0], c[1], c[2], c[3],
        )
    }

    /// `out[r] = Σ m[r][c] * in[c] + m[r][3]`
    pub fn project(&self, p: &Point3<f64>) -> Point3<f64> {
        Point3::from(self.matrix() * p.to_homogeneous())
    }
}

/// Convenience wrapper over [`AffineTransform::project`] for plain arrays.
pub fn project(point: [f64; 3], transform: &AffineTransform) -> [f64; 3] {
    let p = transform.project(&Point3::from(point));
    [p.x, p.y, p.z]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_x_row_reads_height() {
        let out = project([2.5, 0.0, 4.0], &HIT);
        assert!((out[0] - 0.254 * 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_translation_applies_at_origin() {
        assert_eq!(project([0.0, 0.0, 0.0], &HIT), [0.0, 0.3, 38.0]);
        assert_eq!(project([0.0, 0.0, 0.0], &PITCH), [-0.33, 0.3, 38.47]);
    }

    #[test]
    fn test_matrix_matches_rows() {
        let m = PITCH.matrix();
        assert_eq!(m[(2, 3)], 38.47);
        assert_eq!(m[(0, 2)], 0.254);
    }

    #[test]
    fn test_strike_zone_swaps_side_and_height() {
        let plate = project([0.0, 1.0, 2.0], &STRIKE_ZONE);
        let flight = project([0.0, 1.0, 2.0], &PITCH);
        assert!((plate[0] - (0.254 - 0.33)).abs() < 1e-12);
        assert!((plate[1] - (0.508 + 0.3)).abs() < 1e-12);
        assert!((flight[0] - (0.508 - 0.33)).abs() < 1e-12);
        assert!((flight[1] - (0.254 + 0.3)).abs() < 1e-12);
    }
}
