//! # Trajectory Module
//!
//! Ball-flight reconstruction from TrackMan polynomial coefficients.
//!
//! - `polynomial` - scalar polynomial evaluation
//! - `reconstruct` - per-axis position and landing point in sensor space
//! - `projection` - fixed sensor → viewer affine calibrations
//! - `curve` - sampled pitch/hit curves with pitch→hit continuity

pub mod curve;
pub mod polynomial;
pub mod projection;
pub mod reconstruct;

pub use curve::{Curve, CurveAxes, CurveBuilder, PitchGeometry};
pub use polynomial::evaluate;
pub use projection::{project, AffineTransform, HIT, PITCH, STRIKE_ZONE};
pub use reconstruct::{is_finite_point, landing_point, position_at};
