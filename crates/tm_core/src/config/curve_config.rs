//! Trajectory sampling configuration

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Sampling parameters for pitch and batted-ball curves
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(default)]
pub struct CurveConfig {
    /// Points per pitch curve, evenly spaced over [0, zone_time] (default: 150)
    #[validate(range(min = 2, max = 10000))]
    pub pitch_samples: usize,
    /// Steps per hit curve over [0, hang_time] (default: 100)
    #[validate(range(min = 1, max = 10000))]
    pub hit_steps: usize,
    /// Zone time used when a pitch has none or a non-positive one (default: 0.5s)
    #[validate(range(min = 0.01, max = 5.0))]
    pub zone_time_fallback: f64,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self { pitch_samples: 150, hit_steps: 100, zone_time_fallback: 0.5 }
    }
}
