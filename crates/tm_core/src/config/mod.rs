//! # Analytics Configuration
//!
//! Tunable constants for curve sampling and chart output, loaded from JSON or
//! YAML and validated before use.
//!
//! ```rust
//! use tm_core::config::AnalyticsConfig;
//!
//! let viewer = AnalyticsConfig::viewer_3d();
//! assert_eq!(viewer.curves.pitch_samples, 150);
//! ```

mod curve_config;
mod env;

pub use curve_config::CurveConfig;
pub use env::{load_config_from_env, CONFIG_PATH_ENV};

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default, PartialEq)]
pub struct AnalyticsConfig {
    #[serde(default)]
    #[validate]
    pub curves: CurveConfig,
}

impl AnalyticsConfig {
    /// 3D game viewer: dense pitch curves.
    pub fn viewer_3d() -> Self {
        Self::default()
    }

    /// 2D plots: coarser sampling is enough.
    pub fn plot_2d() -> Self {
        let mut cfg = Self::default();
        cfg.curves.pitch_samples = 50;
        cfg.curves.hit_steps = 50;
        cfg
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load by extension: `.yaml` / `.yml` as YAML, anything else as JSON.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml(&content),
            _ => Self::from_json(&content),
        }
    }
}
