use super::AnalyticsConfig;
use crate::error::{CoreError, Result};
use std::env;
use std::path::Path;

pub const CONFIG_PATH_ENV: &str = "TM_ANALYTICS_CONFIG";

/// Config named by `TM_ANALYTICS_CONFIG`, or the default when unset or blank.
pub fn load_config_from_env() -> Result<AnalyticsConfig> {
    let Ok(path) = env::var(CONFIG_PATH_ENV) else {
        return Ok(AnalyticsConfig::default());
    };

    let path = path.trim();
    if path.is_empty() {
        return Ok(AnalyticsConfig::default());
    }

    AnalyticsConfig::from_file(Path::new(path)).map_err(|e| {
        tracing::warn!(path, error = %e, "rejected analytics config");
        match e {
            CoreError::Io(io) => CoreError::InvalidConfig(format!(
                "Failed to read config from {CONFIG_PATH_ENV}='{path}': {io}"
            )),
            other => other,
        }
    })
}
