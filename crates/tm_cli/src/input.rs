//! Pitch input loading
//!
//! Accepted JSON shapes:
//! - a flat array of pitches
//! - an array of seasons (`[{ "label", "games": [...] }]`)
//! - an object with `pitches` or `seasons`
//!
//! Files ending in `.tmc` are read as pitch caches.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use tm_core::analysis::flatten;
use tm_core::models::{PitchEvent, Season};

/// Cache file extension.
pub const CACHE_EXTENSION: &str = "tmc";

/// Parse pitch JSON in any accepted shape into a flat pitch list.
pub fn parse_pitch_json(json: &str) -> Result<Vec<PitchEvent>> {
    let value: serde_json::Value = serde_json::from_str(json).context("Failed to parse JSON")?;

    let (pitches, seasons) = match value {
        serde_json::Value::Array(items) => {
            let nested = items.first().is_some_and(|first| first.get("games").is_some());
            if nested {
                (None, Some(items))
            } else {
                (Some(items), None)
            }
        }
        serde_json::Value::Object(mut map) => {
            let pitches = map.remove("pitches").map(array_items).transpose()?;
            let seasons = map.remove("seasons").map(array_items).transpose()?;
            (pitches, seasons)
        }
        _ => bail!("Expected a JSON array or object of pitches"),
    };

    match (pitches, seasons) {
        (Some(items), None) => serde_json::from_value(serde_json::Value::Array(items))
            .context("Failed to decode pitch array"),
        (None, Some(items)) => {
            let seasons: Vec<Season> = serde_json::from_value(serde_json::Value::Array(items))
                .context("Failed to decode season hierarchy")?;
            Ok(flatten(&seasons))
        }
        (Some(_), Some(_)) => bail!("Input has both `pitches` and `seasons`; provide one"),
        (None, None) => bail!("Input has neither `pitches` nor `seasons`"),
    }
}

fn array_items(value: serde_json::Value) -> Result<Vec<serde_json::Value>> {
    match value {
        serde_json::Value::Array(items) => Ok(items),
        _ => bail!("Expected a JSON array"),
    }
}

pub fn read_pitch_json(path: &Path) -> Result<Vec<PitchEvent>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {}", path.display()))?;
    parse_pitch_json(&json).with_context(|| format!("Invalid pitch input: {}", path.display()))
}

/// Load pitches from JSON or from a `.tmc` cache.
pub fn load_pitches(path: &Path) -> Result<Vec<PitchEvent>> {
    let pitches = match path.extension().and_then(|e| e.to_str()) {
        Some(CACHE_EXTENSION) => crate::load_pitch_cache(path)?,
        _ => read_pitch_json(path)?,
    };
    tracing::info!(path = %path.display(), pitches = pitches.len(), "loaded pitches");
    Ok(pitches)
}
