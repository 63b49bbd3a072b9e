//! Pitch Cache Library
//!
//! Pitch JSON → MessagePack → LZ4 → SHA256 checksum, and back.

pub mod input;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use tm_core::models::PitchEvent;

pub use input::{load_pitches, parse_pitch_json, read_pitch_json, CACHE_EXTENSION};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheMetadata {
    /// Cache schema version (e.g. "v1")
    pub schema_version: String,
    /// SHA256 of the compressed bytes (hex)
    pub checksum: String,
    /// RFC3339
    pub created_at: String,
    /// Input JSON size (bytes)
    pub original_size: u64,
    pub compressed_size: u64,
    /// compressed / original
    pub compression_ratio: f64,
    pub pitch_count: usize,
    pub game_count: usize,
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Normalize pitch JSON (flat or nested) into a compressed pitch cache.
pub fn build_pitch_cache(
    input_json: &Path,
    output_cache: &Path,
    schema_version: &str,
) -> Result<CacheMetadata> {
    let original_size = fs::metadata(input_json)
        .with_context(|| format!("Failed to stat JSON file: {}", input_json.display()))?
        .len();
    let pitches = read_pitch_json(input_json)?;

    let msgpack_bytes =
        rmp_serde::to_vec_named(&pitches).context("Failed to serialize to MessagePack")?;
    let compressed = lz4_flex::compress_prepend_size(&msgpack_bytes);
    let compressed_size = compressed.len() as u64;
    let checksum = sha256_hex(&compressed);

    if let Some(parent) = output_cache.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    fs::write(output_cache, &compressed)
        .with_context(|| format!("Failed to write output file: {}", output_cache.display()))?;

    let mut games: Vec<&str> = pitches.iter().map(|p| p.game_id.as_str()).collect();
    games.sort_unstable();
    games.dedup();

    let compression_ratio =
        if original_size > 0 { compressed_size as f64 / original_size as f64 } else { 0.0 };

    tracing::info!(
        pitches = pitches.len(),
        games = games.len(),
        compressed_size,
        "built pitch cache"
    );

    Ok(CacheMetadata {
        schema_version: schema_version.to_string(),
        checksum,
        created_at: chrono::Utc::now().to_rfc3339(),
        original_size,
        compressed_size,
        compression_ratio,
        pitch_count: pitches.len(),
        game_count: games.len(),
    })
}

/// True when the cache file's SHA256 matches `expected_checksum`.
pub fn verify_cache(cache_file: &Path, expected_checksum: &str) -> Result<bool> {
    let bytes = fs::read(cache_file)
        .with_context(|| format!("Failed to read cache file: {}", cache_file.display()))?;
    Ok(sha256_hex(&bytes) == expected_checksum)
}

/// Decompress and decode a pitch cache.
pub fn load_pitch_cache(cache_file: &Path) -> Result<Vec<PitchEvent>> {
    let compressed = fs::read(cache_file)
        .with_context(|| format!("Failed to read cache file: {}", cache_file.display()))?;
    let msgpack_bytes =
        lz4_flex::decompress_size_prepended(&compressed).context("Failed to decompress LZ4")?;
    rmp_serde::from_slice(&msgpack_bytes).context("Failed to deserialize MessagePack")
}
