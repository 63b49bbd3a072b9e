//! TrackMan Analytics CLI
//!
//! Pitch JSON → MessagePack+LZ4 cache builder, plus stat, zone and replay
//! reports over JSON or cached pitches.

#[cfg(feature = "cli")]
use anyhow::{Context, Result};
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};
#[cfg(feature = "cli")]
use tm_core::analysis::{aggregate, build_charts, filter, zone_report, FilterCriteria, PlayerRole};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "tm_cli")]
#[command(about = "TrackMan pitch cache builder and analytics reports", long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Build a pitch cache from JSON
    Cache {
        /// Input JSON file path (flat pitches or season hierarchy)
        #[arg(long)]
        r#in: PathBuf,

        /// Output MsgPack+LZ4 file path
        #[arg(long)]
        out: PathBuf,

        /// Schema version (e.g., "v1")
        #[arg(long, default_value = "v1")]
        schema_version: String,

        /// Verify cache after building
        #[arg(long, default_value = "false")]
        verify: bool,

        /// Output metadata JSON file
        #[arg(long)]
        metadata: Option<PathBuf>,
    },

    /// Stat line for a hitter or pitcher
    Stats {
        /// Input JSON or .tmc cache
        #[arg(long)]
        r#in: PathBuf,

        /// hitter | pitcher
        #[arg(long, default_value = "hitter")]
        role: PlayerRole,

        /// Batter or pitcher id, matching the role
        #[arg(long)]
        player: Option<u64>,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Per-zone strike zone report
    Zones {
        #[arg(long)]
        r#in: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Chart points and pitch-type summary
    Charts {
        #[arg(long)]
        r#in: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Replay document for one game
    Replay {
        #[arg(long)]
        r#in: PathBuf,

        /// Game id
        #[arg(long)]
        game: String,

        /// Write to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// Filter criteria; omitted flags mean "all".
#[cfg(feature = "cli")]
#[derive(Args, Default)]
struct FilterArgs {
    /// "2024" or "Preseason 2023-2024"
    #[arg(long)]
    season: Option<String>,
    /// 1-12
    #[arg(long)]
    month: Option<String>,
    #[arg(long)]
    pitch_type: Option<String>,
    #[arg(long)]
    pitch_call: Option<String>,
    #[arg(long)]
    balls: Option<String>,
    #[arg(long)]
    strikes: Option<String>,
    #[arg(long)]
    outs: Option<String>,
    /// Left | Right
    #[arg(long)]
    batter_side: Option<String>,
    /// Repeatable
    #[arg(long = "game-id")]
    game_ids: Vec<String>,
}

#[cfg(feature = "cli")]
impl FilterArgs {
    fn into_criteria(self) -> FilterCriteria {
        FilterCriteria {
            season: self.season,
            month: self.month,
            pitch_type: self.pitch_type,
            pitch_call: self.pitch_call,
            balls: self.balls,
            strikes: self.strikes,
            outs: self.outs,
            batter_side: self.batter_side,
            game_ids: (!self.game_ids.is_empty()).then_some(self.game_ids),
            ..Default::default()
        }
    }
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    use tracing_subscriber::EnvFilter;

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(env_filter).with_writer(std::io::stderr).try_init();

    match cli.command {
        Commands::Cache { r#in, out, schema_version, verify, metadata } => {
            tracing::info!(input = %r#in.display(), output = %out.display(), %schema_version, "building pitch cache");

            let meta = tm_cli::build_pitch_cache(&r#in, &out, &schema_version)?;
            print_metadata(&meta);

            if verify {
                verify_cache_integrity(&out, &meta.checksum)?;
            }
            if let Some(metadata_path) = metadata {
                save_metadata(&metadata_path, &meta)?;
            }
        }

        Commands::Stats { r#in, role, player, filters } => {
            let mut criteria = filters.into_criteria();
            if let Some(id) = player {
                match role {
                    PlayerRole::Hitter => criteria.batter_id = Some(id.to_string()),
                    PlayerRole::Pitcher => criteria.pitcher_id = Some(id.to_string()),
                }
            }
            let pitches = filter(&tm_cli::load_pitches(&r#in)?, &criteria);
            print_json(&aggregate(&pitches, role))?;
        }

        Commands::Zones { r#in, filters } => {
            let pitches = filter(&tm_cli::load_pitches(&r#in)?, &filters.into_criteria());
            print_json(&zone_report(&pitches))?;
        }

        Commands::Charts { r#in, filters } => {
            let pitches = filter(&tm_cli::load_pitches(&r#in)?, &filters.into_criteria());
            print_json(&build_charts(&pitches))?;
        }

        Commands::Replay { r#in, game, out } => {
            let config = tm_core::config::load_config_from_env()?;
            let builder = tm_core::trajectory::CurveBuilder::new(config.curves);
            let pitches = tm_cli::load_pitches(&r#in)?;
            let replay = tm_core::replay::build_replay(&pitches, &game, &builder)?;

            match out {
                Some(path) => {
                    std::fs::write(&path, serde_json::to_string(&replay)?)
                        .with_context(|| format!("Failed to write replay: {}", path.display()))?;
                    tracing::info!(path = %path.display(), entries = replay.len(), "replay saved");
                }
                None => print_json(&replay)?,
            }
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(feature = "cli")]
fn print_metadata(meta: &tm_cli::CacheMetadata) {
    println!("Cache built successfully");
    println!("   Pitches:         {} in {} games", meta.pitch_count, meta.game_count);
    println!(
        "   Original size:   {} bytes ({:.2} KB)",
        meta.original_size,
        meta.original_size as f64 / 1024.0
    );
    println!(
        "   Compressed size: {} bytes ({:.2} KB)",
        meta.compressed_size,
        meta.compressed_size as f64 / 1024.0
    );
    println!("   Compression:     {:.1}%", meta.compression_ratio * 100.0);
    println!("   Checksum:        {}", meta.checksum);
    println!("   Created:         {}", meta.created_at);
}

#[cfg(feature = "cli")]
fn verify_cache_integrity(cache_path: &Path, checksum: &str) -> Result<()> {
    if tm_cli::verify_cache(cache_path, checksum)? {
        tracing::info!("cache verification passed");
        Ok(())
    } else {
        anyhow::bail!("Cache verification failed - checksum mismatch")
    }
}

#[cfg(feature = "cli")]
fn save_metadata(path: &Path, meta: &tm_cli::CacheMetadata) -> Result<()> {
    let metadata_json = serde_json::to_string_pretty(meta)?;
    std::fs::write(path, metadata_json)
        .with_context(|| format!("Failed to write metadata: {}", path.display()))?;
    tracing::info!(path = %path.display(), "metadata saved");
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("tm_cli is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
