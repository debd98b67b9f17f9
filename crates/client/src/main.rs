//! Encounter runner binary.
//!
//! Composition root that assembles:
//! 1. Content (encounter snapshot + optional tuning) via the loaders
//! 2. Runtime (encounter worker) via `Runtime::builder`
//! 3. A scripted player policy standing in for interactive input
//!
//! The combat log streams to stderr through tracing; stdout carries only the
//! end payload as JSON.
//!
//! # Examples
//!
//! ```bash
//! cargo run -p encounter-cli -- data/encounter.ron
//! cargo run -p encounter-cli -- data/encounter.ron --seed 7 --flee --pretty
//! RUST_LOG=runtime=debug cargo run -p encounter-cli -- data/encounter.ron
//! ```

mod logging;
mod provider;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use encounter_content::{ConfigLoader, EncounterLoader};
use encounter_core::Disposition;
use runtime::{Event, RosterPoolImpl, Runtime, RuntimeConfig, Topic};
use tokio::sync::broadcast::error::RecvError;

use provider::ScriptedProvider;

/// Run one combat encounter and print its end payload
#[derive(Parser)]
#[command(name = "encounter")]
#[command(about = "Runs an action-gauge combat encounter from a snapshot file", long_about = None)]
#[command(version)]
struct Cli {
    /// Encounter snapshot (RON: request + character pool)
    #[arg(default_value = "data/encounter.ron")]
    snapshot: PathBuf,

    /// Engine tuning overrides (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fixed dice seed (overrides ENCOUNTER_RNG_SEED)
    #[arg(long)]
    seed: Option<u64>,

    /// Try to flee on every player turn instead of attacking
    #[arg(long)]
    flee: bool,

    /// Disposition for every defeated opponent after victory
    #[arg(long, default_value_t = Disposition::Release, value_parser = parse_disposition)]
    disposition: Disposition,

    /// Pretty-print the payload
    #[arg(long)]
    pretty: bool,
}

fn parse_disposition(value: &str) -> std::result::Result<Disposition, String> {
    value
        .parse()
        .map_err(|_| format!("expected kill, capture or release, got {value:?}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();
    logging::init();

    let cli = Cli::parse();

    let file = EncounterLoader::load(&cli.snapshot)?;
    let mut config = RuntimeConfig::from_env();
    if let Some(path) = &cli.config {
        config.encounter = ConfigLoader::load(path)?;
    }
    if cli.seed.is_some() {
        config.rng_seed = cli.seed;
    }

    tracing::info!(
        snapshot = %cli.snapshot.display(),
        opponents = ?file.request.opponent_refs,
        seed = ?config.rng_seed,
        "Starting encounter"
    );

    let mut runtime = Runtime::builder()
        .config(config)
        .request(file.request)
        .pool(RosterPoolImpl::new(file.pool))
        .player_provider(ScriptedProvider::new(cli.flee, cli.disposition))
        .build()
        .await
        .context("failed to build runtime")?;

    let mut log_rx = runtime.handle().subscribe(Topic::Log);
    let log_task = tokio::spawn(async move {
        loop {
            match log_rx.recv().await {
                Ok(Event::Log(entry)) => {
                    tracing::info!(
                        target: "encounter::log",
                        speaker = %entry.speaker,
                        "{}",
                        entry.text
                    );
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Combat log output fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    let payload = runtime.run().await.context("encounter failed")?;
    runtime.shutdown().await?;
    // The bus closes with the last handle; drain what is left.
    let _ = log_task.await;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&payload)?
    } else {
        serde_json::to_string(&payload)?
    };
    println!("{json}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from([
            "encounter",
            "fight.ron",
            "--seed",
            "9",
            "--disposition",
            "capture",
            "--flee",
        ])
        .unwrap();
        assert_eq!(cli.snapshot, PathBuf::from("fight.ron"));
        assert_eq!(cli.seed, Some(9));
        assert_eq!(cli.disposition, Disposition::Capture);
        assert!(cli.flee);
        assert!(!cli.pretty);
    }

    #[test]
    fn defaults_to_bundled_snapshot_and_release() {
        let cli = Cli::try_parse_from(["encounter"]).unwrap();
        assert_eq!(cli.snapshot, PathBuf::from("data/encounter.ron"));
        assert_eq!(cli.disposition, Disposition::Release);
    }

    #[test]
    fn rejects_unknown_disposition() {
        assert!(Cli::try_parse_from(["encounter", "--disposition", "spare"]).is_err());
    }
}
