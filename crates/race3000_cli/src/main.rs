//! Race 3000 - command-line driver
//!
//! Builds a race from configuration and plays it, rolls its dice, or
//! validates the setup.

#![warn(missing_docs)]

mod cli;
mod config;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use config::GameConfig;
use derive_getters::Getters;
use derive_new::new;
use race3000::{GameSnapshot, PlayerColor};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

/// Outcome of a simulated race, printed with `--json`.
#[derive(Debug, Serialize, Getters, new)]
struct RunSummary {
    turns: usize,
    standings: Vec<PlayerColor>,
    snapshot: GameSnapshot,
}

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), cli.seed)?;

    match cli.command {
        Command::Simulate { max_turns, json } => {
            simulate(config.with_max_turns(max_turns), json)
        }
        Command::Roll { count } => roll(&config, count),
        Command::Validate => validate(&config),
    }
}

/// Loads configuration, then applies environment and flag overrides.
#[instrument]
fn load_config(path: Option<&std::path::Path>, seed: Option<u64>) -> Result<GameConfig> {
    let config = match path {
        Some(path) => GameConfig::from_file(path)?,
        None => {
            info!("No config given, using built-in defaults");
            GameConfig::default()
        }
    };
    Ok(config.apply_env()?.with_seed(seed))
}

/// Plays a race to the finish (or the turn cap) and prints it.
#[instrument(skip(config))]
fn simulate(config: GameConfig, json: bool) -> Result<()> {
    let mut game = config.build_game().context("Failed to set up race")?;
    game.start().context("Failed to start race")?;

    let turns = game.run_to_finish(*config.max_turns())?;
    let summary = RunSummary::new(turns, game.standings(), game.snapshot());

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for (turn, report) in game.history().iter().enumerate() {
            println!("{:>4}  {}", turn + 1, report);
        }
        println!("Race over after {} turns ({})", summary.turns(), summary.snapshot().state);
        for (place, player) in summary.standings().iter().enumerate() {
            println!("  {}. {}", place + 1, player);
        }
        for player in &summary.snapshot().players {
            println!("  -- {} ({} pieces left)", player.name(), player.pieces_left());
        }
    }
    Ok(())
}

/// Rolls the configured dice `count` times.
#[instrument(skip(config))]
fn roll(config: &GameConfig, count: usize) -> Result<()> {
    let dice = config.build_dice()?;
    let mut rng = match config.seed() {
        Some(seed) => StdRng::seed_from_u64(*seed),
        None => StdRng::from_os_rng(),
    };
    for _ in 0..count {
        let (index, face) = dice.roll(&mut rng);
        println!("face {}: {}", index, face);
    }
    Ok(())
}

/// Builds and starts a race without playing it.
#[instrument(skip(config))]
fn validate(config: &GameConfig) -> Result<()> {
    let mut game = config.build_game()?;
    game.start()?;
    println!(
        "OK: {} players, {} faces",
        game.players().len(),
        game.dice().len()
    );
    Ok(())
}
