//! Command-line interface for race3000.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Race 3000 - dice race rules engine driver
#[derive(Parser, Debug)]
#[command(name = "race3000")]
#[command(about = "Runs Race 3000 games from a TOML configuration", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the game configuration (built-in defaults if omitted)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed for dice rolls (overrides config and RACE3000_SEED)
    #[arg(short, long, global = true)]
    pub seed: Option<u64>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a race to the finish and print every turn
    Simulate {
        /// Stop after this many turns (overrides config)
        #[arg(long)]
        max_turns: Option<usize>,

        /// Print the final game snapshot as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Roll the configured dice without playing
    Roll {
        /// Number of rolls
        #[arg(short = 'n', long, default_value = "6")]
        count: usize,
    },

    /// Check that the configuration builds a startable race
    Validate,
}
