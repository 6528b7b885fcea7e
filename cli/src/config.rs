//! Configuration for the interactive driver.
//!
//! CLI arguments only; the game has no config file. Validation happens once
//! before the first move.

use anyhow::{anyhow, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;

/// Command-line configuration for a human-versus-engine game.
#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(name = "squava")]
#[command(about = "Play Squava against a Monte Carlo tree search engine")]
#[command(long_about = "Interactive Squava on a 5x5 board: four marks in a
straight line win, three in a line without a redeeming four lose.

The human enters moves as `row col` (both 0-4); the computer plays X and
answers with a tree search sized by --iterations.")]
pub struct Config {
    /// Computer takes the first move
    #[arg(short = 'C', long, default_value_t = false)]
    pub computer_first: bool,

    /// Search iterations per computer move
    #[arg(short = 'i', long, default_value_t = 500_000)]
    pub iterations: u32,

    /// RNG seed for reproducible games (entropy-seeded if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(anyhow!("iterations must be greater than 0"));
        }

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }
}
