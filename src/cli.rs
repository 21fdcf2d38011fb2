//! Command-line flags for the `cyberbird` binary.

use clap::Parser;

use crate::config::{GameConfig, HighScorePolicy};

/// Fly through the pipes, dodge the drones.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Forget the high score whenever a new run starts.
    #[arg(long)]
    pub reset_high_score: bool,
    /// Seed the random generator for a reproducible run.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,
}

impl Args {
    pub fn config(&self) -> GameConfig {
        GameConfig {
            high_score_policy: if self.reset_high_score {
                HighScorePolicy::Reset
            } else {
                HighScorePolicy::Keep
            },
            ..GameConfig::default()
        }
    }
}
