//! Runtime configuration: environment variables, then command-line flags.
//!
//! # Environment Variables
//!
//! - `BLOCKS_SEED`: RNG seed (default: random per run)
//! - `BLOCKS_TICK_MS`: host loop interval in milliseconds (default: 16)
//! - `BLOCKS_LOG_PATH`: append session events as JSON lines to this file

use std::path::PathBuf;

use clap::Parser;

use crate::types::TICK_MS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub seed: Option<u32>,
    pub tick_ms: u32,
    pub log_path: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            tick_ms: TICK_MS,
            log_path: None,
        }
    }
}

impl GameConfig {
    /// Create from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary variable lookup; unparsable or empty values
    /// fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let seed = lookup("BLOCKS_SEED").and_then(|s| s.trim().parse().ok());
        let tick_ms = lookup("BLOCKS_TICK_MS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.tick_ms);
        let log_path = lookup("BLOCKS_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        Self {
            seed,
            tick_ms: tick_ms.max(1),
            log_path,
        }
    }

    /// Flags given on the command line win over the environment.
    pub fn with_args(mut self, args: Args) -> Self {
        if args.seed.is_some() {
            self.seed = args.seed;
        }
        if let Some(tick_ms) = args.tick_ms {
            self.tick_ms = tick_ms.max(1);
        }
        if args.log.is_some() {
            self.log_path = args.log;
        }
        self
    }

    /// The configured seed, or a fresh one from OS entropy.
    pub fn resolve_seed(&self) -> u32 {
        self.seed.unwrap_or_else(rand::random)
    }
}

/// Falling-block puzzle for the terminal.
#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Seed for the piece generator; the same seed deals the same pieces.
    #[arg(short, long)]
    pub seed: Option<u32>,

    /// Milliseconds between loop iterations.
    #[arg(long)]
    pub tick_ms: Option<u32>,

    /// Append session events as JSON lines to this file.
    #[arg(long)]
    pub log: Option<PathBuf>,
}
