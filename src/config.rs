//! Command-line and environment configuration.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use crate::types::{PieceKind, AUTO_REPEAT_MS, COUNTDOWN_SECS};

/// Terminal falling-block puzzle.
#[derive(Debug, Clone, Parser)]
#[command(name = "blockfall", version, about)]
pub struct Config {
    /// RNG seed for the piece sequence (random when omitted)
    #[arg(long, env = "BLOCKFALL_SEED")]
    pub seed: Option<u32>,

    /// Seconds counted down before the first piece spawns
    #[arg(long, env = "BLOCKFALL_COUNTDOWN", default_value_t = COUNTDOWN_SECS)]
    pub countdown: u32,

    /// Write tracing output to this file (no logging when omitted)
    #[arg(long, env = "BLOCKFALL_LOG")]
    pub log_file: Option<PathBuf>,

    /// Interval between repeated moves while Left/Right is held
    #[arg(long, env = "BLOCKFALL_REPEAT_MS", default_value_t = AUTO_REPEAT_MS)]
    pub repeat_ms: u32,

    /// Kind of the first piece (I, O, T, S, Z, J or L)
    #[arg(long)]
    pub first_piece: Option<PieceKind>,
}

impl Config {
    /// The configured seed, or one derived from the wall clock.
    pub fn resolved_seed(&self) -> u32 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
                .unwrap_or(1)
        })
    }

    pub fn countdown_ms(&self) -> u32 {
        self.countdown.saturating_mul(1000)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            countdown: COUNTDOWN_SECS,
            log_file: None,
            repeat_ms: AUTO_REPEAT_MS,
            first_piece: None,
        }
    }
}
