//! CLI argument parsing for trivian

use clap::Parser;
use std::path::PathBuf;

/// Runs the ritual protocol: opening invocation, oracle draw, closing
#[derive(Parser, Debug)]
#[command(name = "tl")]
#[command(author, version, about = "Trivian lattice ritual console", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to the sutra document (overrides config)
    #[arg(short, long)]
    pub document: Option<PathBuf>,

    /// Seed for the oracle draw (overrides config)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip presentational pauses
    #[arg(long)]
    pub no_pacing: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
