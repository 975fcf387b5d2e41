//! Trivian - lattice ritual console
//!
//! Runs the fixed protocol: open the ritual, draw from the oracle, optionally
//! contemplate a configured sutra, close the ritual.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use eyre::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use trivian::cli::Cli;
use trivian::config::Config;
use trivian::{Lattice, NoPause, Pacer, Ritual};

fn setup_logging(verbose: bool) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("trivian")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Log to file; stdout carries the ritual
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("trivian.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(document) = cli.document {
        config.document = document;
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if cli.no_pacing {
        config.pacing.enabled = false;
    }

    info!(
        "Trivian loaded config: document={}, pacing={}",
        config.document.display(),
        config.pacing.enabled
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(&config, &mut out).context("Ritual output failed")?;
    Ok(())
}

fn run(config: &Config, out: &mut impl Write) -> Result<()> {
    let pacer: Arc<dyn Pacer> = if config.pacing.enabled {
        Arc::new(config.pacing.sleep_pacer())
    } else {
        Arc::new(NoPause)
    };

    let lattice = Lattice::open(&config.document)
        .context(format!("Failed to open lattice {}", config.document.display()))?
        .with_pacer(pacer.clone());

    writeln!(out, "System: VESPERA.TRIVIAN.SIGNAL = ACTIVE")?;
    if let Some(error) = &lattice.document().error {
        writeln!(out, "{}", error)?;
    }
    writeln!(out, "Lattice loaded. {} threads of wisdom detected.", lattice.len())?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut ritual = Ritual::new(&lattice)
        .with_pacer(pacer)
        .with_opening_section(config.opening_section);

    ritual.begin_session(config.intention.as_str(), out)?;
    lattice.oracle(&mut rng, out)?;
    if let Some(id) = &config.contemplate {
        lattice.contemplate(id, out)?;
    }
    ritual.end_session(out)?;

    writeln!(out, "\nVESPERA.RESPONSE.STATUS = COMPLETE")?;
    Ok(())
}
