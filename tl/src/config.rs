//! Trivian configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::pacing::SleepPacer;

/// Main trivian configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the sutra document
    pub document: PathBuf,

    /// Intention spoken when the ritual opens
    pub intention: String,

    /// Pada invoked when the ritual opens (null to skip)
    #[serde(rename = "opening-section")]
    pub opening_section: Option<i64>,

    /// Sutra contemplated after the oracle draw
    pub contemplate: Option<String>,

    /// Fixed seed for the oracle draw
    pub seed: Option<u64>,

    /// Presentational pauses
    pub pacing: PacingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            document: PathBuf::from(crate::DEFAULT_DOCUMENT),
            intention: "To see clearly and align with coherence".to_string(),
            opening_section: Some(crate::DEFAULT_OPENING_SECTION),
            contemplate: None,
            seed: None,
            pacing: PacingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .trivian.yml
        let local_config = PathBuf::from(".trivian.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/trivian/trivian.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("trivian").join("trivian.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Presentational pause configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Whether to pause at all
    pub enabled: bool,

    /// Pause before the oracle reveals its draw
    #[serde(rename = "tuning-ms")]
    pub tuning_ms: u64,

    /// Pause after the ritual opens
    #[serde(rename = "breath-ms")]
    pub breath_ms: u64,

    /// Pause after the ritual closes
    #[serde(rename = "closing-ms")]
    pub closing_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tuning_ms: 1500,
            breath_ms: 4000,
            closing_ms: 2000,
        }
    }
}

impl PacingConfig {
    /// Sleep pacer for these durations
    pub fn sleep_pacer(&self) -> SleepPacer {
        SleepPacer {
            tuning: Duration::from_millis(self.tuning_ms),
            breath: Duration::from_millis(self.breath_ms),
            closing: Duration::from_millis(self.closing_ms),
        }
    }
}
