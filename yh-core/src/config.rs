//! Configuration schema for the decision engine, game harness and event logging.
//!
//! Every section and key is optional in YAML; omitted values take the defaults below.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Monte Carlo simulation settings.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Game harness settings.
    #[serde(default)]
    pub game: GameConfig,
    /// NDJSON event logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Monte Carlo simulation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationConfig {
    /// Trials per simulated reroll mask.
    #[serde(default = "default_trials")]
    pub trials: u32,
    /// Run trials on the rayon pool.
    #[serde(default)]
    pub parallel: bool,
    /// Trials per parallel work item. Each chunk owns its own seeded RNG.
    #[serde(default = "default_chunk_trials")]
    pub chunk_trials: u32,
}

fn default_trials() -> u32 {
    75
}

fn default_chunk_trials() -> u32 {
    64
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials: default_trials(),
            parallel: false,
            chunk_trials: default_chunk_trials(),
        }
    }
}

/// Game harness configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GameConfig {
    /// Base seed for dice and simulation RNGs.
    #[serde(default)]
    pub seed: u64,
    /// Names of the bot players seated at the table, in turn order.
    #[serde(default = "default_players")]
    pub players: Vec<String>,
}

fn default_players() -> Vec<String> {
    vec!["Monte".to_string()]
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            players: default_players(),
        }
    }
}

/// Event logging configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// If set, append one NDJSON event per turn decision to this file.
    #[serde(default)]
    pub decisions_path: Option<String>,
    /// Flush the event writer every N lines (0 = only on drop/explicit flush).
    #[serde(default)]
    pub flush_every_lines: u64,
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.chunk_trials == 0 {
            return Err(ConfigError::Invalid("simulation.chunk_trials must be > 0"));
        }
        if self.game.players.is_empty() {
            return Err(ConfigError::Invalid("game.players must name at least one player"));
        }
        Ok(())
    }
}
