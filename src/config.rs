//! Configuration loading for the explorer and the mock server

use crate::error::{LabyError, Result};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_ADDRESS: &str = "localhost:8778";

/// Main configuration structure
#[derive(Clone, Debug, Default, Deserialize)]
pub struct LabyConfig {
    #[serde(default)]
    pub connection: ConnectionConfig,
    #[serde(default)]
    pub exploration: ExplorationConfig,
    #[serde(default)]
    pub mock: MockConfig,
}

/// Where the player connects and under which name
#[derive(Clone, Debug, Deserialize)]
pub struct ConnectionConfig {
    /// Game server address (default: localhost:8778)
    #[serde(default = "default_address")]
    pub address: String,

    /// Name announced when subscribing (default: rusty_player)
    #[serde(default = "default_player_name")]
    pub player_name: String,
}

/// Exploration tuning
#[derive(Clone, Debug, Deserialize)]
pub struct ExplorationConfig {
    /// Restart from the start cell when the route from the current cell is
    /// longer than the route from start by more than this many cells
    /// (default: 1)
    #[serde(default = "default_reset_margin")]
    pub reset_margin: usize,

    /// Log progress every time this many more cells are explored
    /// (default: 100)
    #[serde(default = "default_progress_interval")]
    pub progress_interval: usize,
}

/// Offline game served by `laby-mock-server`
#[derive(Clone, Debug, Deserialize)]
pub struct MockConfig {
    /// Address the mock server listens on (default: localhost:8778)
    #[serde(default = "default_address")]
    pub bind_address: String,

    #[serde(default = "default_mock_size")]
    pub columns: i32,

    #[serde(default = "default_mock_size")]
    pub rows: i32,

    /// Seed of the generated labyrinth (default: 42)
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Session ends after this many commands even if not won (default: 100000)
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,
}

fn default_address() -> String {
    DEFAULT_ADDRESS.to_string()
}

fn default_player_name() -> String {
    "rusty_player".to_string()
}

fn default_reset_margin() -> usize {
    1
}

fn default_progress_interval() -> usize {
    100
}

fn default_mock_size() -> i32 {
    16
}

fn default_seed() -> u64 {
    42
}

fn default_max_ticks() -> u64 {
    100_000
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            player_name: default_player_name(),
        }
    }
}

impl Default for ExplorationConfig {
    fn default() -> Self {
        Self {
            reset_margin: default_reset_margin(),
            progress_interval: default_progress_interval(),
        }
    }
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            bind_address: default_address(),
            columns: default_mock_size(),
            rows: default_mock_size(),
            seed: default_seed(),
            max_ticks: default_max_ticks(),
        }
    }
}

impl LabyConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| LabyError::Config(format!("Failed to read {:?}: {}", path, e)))?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: LabyConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.exploration.progress_interval == 0 {
            return Err(LabyError::Config(
                "exploration.progress_interval must be positive".to_string(),
            ));
        }
        if self.mock.columns <= 0 || self.mock.rows <= 0 {
            return Err(LabyError::Config(format!(
                "mock labyrinth of {}x{} cells",
                self.mock.columns, self.mock.rows
            )));
        }
        Ok(())
    }

    /// Loads `path` when given, otherwise `laby.toml` if present, otherwise
    /// the defaults.
    pub fn from_args(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => Self::load(Path::new(path)),
            None if Path::new("laby.toml").exists() => Self::load(Path::new("laby.toml")),
            None => Ok(Self::default()),
        }
    }
}
