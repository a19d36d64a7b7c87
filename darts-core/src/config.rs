//! Set configuration: defaults, an optional JSON file and environment
//! overrides.

use crate::{DEFAULT_GAME_TYPE, DEFAULT_MAX_LEGS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ENV_PLAYER1: &str = "DARTS_PLAYER1";
pub const ENV_PLAYER2: &str = "DARTS_PLAYER2";
pub const ENV_GAME_TYPE: &str = "DARTS_GAME_TYPE";
pub const ENV_MAX_LEGS: &str = "DARTS_MAX_LEGS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{name} must be a whole number, got {value:?}")]
    InvalidEnv { name: &'static str, value: String },
}

/// Parameters for starting a set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetConfig {
    pub player1: String,
    pub player2: String,
    pub game_type: u32,
    pub max_legs: u32,
}

impl Default for SetConfig {
    fn default() -> Self {
        Self {
            player1: "Player 1".to_string(),
            player2: "Player 2".to_string(),
            game_type: DEFAULT_GAME_TYPE,
            max_legs: DEFAULT_MAX_LEGS,
        }
    }
}

impl SetConfig {
    /// Read a JSON config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Defaults, then the file if given, then `DARTS_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from a variable lookup, such as the process environment.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        if let Some(name) = lookup(ENV_PLAYER1) {
            self.player1 = name;
        }
        if let Some(name) = lookup(ENV_PLAYER2) {
            self.player2 = name;
        }
        if let Some(value) = lookup(ENV_GAME_TYPE) {
            self.game_type = parse_number(ENV_GAME_TYPE, value)?;
        }
        if let Some(value) = lookup(ENV_MAX_LEGS) {
            self.max_legs = parse_number(ENV_MAX_LEGS, value)?;
        }
        Ok(self)
    }
}

fn parse_number(name: &'static str, value: String) -> Result<u32, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { name, value })
}
