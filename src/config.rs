//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Error;
use crate::Result;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Override for the host log directory (defaults to the platform
    /// location when unset)
    #[serde(default)]
    pub log_dir: Option<PathBuf>,

    /// Default timeout for manager commands, in seconds
    #[serde(default = "default_timeout_secs")]
    pub default_timeout_secs: u64,

    /// Row cap for sqlite_query results
    #[serde(default = "default_sqlite_max_rows")]
    pub sqlite_max_rows: usize,
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_sqlite_max_rows() -> usize {
    1000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_dir: None,
            default_timeout_secs: default_timeout_secs(),
            sqlite_max_rows: default_sqlite_max_rows(),
        }
    }
}

/// Get the config directory path
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".toolsmith")
}

/// Get the config file path
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

/// Load configuration, falling back to defaults when no file exists
pub fn load() -> Result<Config> {
    let path = config_path();

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(&path)?;
    let config: Config = serde_json::from_str(&content)
        .map_err(|e| Error::Config(format!("Invalid config at {}: {}", path.display(), e)))?;
    Ok(config)
}

/// Save configuration to file
pub fn save(config: &Config) -> Result<()> {
    let path = config_path();

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, content)?;
    Ok(())
}
