//! Punter configuration.
//!
//! Loaded from `<home>/config.toml`. Every key is optional; a missing file
//! means the defaults below.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Punter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Credits a new or reset session starts with.
    pub initial_stake: u64,

    /// Wager amount selected at the start of a session and after a reset.
    pub default_wager: u64,

    /// How much `more`/`less` move the wager amount.
    pub wager_step: u64,

    /// Quick-pick wager amounts.
    pub presets: Vec<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_stake: 1000,
            default_wager: 10,
            wager_step: 10,
            presets: vec![10, 50, 100, 500],
        }
    }
}

impl Config {
    /// Load config from `<home>/config.toml`, falling back to defaults
    /// when the file does not exist.
    pub fn load(home: &Path) -> Result<Self, String> {
        let path = Self::path(home);

        let contents = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        Self::parse(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// Parse and validate config text.
    pub fn parse(contents: &str) -> Result<Self, String> {
        let config: Self = toml::from_str(contents).map_err(|e| e.to_string())?;

        if config.initial_stake == 0 {
            return Err("initial-stake must be greater than zero".to_string());
        }
        if config.default_wager == 0 {
            return Err("default-wager must be greater than zero".to_string());
        }
        if config.wager_step == 0 {
            return Err("wager-step must be greater than zero".to_string());
        }
        if config.presets.contains(&0) {
            return Err("presets must all be greater than zero".to_string());
        }

        Ok(config)
    }

    /// The config file path: `<home>/config.toml`.
    pub fn path(home: &Path) -> PathBuf {
        home.join("config.toml")
    }
}
