//! Bellman configuration
//!
//! Layered: built-in defaults, then an optional TOML file, then
//! `BELLMAN_`-prefixed environment variables.

use anyhow::{ensure, Context, Result};
use chime_alarms::DEFAULT_TICK_SECS;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file, looked up in the working directory
const DEFAULT_CONFIG_FILE: &str = "bellman.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Reconciliation period in seconds
    #[serde(default = "default_tick_secs")]
    pub tick_secs: u64,

    /// Readline history file (history disabled when unset)
    #[serde(default)]
    pub history_file: Option<PathBuf>,
}

fn default_tick_secs() -> u64 {
    DEFAULT_TICK_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_secs: DEFAULT_TICK_SECS,
            history_file: None,
        }
    }
}

impl Config {
    /// Load configuration; an explicitly named file must exist
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let figment = Figment::from(Serialized::defaults(Config::default()));
        let figment = match path {
            Some(path) => figment.merge(Toml::file_exact(path)),
            None => figment.merge(Toml::file(DEFAULT_CONFIG_FILE)),
        };

        let config: Config = figment
            .merge(Env::prefixed("BELLMAN_"))
            .extract()
            .context("Failed to load configuration")?;

        ensure!(config.tick_secs > 0, "tick_secs must be positive");
        Ok(config)
    }
}
