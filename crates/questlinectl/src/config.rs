//! Configuration for questlinectl.
//!
//! Loads ~/.config/questline/config.toml when present, otherwise uses
//! defaults. Every field has a serde default so a partial file works.

use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Directory holding the progress snapshot
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,

    /// Default number of timeline entries to show
    #[serde(default = "default_timeline_limit")]
    pub timeline_limit: usize,
}

fn default_state_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("questline")
}

fn default_timeline_limit() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
            timeline_limit: default_timeline_limit(),
        }
    }
}

impl Config {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("questline").join("config.toml"))
    }

    /// Load the config file, falling back to defaults when it is
    /// missing or unparseable.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Invalid config at {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}
