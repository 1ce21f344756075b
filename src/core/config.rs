use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ProcwatchError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seconds between periodic refreshes
    pub refresh_interval_secs: u64,
    /// Start with periodic refresh already on
    pub auto_refresh: bool,
    /// Characters of the process name shown in the table
    pub name_width: usize,
    /// How long the UI waits for input before redrawing
    pub ui_tick_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 5,
            auto_refresh: false,
            name_width: 30,
            ui_tick_ms: 100,
        }
    }
}

impl Config {
    /// Load the user config, falling back to defaults when there is none
    pub fn load() -> Result<Self> {
        match Self::get_config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                log::warn!("Could not determine config directory, using defaults");
                Ok(Config::default())
            }
        }
    }

    /// Load config from a specific file.
    ///
    /// A missing, empty, unreadable or unparsable file yields the defaults.
    /// Values that parse but make no sense are an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config = if !path.exists() {
            Config::default()
        } else {
            match fs::read_to_string(path) {
                Ok(data) if data.trim().is_empty() => Config::default(),
                Ok(data) => serde_json::from_str(&data).unwrap_or_else(|e| {
                    log::warn!("Ignoring unparsable config file {:?}: {}", path, e);
                    Config::default()
                }),
                Err(e) => {
                    log::warn!("Could not read config file {:?}: {}", path, e);
                    Config::default()
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.refresh_interval_secs == 0 {
            return Err(ProcwatchError::config(
                "refresh_interval_secs must be at least 1",
            ));
        }
        if self.name_width == 0 {
            return Err(ProcwatchError::config("name_width must be at least 1"));
        }
        if self.ui_tick_ms == 0 {
            return Err(ProcwatchError::config("ui_tick_ms must be at least 1"));
        }
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn ui_tick(&self) -> Duration {
        Duration::from_millis(self.ui_tick_ms)
    }

    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("procwatch").join("config.json"))
    }
}
