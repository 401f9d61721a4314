//! Application configuration.

use crate::consts::dashboard_consts::refresh::{PRELOAD_GATE_SECS, REFRESH_INTERVAL_MS};
use crate::consts::dashboard_consts::storage::{CONFIG_FILE_NAME, DATA_DIR_NAME};
use crate::layout::Theme;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use std::{fs, path::Path};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Overrides the public market API root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    pub refresh_interval_ms: u64,
    pub preload_secs: u64,
    pub theme: Theme,
    /// Where the layout and logs live. Defaults to `~/.crypto-dashboard`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Where the TUI writes and reads `dashboard-layout.json`. Defaults to the working directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            refresh_interval_ms: REFRESH_INTERVAL_MS,
            preload_secs: PRELOAD_GATE_SECS,
            theme: Theme::default(),
            data_dir: None,
            export_dir: None,
        }
    }
}

impl Config {
    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Like [`Config::load_from_file`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, std::io::Error> {
        if !path.exists() {
            return Ok(Config::default());
        }
        Self::load_from_file(path)
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        // A zero period would make tokio's interval panic
        Duration::from_millis(self.refresh_interval_ms.max(1))
    }

    pub fn preload_gate(&self) -> Duration {
        Duration::from_secs(self.preload_secs)
    }

    /// Resolved data directory: the configured one, else `~/.crypto-dashboard`.
    pub fn data_dir(&self) -> Result<PathBuf, std::io::Error> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir(),
        }
    }

    /// Resolved export directory: the configured one, else the working directory.
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

fn default_data_dir() -> Result<PathBuf, std::io::Error> {
    let home_path = home::home_dir().ok_or(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "Home directory not found",
    ))?;
    Ok(home_path.join(DATA_DIR_NAME))
}

/// Path of the config file, `~/.crypto-dashboard/config.json`.
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    Ok(default_data_dir()?.join(CONFIG_FILE_NAME))
}
