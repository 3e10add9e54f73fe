// Configuration for the tasktracker CLI
//
// Stored as YAML in `<config_dir>/tasktracker/config.yaml`. Every key is
// optional; a missing file means all defaults.

use eyre::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_DIR: &str = "tasktracker";
const CONFIG_FILE_NAME: &str = "config.yaml";
const DATA_FILE_NAME: &str = "tasks.json";
const EXPORT_FILE_NAME: &str = "tasks.csv";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON file holding the task list
    pub data_file: PathBuf,
    /// Default target of `export` when no path is given
    pub export_file: PathBuf,
    /// Colorize terminal output
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            export_file: PathBuf::from(EXPORT_FILE_NAME),
            color: true,
        }
    }
}

impl Config {
    /// Load from the default location
    pub fn load() -> Result<Self> {
        match default_config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`, falling back to defaults if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(file = ?path, "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).wrap_err_with(|| format!("Failed to read config {}", path.display()))?;
        let config: Self =
            serde_yaml::from_str(&content).wrap_err_with(|| format!("Invalid config file {}", path.display()))?;

        debug!(file = ?path, ?config, "Loaded config");
        Ok(config)
    }
}

/// `<config_dir>/tasktracker/config.yaml`, if the platform has a config dir
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join(CONFIG_FILE_NAME))
}

/// `<data_dir>/tasktracker/tasks.json`, or `tasks.json` in the working directory
pub fn default_data_file() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR).join(DATA_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(DATA_FILE_NAME))
}
