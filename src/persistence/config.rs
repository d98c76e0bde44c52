use super::files::read_file;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// User settings read from config.json in the data directory.
/// Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Redraw interval for running timers
    pub tick_ms: u64,
    /// Default tracing filter when CHECKLIST_LOG is unset
    pub log_level: String,
    /// Database file name, relative to the data directory
    pub db_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_ms: 250,
            log_level: "info".to_string(),
            db_file: "checklist.db".to_string(),
        }
    }
}

impl Config {
    pub fn tick_duration(&self) -> Duration {
        Duration::from_millis(self.tick_ms.max(10))
    }
}

/// Load config.json, falling back to defaults when it does not exist
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let content = read_file(path)?;
    if content.trim().is_empty() {
        return Ok(Config::default());
    }

    serde_json::from_str(&content).with_context(|| format!("Invalid config file: {}", path.display()))
}
