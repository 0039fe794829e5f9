// ==========================================
// Maintenance KPI Engine - Configuration
// ==========================================
// Collaborator-facing knobs. A missing or unreadable config file falls
// back to defaults with a warning, never an error.
// ==========================================

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Nominal refresh interval of the data source (the sheet cache TTL).
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seconds between data-source refreshes.
    pub refresh_interval_secs: u64,
    /// Local CSV export to load when no remote connector is wired in.
    pub source_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            source_path: None,
        }
    }
}

impl Config {
    /// Load from a JSON file, falling back to defaults on any problem.
    pub fn load(path: &Path) -> Config {
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => config,
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "config parse failed, using defaults");
                    Config::default()
                }
            },
            Err(err) => {
                warn!(path = %path.display(), error = %err, "config read failed, using defaults");
                Config::default()
            }
        }
    }
}
