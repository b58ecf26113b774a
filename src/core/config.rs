//! User configuration, read from `<config dir>/git-file-state/config.json`.
//!
//! Every field has a default, so a missing file or a partial file is fine.

use crate::core::dirs::get_config_directory;
use crate::core::error::{GitStateError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct StatusConfig {
    /// Seconds after which a snapshot is due for a refresh. Read by library callers that
    /// keep a [`StatusTable`](crate::core::table::StatusTable) alive and poll
    /// [`stale_paths`](crate::core::table::StatusTable::stale_paths); the one-shot CLI
    /// refreshes every path it reports and ignores it.
    pub stale_after_secs: u64,
    /// Colorize CLI output
    pub color: bool,
    /// Report tracked files as lockable (LFS locking enabled for the project)
    pub lfs_locking: bool,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            stale_after_secs: 300,
            color: true,
            lfs_locking: false,
        }
    }
}

impl StatusConfig {
    /// Load from the user config directory. A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        let config_file = get_config_directory()?.join("config.json");
        Self::load_from(&config_file)
    }

    /// Like [`StatusConfig::load`], but falls back to the defaults on any error.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            log::warn!("Using default configuration: {e}");
            Self::default()
        })
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config file at {}", path.display());
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| GitStateError::config_read_failed(path, e))?;
        serde_json::from_str(&content).map_err(|e| GitStateError::config_parse_failed(path, e))
    }

    pub fn stale_after(&self) -> chrono::Duration {
        i64::try_from(self.stale_after_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .unwrap_or(chrono::Duration::MAX)
    }
}
