//! Configuration and state locations
//!
//! | What | Where |
//! |------|-------|
//! | config | `<config dir>/listsync/config.toml` or `--config` |
//! | file store | `<state dir>/listsync/items.json` unless `store.path` is set |
//! | audit log | `<state dir>/listsync/audit.log` |
//!
//! The state dir falls back to the local data dir on platforms without one.

pub mod schema;

pub use schema::Config;

use crate::error::{ListSyncError, ListSyncResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

const APP_DIR: &str = "listsync";

/// Loads and saves the TOML config file
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_path(Self::default_config_path())
    }

    pub fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.toml")
    }

    pub fn state_dir() -> PathBuf {
        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }

    pub fn default_store_path() -> PathBuf {
        Self::state_dir().join("items.json")
    }

    pub fn audit_log_path() -> PathBuf {
        Self::state_dir().join("audit.log")
    }

    /// The config at this manager's path; defaults when the file is absent
    pub async fn load(&self) -> ListSyncResult<Config> {
        if fs::try_exists(&self.config_path).await.unwrap_or(false) {
            self.load_from_file(&self.config_path).await
        } else {
            debug!("No config at {}, using defaults", self.config_path.display());
            Ok(Config::default())
        }
    }

    /// Parse a config file. Parse errors name the file.
    pub async fn load_from_file(&self, path: &Path) -> ListSyncResult<Config> {
        let text = fs::read_to_string(path)
            .await
            .map_err(|e| ListSyncError::io(format!("reading {}", path.display()), e))?;

        let invalid = |reason: String| ListSyncError::ConfigInvalid {
            path: path.to_path_buf(),
            reason,
        };
        let config: Config = toml::from_str(&text).map_err(|e| invalid(e.to_string()))?;
        config.validate().map_err(invalid)?;
        Ok(config)
    }

    pub async fn save(&self, config: &Config) -> ListSyncResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| ListSyncError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let text = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, text).await.map_err(|e| {
            ListSyncError::io(format!("writing {}", self.config_path.display()), e)
        })?;

        info!("Saved config to {}", self.config_path.display());
        Ok(())
    }

    /// Create the state directory used by the file store and audit log
    pub async fn ensure_state_dirs() -> ListSyncResult<()> {
        let dir = Self::state_dir();
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| ListSyncError::io(format!("creating {}", dir.display()), e))
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
