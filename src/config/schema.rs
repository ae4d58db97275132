//! Configuration schema for listsync
//!
//! Configuration is stored at `~/.config/listsync/config.toml`

use crate::model::DEFAULT_PAGE_SIZE;
use crate::remote::StoreKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Remote store settings
    pub store: StoreConfig,

    /// List query defaults
    pub list: ListConfig,

    /// Transient notice settings
    pub notice: NoticeConfig,
}

impl Config {
    /// Check values the TOML types alone do not constrain
    pub fn validate(&self) -> Result<(), String> {
        if self.list.page_size == 0 {
            return Err("list.page_size must be at least 1".to_string());
        }
        if self.list.query_name.is_empty() {
            return Err("list.query_name must not be empty".to_string());
        }
        Ok(())
    }
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,

    /// Record mutations in the audit log
    pub audit_log: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            audit_log: true,
        }
    }
}

/// Remote store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Backend to use
    pub kind: StoreKind,

    /// JSON file for the file backend (defaults to the state directory)
    pub path: Option<PathBuf>,
}

/// List query defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Query name used in cache keys
    pub query_name: String,

    /// Items per page
    pub page_size: u32,

    /// Filter applied when none is given on the command line
    pub filter: Option<String>,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            query_name: "itemList".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            filter: None,
        }
    }
}

/// Transient notice configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NoticeConfig {
    /// How long a notice stays visible, in milliseconds
    pub duration_ms: u64,
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self { duration_ms: 3000 }
    }
}
