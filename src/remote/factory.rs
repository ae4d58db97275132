//! Store factory
//!
//! Picks the remote store implementation named in the configuration.

use crate::config::{Config, ConfigManager};
use crate::remote::file::FileStore;
use crate::remote::memory::MemoryStore;
use crate::remote::store::RemoteStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Configured store backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// JSON file on disk
    #[default]
    File,
    /// Process memory; starts empty every run
    Memory,
}

impl StoreKind {
    /// Get a human-readable backend name
    pub fn name(&self) -> &'static str {
        match self {
            StoreKind::File => "file",
            StoreKind::Memory => "memory",
        }
    }
}

/// Create the remote store described by `config`
///
/// A file store without an explicit path uses the state directory.
pub fn create_store(config: &Config) -> Arc<dyn RemoteStore> {
    match config.store.kind {
        StoreKind::File => {
            let path = config
                .store
                .path
                .clone()
                .unwrap_or_else(ConfigManager::default_store_path);
            Arc::new(FileStore::new(path))
        }
        StoreKind::Memory => Arc::new(MemoryStore::new()),
    }
}
