//! JSON file remote store
//!
//! The whole record set lives in one JSON file. Every request reads the
//! file, and mutations write it back through a temp file and rename so a
//! crash never leaves a half-written store.

use crate::error::RemoteFailure;
use crate::model::{Item, ListQueryResult, ListVariables};
use crate::remote::records::Records;
use crate::remote::store::RemoteStore;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

/// Remote store backed by a JSON file
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Records, RemoteFailure> {
        if !self.path.exists() {
            debug!("Store file {} missing, starting empty", self.path.display());
            return Ok(Records::default());
        }

        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            RemoteFailure::unavailable(format!("reading {}: {}", self.path.display(), e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            RemoteFailure::unavailable(format!("store file {} is corrupt: {}", self.path.display(), e))
        })
    }

    async fn save(&self, records: &Records) -> Result<(), RemoteFailure> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                RemoteFailure::unavailable(format!("creating {}: {}", parent.display(), e))
            })?;
        }

        let content = serde_json::to_string_pretty(records)
            .map_err(|e| RemoteFailure::rejected(format!("encoding store: {e}")))?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content).await.map_err(|e| {
            RemoteFailure::unavailable(format!("writing {}: {}", tmp.display(), e))
        })?;
        fs::rename(&tmp, &self.path).await.map_err(|e| {
            RemoteFailure::unavailable(format!("replacing {}: {}", self.path.display(), e))
        })?;

        Ok(())
    }
}

#[async_trait]
impl RemoteStore for FileStore {
    async fn list(
        &self,
        variables: &ListVariables,
        after: Option<&str>,
    ) -> Result<ListQueryResult, RemoteFailure> {
        let _guard = self.lock.lock().await;
        self.load().await?.page(variables, after)
    }

    async fn delete(&self, id: &str) -> Result<(), RemoteFailure> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        records.remove(id)?;
        self.save(&records).await?;
        debug!("Deleted {} from {}", id, self.path.display());
        Ok(())
    }

    async fn create(&self, fields: Map<String, Value>) -> Result<Item, RemoteFailure> {
        let _guard = self.lock.lock().await;
        let mut records = self.load().await?;
        let item = records.create(fields);
        self.save(&records).await?;
        debug!("Created {} in {}", item.id, self.path.display());
        Ok(item)
    }

    fn store_name(&self) -> &'static str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RemoteFailureKind;
    use tempfile::TempDir;

    fn named(name: &str) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("name".into(), Value::String(name.into()));
        fields
    }

    #[tokio::test]
    async fn missing_file_lists_empty() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join("items.json"));

        let page = store.list(&ListVariables::default(), None).await.unwrap();
        assert!(page.is_empty());
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn create_delete_persist() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("items.json");
        let store = FileStore::new(path.clone());

        let gold = store.create(named("Gold")).await.unwrap();
        let silver = store.create(named("Silver")).await.unwrap();
        store.delete(&gold.id).await.unwrap();

        let reopened = FileStore::new(path);
        let page = reopened.list(&ListVariables::default(), None).await.unwrap();
        assert_eq!(page.ids(), vec![silver.id.as_str()]);
    }

    #[tokio::test]
    async fn delete_unknown_is_not_found() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join("items.json"));

        let err = store.delete("nope").await.unwrap_err();
        assert_eq!(err.kind, RemoteFailureKind::NotFound);
    }

    #[tokio::test]
    async fn corrupt_file_is_unavailable() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("items.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let store = FileStore::new(path);
        let err = store.list(&ListVariables::default(), None).await.unwrap_err();
        assert_eq!(err.kind, RemoteFailureKind::Unavailable);
        assert!(err.message.contains("corrupt"));
    }

    #[tokio::test]
    async fn concurrent_deletes_all_land() {
        let temp = TempDir::new().unwrap();
        let store = FileStore::new(temp.path().join("items.json"));

        let mut ids = Vec::new();
        for name in ["A", "B", "C", "D"] {
            ids.push(store.create(named(name)).await.unwrap().id);
        }

        let results =
            futures_util::future::join_all(ids[..3].iter().map(|id| store.delete(id))).await;
        assert!(results.iter().all(Result::is_ok));

        let page = store.list(&ListVariables::default(), None).await.unwrap();
        assert_eq!(page.ids(), vec![ids[3].as_str()]);
    }
}
