//! Remote store abstraction
//!
//! The boundary the cache sits in front of. Implementations own the
//! authoritative list; listsync only ever holds copies of pages.

use crate::error::RemoteFailure;
use crate::model::{Item, ListQueryResult, ListVariables};
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Abstract remote store interface
///
/// Implemented by:
/// - `MemoryStore`: in-process, with injectable failures
/// - `FileStore`: a JSON file on disk
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetch one page of items matching `variables`, starting after the
    /// `after` cursor when given
    async fn list(
        &self,
        variables: &ListVariables,
        after: Option<&str>,
    ) -> Result<ListQueryResult, RemoteFailure>;

    /// Delete the item with this id
    async fn delete(&self, id: &str) -> Result<(), RemoteFailure>;

    /// Create an item from its fields and return it with its new id
    async fn create(&self, fields: Map<String, Value>) -> Result<Item, RemoteFailure>;

    /// Get the human-readable store name for display
    fn store_name(&self) -> &'static str;
}
