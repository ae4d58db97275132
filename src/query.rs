//! List query client
//!
//! Ties a remote store to a query cache. Fetches always go to the store
//! and replace the cached entry wholesale; deletes go through the
//! [`MutationExecutor`] so the cache is patched only after confirmation.

use crate::cache::QueryCache;
use crate::error::{ListSyncError, ListSyncResult};
use crate::model::{ListQueryResult, QueryKey};
use crate::mutation::{append_page, DeleteOutcome, MutationExecutor};
use crate::remote::RemoteStore;
use std::sync::Arc;
use tracing::debug;

/// Fetches list queries into a shared cache
#[derive(Clone)]
pub struct QueryClient {
    store: Arc<dyn RemoteStore>,
    cache: QueryCache,
    executor: MutationExecutor,
}

impl QueryClient {
    pub fn new(store: Arc<dyn RemoteStore>, cache: QueryCache) -> Self {
        let executor = MutationExecutor::new(Arc::clone(&store), cache.clone());
        Self {
            store,
            cache,
            executor,
        }
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn executor(&self) -> &MutationExecutor {
        &self.executor
    }

    pub fn store(&self) -> &Arc<dyn RemoteStore> {
        &self.store
    }

    /// Fetch the first page from the store and replace the cached entry
    pub async fn fetch(&self, key: &QueryKey) -> ListSyncResult<Arc<ListQueryResult>> {
        let result = self.store.list(&key.variables, None).await?;
        debug!("Fetched {} items for {}", result.len(), key);
        Ok(self.cache.write(key, result))
    }

    /// Drop the cached entry, then fetch it again
    pub async fn refetch(&self, key: &QueryKey) -> ListSyncResult<Arc<ListQueryResult>> {
        self.cache.invalidate(key);
        self.fetch(key).await
    }

    /// Fetch the page after the cached one and append it.
    ///
    /// The entry must already be cached and report a next page.
    pub async fn fetch_more(&self, key: &QueryKey) -> ListSyncResult<Arc<ListQueryResult>> {
        let current = self
            .cache
            .read(key)
            .ok_or_else(|| ListSyncError::QueryNotCached(key.to_string()))?;

        let cursor = match (&current.page_info.end_cursor, current.page_info.has_next_page) {
            (Some(cursor), true) => cursor.clone(),
            _ => return Err(ListSyncError::NoNextPage(key.to_string())),
        };

        let next = self.store.list(&key.variables, Some(&cursor)).await?;
        debug!("Fetched {} more items for {}", next.len(), key);

        // Merge into whatever is cached now; deletes may have landed meanwhile
        self.cache
            .update(key, |latest| Some(append_page(latest, next)))
            .ok_or_else(|| ListSyncError::QueryNotCached(key.to_string()))
    }

    /// Delete an item and patch the cached list for `key`
    pub async fn delete_item(&self, key: &QueryKey, id: &str) -> DeleteOutcome {
        self.executor.delete_item(key, id).await
    }
}
