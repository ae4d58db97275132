//! Mutation executor
//!
//! Sends deletes to the remote store and patches the cached list only once
//! the store has confirmed. A failed delete leaves the cache untouched, so
//! the item stays visible.

use crate::cache::QueryCache;
use crate::error::RemoteFailure;
use crate::model::{ListQueryResult, QueryKey};
use crate::mutation::patch::apply_delete_patch;
use crate::remote::RemoteStore;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Settled result of a delete
#[derive(Debug, Clone)]
pub enum DeleteOutcome {
    /// Remote delete succeeded and the cached list was patched
    Success(Arc<ListQueryResult>),
    /// Remote delete succeeded but there was nothing cached to patch
    NoOp,
    /// Remote delete failed; the cache was not touched
    Failure(RemoteFailure),
}

impl DeleteOutcome {
    /// Whether the remote store accepted the delete
    pub fn is_confirmed(&self) -> bool {
        !matches!(self, DeleteOutcome::Failure(_))
    }

    /// The remote failure, if any
    pub fn failure(&self) -> Option<&RemoteFailure> {
        match self {
            DeleteOutcome::Failure(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Runs mutations against the remote store and keeps the cache in step
///
/// Imposes no exclusion of its own: concurrent deletes of different ids run
/// independently and each patch only removes its own id.
#[derive(Clone)]
pub struct MutationExecutor {
    store: Arc<dyn RemoteStore>,
    cache: QueryCache,
}

impl MutationExecutor {
    pub fn new(store: Arc<dyn RemoteStore>, cache: QueryCache) -> Self {
        Self { store, cache }
    }

    /// The cache this executor patches
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Delete `id` remotely, then drop it from the list cached under `key`
    pub async fn delete_item(&self, key: &QueryKey, id: &str) -> DeleteOutcome {
        debug!("Deleting {} via {} store", id, self.store.store_name());

        if let Err(failure) = self.store.delete(id).await {
            warn!("Delete of {} failed: {}", id, failure);
            return DeleteOutcome::Failure(failure);
        }

        // Patch whatever is cached now, not what was cached when the
        // request went out
        let patched = self
            .cache
            .update(key, |current| apply_delete_patch(current, id).into_patched());

        match patched {
            Some(list) => {
                info!("Deleted {}; {} now holds {} items", id, key, list.len());
                DeleteOutcome::Success(list)
            }
            None => {
                debug!("Deleted {}; nothing cached to patch under {}", id, key);
                DeleteOutcome::NoOp
            }
        }
    }
}
