//! In-process remote store
//!
//! Holds records in memory. Failures and delays can be injected per item,
//! which is how the executor and view are exercised against a store that
//! rejects or lags.

use crate::error::RemoteFailure;
use crate::model::{Item, ListQueryResult, ListVariables};
use crate::remote::records::Records;
use crate::remote::store::RemoteStore;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::debug;

/// Remote store backed by process memory
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Records>,
    delete_failures: Mutex<HashMap<String, RemoteFailure>>,
    delete_delays: Mutex<HashMap<String, Duration>>,
    unavailable: Mutex<Option<String>>,
    delete_calls: AtomicUsize,
    list_calls: AtomicUsize,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding these items, in order
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        Self {
            records: Mutex::new(Records::from_items(items)),
            ..Self::default()
        }
    }

    /// Make every delete of `id` fail with `failure`
    pub fn fail_delete(&self, id: impl Into<String>, failure: RemoteFailure) {
        self.delete_failures.lock().insert(id.into(), failure);
    }

    /// Stop failing deletes of `id`
    pub fn clear_failure(&self, id: &str) {
        self.delete_failures.lock().remove(id);
    }

    /// Hold deletes of `id` for `delay` before completing them
    pub fn delay_delete(&self, id: impl Into<String>, delay: Duration) {
        self.delete_delays.lock().insert(id.into(), delay);
    }

    /// Make every request fail as if the store were unreachable
    pub fn set_unavailable(&self, reason: Option<String>) {
        *self.unavailable.lock() = reason;
    }

    /// Ids currently stored, in order
    pub fn ids(&self) -> Vec<String> {
        self.records
            .lock()
            .records
            .iter()
            .map(|record| record.item.id.clone())
            .collect()
    }

    /// Number of delete requests received
    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    /// Number of list requests received
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), RemoteFailure> {
        match self.unavailable.lock().as_ref() {
            Some(reason) => Err(RemoteFailure::unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn list(
        &self,
        variables: &ListVariables,
        after: Option<&str>,
    ) -> Result<ListQueryResult, RemoteFailure> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        self.records.lock().page(variables, after)
    }

    async fn delete(&self, id: &str) -> Result<(), RemoteFailure> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);

        let delay = self.delete_delays.lock().get(id).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.check_available()?;
        let failure = self.delete_failures.lock().get(id).cloned();
        if let Some(failure) = failure {
            debug!("Injected delete failure for {}", id);
            return Err(failure);
        }

        self.records.lock().remove(id)?;
        Ok(())
    }

    async fn create(&self, fields: Map<String, Value>) -> Result<Item, RemoteFailure> {
        self.check_available()?;
        Ok(self.records.lock().create(fields))
    }

    fn store_name(&self) -> &'static str {
        "memory"
    }
}
