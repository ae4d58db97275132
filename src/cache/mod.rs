//! Keyed query cache with explicit subscriptions
//!
//! Holds the last fetched (or patched) [`ListQueryResult`] per [`QueryKey`].
//! Readers always see a whole list: entries are swapped as `Arc`s under a
//! write lock, never edited in place.
//!
//! # Notification
//!
//! Every write is followed by `notify(key)`, which publishes the value
//! stored at that moment to each live [`Subscription`] for the key. Two
//! racing writers may both notify with the newer value; subscribers always
//! converge on what is stored.
//!
//! | Operation | Stores | Notifies |
//! |-----------|--------|----------|
//! | `write` | always | yes |
//! | `update` | when the closure returns `Some` | only if stored |
//! | `invalidate` | removes | yes, with `Invalidated` |

mod subscription;

pub use subscription::{CacheEvent, Subscription};

use crate::model::{ListQueryResult, QueryKey};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

struct Subscriber {
    id: u64,
    tx: mpsc::UnboundedSender<CacheEvent>,
}

pub(crate) struct CacheInner {
    entries: RwLock<HashMap<QueryKey, Arc<ListQueryResult>>>,
    subscribers: Mutex<HashMap<QueryKey, Vec<Subscriber>>>,
    next_subscriber: AtomicU64,
}

impl CacheInner {
    pub(crate) fn unsubscribe(&self, key: &QueryKey, id: u64) {
        let mut subscribers = self.subscribers.lock();
        if let Some(list) = subscribers.get_mut(key) {
            list.retain(|s| s.id != id);
            if list.is_empty() {
                subscribers.remove(key);
            }
        }
        debug!("Unsubscribed {} from {}", id, key);
    }
}

/// Shared query cache handle.
///
/// Cloning is cheap and every clone refers to the same entries.
#[derive(Clone)]
pub struct QueryCache {
    inner: Arc<CacheInner>,
}

impl QueryCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            inner: Arc::new(CacheInner {
                entries: RwLock::new(HashMap::new()),
                subscribers: Mutex::new(HashMap::new()),
                next_subscriber: AtomicU64::new(1),
            }),
        }
    }

    /// Read the stored result for a key
    pub fn read(&self, key: &QueryKey) -> Option<Arc<ListQueryResult>> {
        self.inner.entries.read().get(key).cloned()
    }

    /// Replace the stored result for a key and notify subscribers
    pub fn write(&self, key: &QueryKey, result: ListQueryResult) -> Arc<ListQueryResult> {
        let stored = Arc::new(result);
        self.inner
            .entries
            .write()
            .insert(key.clone(), Arc::clone(&stored));
        debug!("Cache write {} ({} items)", key, stored.len());
        self.notify(key);
        stored
    }

    /// Read-modify-write a key under the write lock.
    ///
    /// `f` sees the current value and returns the replacement, or `None` to
    /// leave the entry as it is. Absent keys are not touched and `f` is not
    /// called. Returns the stored value when one was written.
    pub fn update<F>(&self, key: &QueryKey, f: F) -> Option<Arc<ListQueryResult>>
    where
        F: FnOnce(&ListQueryResult) -> Option<ListQueryResult>,
    {
        let stored = {
            let mut entries = self.inner.entries.write();
            let current = entries.get(key)?;
            let next = Arc::new(f(current)?);
            entries.insert(key.clone(), Arc::clone(&next));
            next
        };
        debug!("Cache update {} ({} items)", key, stored.len());
        self.notify(key);
        Some(stored)
    }

    /// Drop the entry for a key. Returns whether one existed.
    pub fn invalidate(&self, key: &QueryKey) -> bool {
        let removed = self.inner.entries.write().remove(key).is_some();
        if removed {
            debug!("Cache invalidate {}", key);
            self.notify(key);
        }
        removed
    }

    /// Publish the current value of a key to its subscribers
    pub fn notify(&self, key: &QueryKey) {
        // Read under the subscriber lock: racing notifiers then send in the
        // order they read, so the last event is always the stored value
        let mut subscribers = self.inner.subscribers.lock();
        let event = match self.read(key) {
            Some(result) => CacheEvent::Updated(result),
            None => CacheEvent::Invalidated,
        };

        if let Some(list) = subscribers.get_mut(key) {
            list.retain(|s| s.tx.send(event.clone()).is_ok());
            debug!("Notified {} subscriber(s) of {}", list.len(), key);
            if list.is_empty() {
                subscribers.remove(key);
            }
        }
    }

    /// Register for change notifications on a key.
    ///
    /// The registration lasts as long as the returned guard.
    pub fn subscribe(&self, key: &QueryKey) -> Subscription {
        let id = self.inner.next_subscriber.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();

        // Register before reading so a write in between is delivered as an event
        self.inner
            .subscribers
            .lock()
            .entry(key.clone())
            .or_default()
            .push(Subscriber { id, tx });
        let current = self.read(key);

        debug!("Subscribed {} to {}", id, key);
        Subscription::new(key.clone(), id, Arc::downgrade(&self.inner), rx, current)
    }

    /// Number of live subscriptions for a key
    pub fn subscriber_count(&self, key: &QueryKey) -> usize {
        self.inner
            .subscribers
            .lock()
            .get(key)
            .map_or(0, |list| list.len())
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.inner.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}
