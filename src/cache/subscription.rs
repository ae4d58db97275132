//! Scoped cache subscriptions

use super::CacheInner;
use crate::model::{ListQueryResult, QueryKey};
use std::sync::{Arc, Weak};
use tokio::sync::mpsc;

/// Change published for a subscribed key
#[derive(Debug, Clone)]
pub enum CacheEvent {
    /// The key now holds this value
    Updated(Arc<ListQueryResult>),
    /// The key was removed from the cache
    Invalidated,
}

/// A live registration on one cache key.
///
/// Tracks the latest value it has seen. Dropping it unregisters from the
/// cache.
pub struct Subscription {
    key: QueryKey,
    id: u64,
    cache: Weak<CacheInner>,
    rx: mpsc::UnboundedReceiver<CacheEvent>,
    current: Option<Arc<ListQueryResult>>,
}

impl Subscription {
    pub(super) fn new(
        key: QueryKey,
        id: u64,
        cache: Weak<CacheInner>,
        rx: mpsc::UnboundedReceiver<CacheEvent>,
        current: Option<Arc<ListQueryResult>>,
    ) -> Self {
        Self {
            key,
            id,
            cache,
            rx,
            current,
        }
    }

    /// The key this subscription watches
    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    /// Latest value seen, as of the last received event
    pub fn current(&self) -> Option<Arc<ListQueryResult>> {
        self.current.clone()
    }

    /// Take the next pending event without waiting
    pub fn try_next(&mut self) -> Option<CacheEvent> {
        let event = self.rx.try_recv().ok()?;
        self.apply(&event);
        Some(event)
    }

    /// Apply every pending event. Returns how many were applied.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while self.try_next().is_some() {
            applied += 1;
        }
        applied
    }

    /// Wait for the next event. `None` once the cache is gone.
    pub async fn changed(&mut self) -> Option<CacheEvent> {
        let event = self.rx.recv().await?;
        self.apply(&event);
        Some(event)
    }

    fn apply(&mut self, event: &CacheEvent) {
        self.current = match event {
            CacheEvent::Updated(result) => Some(Arc::clone(result)),
            CacheEvent::Invalidated => None,
        };
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cache) = self.cache.upgrade() {
            cache.unsubscribe(&self.key, self.id);
        }
    }
}
