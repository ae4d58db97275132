//! List view model
//!
//! Mirrors one cache key through a [`Subscription`] and tracks at most one
//! pending deletion. Row transitions:
//!
//! | From | Call | To |
//! |------|------|----|
//! | idle | `request_delete` | confirming |
//! | confirming | `cancel` | idle |
//! | confirming | `begin_delete` | deleting |
//! | deleting | `settle` | idle |

use crate::cache::{QueryCache, Subscription};
use crate::error::{ListSyncError, ListSyncResult};
use crate::model::{ListQueryResult, QueryKey};
use crate::mutation::{DeleteOutcome, MutationExecutor};
use crate::view::notice::{Notice, DEFAULT_NOTICE_DURATION};
use crate::view::row::{render_rows, PendingDeletion, PendingPhase, RowView, UNTITLED};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// A delete that has run to completion, with what to tell the user
#[derive(Debug, Clone)]
pub struct Settlement {
    pub id: String,
    pub outcome: DeleteOutcome,
    pub notice: Notice,
}

/// View model over one cached list query
pub struct ListView {
    subscription: Subscription,
    snapshot: Option<Arc<ListQueryResult>>,
    pending: Option<PendingDeletion>,
    notice_duration: Duration,
}

impl ListView {
    /// Subscribe to `key` and take the currently cached value
    pub fn mount(cache: &QueryCache, key: QueryKey) -> Self {
        let subscription = cache.subscribe(&key);
        let snapshot = subscription.current();
        Self {
            subscription,
            snapshot,
            pending: None,
            notice_duration: DEFAULT_NOTICE_DURATION,
        }
    }

    /// Set how long settlement notices stay visible
    pub fn with_notice_duration(mut self, duration: Duration) -> Self {
        self.notice_duration = duration;
        self
    }

    pub fn key(&self) -> &QueryKey {
        self.subscription.key()
    }

    /// The list as last seen by this view
    pub fn snapshot(&self) -> Option<&ListQueryResult> {
        self.snapshot.as_deref()
    }

    /// True until the key has been fetched
    pub fn is_loading(&self) -> bool {
        self.snapshot.is_none()
    }

    pub fn pending(&self) -> Option<&PendingDeletion> {
        self.pending.as_ref()
    }

    /// Apply cache notifications received since the last sync.
    ///
    /// Returns whether anything arrived.
    pub fn sync(&mut self) -> bool {
        if self.subscription.drain() == 0 {
            return false;
        }
        self.refresh();
        true
    }

    /// Wait for the next cache notification. `false` once the cache is gone.
    pub async fn changed(&mut self) -> bool {
        if self.subscription.changed().await.is_none() {
            return false;
        }
        self.subscription.drain();
        self.refresh();
        true
    }

    fn refresh(&mut self) {
        self.snapshot = self.subscription.current();

        // A refetch may drop the row being confirmed; an in-flight delete
        // still has to settle
        let vanished = match (&self.pending, &self.snapshot) {
            (Some(p), Some(list)) => p.phase == PendingPhase::Confirming && !list.contains(&p.id),
            (Some(p), None) => p.phase == PendingPhase::Confirming,
            _ => false,
        };
        if vanished {
            debug!("Row awaiting confirmation left the list");
            self.pending = None;
        }
    }

    /// First click on a row's delete control
    pub fn request_delete(&mut self, id: &str) -> ListSyncResult<()> {
        if let Some(PendingDeletion {
            id: busy,
            phase: PendingPhase::Deleting,
            ..
        }) = &self.pending
        {
            return Err(ListSyncError::DeleteInProgress(busy.clone()));
        }

        let item = self
            .snapshot
            .as_ref()
            .and_then(|list| list.get(id))
            .ok_or_else(|| ListSyncError::ItemNotFound(id.to_string()))?;

        self.pending = Some(PendingDeletion {
            id: item.id.clone(),
            label: item.name().unwrap_or(UNTITLED).to_string(),
            phase: PendingPhase::Confirming,
        });
        Ok(())
    }

    /// Close the confirmation without deleting. Returns whether one was open.
    pub fn cancel(&mut self) -> bool {
        match &self.pending {
            Some(p) if p.phase == PendingPhase::Confirming => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Confirmed click: mark the selected row as deleting and hand back its id
    pub fn begin_delete(&mut self) -> ListSyncResult<String> {
        match self.pending.as_mut() {
            Some(p) if p.phase == PendingPhase::Confirming => {
                p.phase = PendingPhase::Deleting;
                Ok(p.id.clone())
            }
            Some(p) => Err(ListSyncError::DeleteInProgress(p.id.clone())),
            None => Err(ListSyncError::NothingToConfirm),
        }
    }

    /// Record the settled outcome. The pending deletion is always cleared.
    pub fn settle(&mut self, outcome: &DeleteOutcome) -> Notice {
        let label = self
            .pending
            .take()
            .map(|p| p.label)
            .unwrap_or_else(|| UNTITLED.to_string());
        self.sync();

        match outcome {
            DeleteOutcome::Failure(failure) => Notice::error(
                format!("Could not delete {label}: {failure}"),
                self.notice_duration,
            ),
            DeleteOutcome::Success(_) | DeleteOutcome::NoOp => {
                Notice::success(format!("Deleted {label}"), self.notice_duration)
            }
        }
    }

    /// Run the confirmed delete through `executor` and settle it
    pub async fn confirm_delete(
        &mut self,
        executor: &MutationExecutor,
    ) -> ListSyncResult<Settlement> {
        let id = self.begin_delete()?;
        let key = self.key().clone();
        let outcome = executor.delete_item(&key, &id).await;
        let notice = self.settle(&outcome);
        Ok(Settlement {
            id,
            outcome,
            notice,
        })
    }

    /// Current rows
    pub fn render(&self) -> Vec<RowView> {
        render_rows(self.snapshot(), self.pending.as_ref())
    }
}
