//! Row rendering
//!
//! A row's state is derived, never stored: it is `Idle` unless the view's
//! single pending deletion names it.

use crate::model::ListQueryResult;
use serde::Serialize;

/// Label shown for items without a name
pub const UNTITLED: &str = "Untitled";

/// Interaction state of one row's delete control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowState {
    Idle,
    /// Confirmation disclosure is open
    Confirming,
    /// Delete request sent, not yet settled
    Deleting,
}

/// Phase of the view's pending deletion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingPhase {
    Confirming,
    Deleting,
}

/// The item selected for deletion, from first click until settlement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeletion {
    pub id: String,
    /// Display name captured at selection time
    pub label: String,
    pub phase: PendingPhase,
}

/// One rendered row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub id: String,
    pub name: String,
    pub state: RowState,
    pub delete_enabled: bool,
}

/// Render rows from a cached list and the pending deletion.
///
/// Delete controls are disabled on every row while a delete is in flight.
pub fn render_rows(
    list: Option<&ListQueryResult>,
    pending: Option<&PendingDeletion>,
) -> Vec<RowView> {
    let Some(list) = list else {
        return Vec::new();
    };
    let deleting = pending.is_some_and(|p| p.phase == PendingPhase::Deleting);

    list.items
        .iter()
        .map(|item| {
            let state = match pending {
                Some(p) if p.id == item.id => match p.phase {
                    PendingPhase::Confirming => RowState::Confirming,
                    PendingPhase::Deleting => RowState::Deleting,
                },
                _ => RowState::Idle,
            };
            RowView {
                id: item.id.clone(),
                name: item.name().unwrap_or(UNTITLED).to_string(),
                state,
                delete_enabled: !deleting,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Item, PageInfo};

    fn list() -> ListQueryResult {
        ListQueryResult::new(
            vec![Item::named("1", "Gold"), Item::new("2")],
            PageInfo::default(),
        )
    }

    #[test]
    fn no_list_renders_nothing() {
        assert!(render_rows(None, None).is_empty());
    }

    #[test]
    fn idle_rows_and_untitled_fallback() {
        let rows = render_rows(Some(&list()), None);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Gold");
        assert_eq!(rows[1].name, UNTITLED);
        assert!(rows.iter().all(|r| r.state == RowState::Idle && r.delete_enabled));
    }

    #[test]
    fn confirming_marks_one_row() {
        let pending = PendingDeletion {
            id: "2".into(),
            label: UNTITLED.into(),
            phase: PendingPhase::Confirming,
        };
        let rows = render_rows(Some(&list()), Some(&pending));
        assert_eq!(rows[0].state, RowState::Idle);
        assert_eq!(rows[1].state, RowState::Confirming);
        assert!(rows.iter().all(|r| r.delete_enabled));
    }

    #[test]
    fn deleting_disables_every_row() {
        let pending = PendingDeletion {
            id: "1".into(),
            label: "Gold".into(),
            phase: PendingPhase::Deleting,
        };
        let rows = render_rows(Some(&list()), Some(&pending));
        assert_eq!(rows[0].state, RowState::Deleting);
        assert!(rows.iter().all(|r| !r.delete_enabled));
    }
}
