//! Pure list patches applied after confirmed mutations

use crate::model::{Item, ListQueryResult};
use std::collections::HashSet;

/// Result of patching a cached list
#[derive(Debug, Clone, PartialEq)]
pub enum PatchResult {
    /// The list changed; store this value
    Patched(ListQueryResult),
    /// Nothing matched; the list is as it was
    Unchanged,
}

impl PatchResult {
    /// The patched list, if anything changed
    pub fn into_patched(self) -> Option<ListQueryResult> {
        match self {
            PatchResult::Patched(list) => Some(list),
            PatchResult::Unchanged => None,
        }
    }
}

/// Remove the item with `id`, keeping the order of the rest and the page info
pub fn apply_delete_patch(list: &ListQueryResult, id: &str) -> PatchResult {
    if !list.contains(id) {
        return PatchResult::Unchanged;
    }

    let items = list
        .items
        .iter()
        .filter(|item| item.id != id)
        .cloned()
        .collect();

    PatchResult::Patched(ListQueryResult::new(items, list.page_info.clone()))
}

/// Append a following page, skipping ids already present.
///
/// The page info of `next` replaces the old one: the cursor moves forward
/// even when every item of the page was a duplicate.
pub fn append_page(list: &ListQueryResult, next: ListQueryResult) -> ListQueryResult {
    let mut seen: HashSet<String> = list.items.iter().map(|item| item.id.clone()).collect();

    let mut items: Vec<Item> = list.items.clone();
    items.extend(
        next.items
            .into_iter()
            .filter(|item| seen.insert(item.id.clone())),
    );

    ListQueryResult::new(items, next.page_info)
}
