//! Ordered record set shared by the store implementations
//!
//! Every record gets a sequence number on insert. Cursors are sequence
//! numbers, so a page boundary stays valid when the item it names is deleted.

use crate::error::RemoteFailure;
use crate::model::{Item, ListQueryResult, ListVariables, PageInfo};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A stored item with its insertion sequence number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub seq: u64,
    pub item: Item,
}

/// All records of a store, in insertion order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Records {
    pub next_seq: u64,
    pub records: Vec<Record>,
}

impl Default for Records {
    fn default() -> Self {
        Self {
            next_seq: 1,
            records: Vec::new(),
        }
    }
}

impl Records {
    /// Build a record set from items, keeping their order
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Self {
        let mut records = Self::default();
        for item in items {
            records.push(item);
        }
        records
    }

    /// Append an item, assigning the next sequence number
    pub fn push(&mut self, item: Item) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.records.push(Record { seq, item });
    }

    /// One page of matching items after the cursor
    pub fn page(
        &self,
        variables: &ListVariables,
        after: Option<&str>,
    ) -> Result<ListQueryResult, RemoteFailure> {
        let after_seq = after.map(parse_cursor).transpose()?;
        let first = variables.first as usize;

        let mut matching = self
            .records
            .iter()
            .filter(|record| after_seq.map_or(true, |seq| record.seq > seq))
            .filter(|record| matches_filter(&record.item, variables.filter.as_deref()));

        let page: Vec<&Record> = matching.by_ref().take(first).collect();
        // Without a last item there is no cursor to continue from
        let has_next_page = !page.is_empty() && matching.next().is_some();

        let end_cursor = page.last().map(|record| record.seq.to_string());
        let items = page.into_iter().map(|record| record.item.clone()).collect();

        Ok(ListQueryResult::new(
            items,
            PageInfo {
                end_cursor,
                has_next_page,
            },
        ))
    }

    /// Remove the record with this item id
    pub fn remove(&mut self, id: &str) -> Result<Item, RemoteFailure> {
        let index = self
            .records
            .iter()
            .position(|record| record.item.id == id)
            .ok_or_else(|| RemoteFailure::not_found(id))?;
        Ok(self.records.remove(index).item)
    }

    /// Insert a new item with a generated id
    pub fn create(&mut self, mut fields: Map<String, Value>) -> Item {
        // A caller-supplied id would bypass uniqueness
        fields.remove("id");
        let item = Item {
            id: Uuid::new_v4().to_string(),
            fields,
        };
        self.push(item.clone());
        item
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn parse_cursor(cursor: &str) -> Result<u64, RemoteFailure> {
    cursor
        .parse()
        .map_err(|_| RemoteFailure::rejected(format!("invalid cursor: {cursor}")))
}

/// Case-insensitive substring match on the item name
fn matches_filter(item: &Item, filter: Option<&str>) -> bool {
    let Some(filter) = filter else {
        return true;
    };
    item.name()
        .is_some_and(|name| name.to_lowercase().contains(&filter.to_lowercase()))
}
