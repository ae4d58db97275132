//! List query data model
//!
//! Items are opaque records with a stable id. Everything the cache and the
//! executor need is the id; all other fields ride along untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::fmt;

/// Default page size for list queries
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// A single record in a paginated list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Stable identifier
    pub id: String,

    /// Domain-specific fields
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Item {
    /// Create an item with no fields besides its id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// Create an item carrying a `name` field
    pub fn named(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(id).with_field("name", Value::String(name.into()))
    }

    /// Builder-style field setter
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// The `name` field, if it is a non-empty string
    pub fn name(&self) -> Option<&str> {
        self.fields
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())
    }
}

/// Opaque pagination cursor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Cursor to pass as `after` for the next page
    pub end_cursor: Option<String>,

    /// Whether the store holds more items past `end_cursor`
    pub has_next_page: bool,
}

/// One fetched (and possibly patched) page of a list query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQueryResult {
    /// Items in display order, unique by id
    pub items: Vec<Item>,

    /// Pagination state as last reported by the store
    pub page_info: PageInfo,
}

impl ListQueryResult {
    /// Create a result from items and page info
    pub fn new(items: Vec<Item>, page_info: PageInfo) -> Self {
        Self { items, page_info }
    }

    /// Whether an item with this id is present
    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Look up an item by id
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Ids in display order
    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check the no-duplicate-ids invariant
    pub fn has_unique_ids(&self) -> bool {
        let mut seen = HashSet::with_capacity(self.items.len());
        self.items.iter().all(|item| seen.insert(item.id.as_str()))
    }
}

/// Variables of a list query. Part of the cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListVariables {
    /// Name filter; `None` matches everything
    pub filter: Option<String>,

    /// Page size
    pub first: u32,
}

impl ListVariables {
    /// Create variables, treating an empty filter as no filter
    pub fn new(filter: Option<String>, first: u32) -> Self {
        Self {
            filter: filter.filter(|f| !f.is_empty()),
            first,
        }
    }
}

impl Default for ListVariables {
    fn default() -> Self {
        Self {
            filter: None,
            first: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Identity of a cached query result: query name plus variables
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryKey {
    pub query_name: String,
    pub variables: ListVariables,
}

impl QueryKey {
    pub fn new(query_name: impl Into<String>, variables: ListVariables) -> Self {
        Self {
            query_name: query_name.into(),
            variables,
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(first: {}", self.query_name, self.variables.first)?;
        if let Some(filter) = &self.variables.filter {
            write!(f, ", filter: {filter:?}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_is_no_filter() {
        let vars = ListVariables::new(Some(String::new()), 50);
        assert_eq!(vars, ListVariables::default());
    }

    #[test]
    fn keys_differ_by_variables() {
        let a = QueryKey::new("memberPlanList", ListVariables::new(Some("gold".into()), 50));
        let b = QueryKey::new("memberPlanList", ListVariables::default());
        assert_ne!(a, b);
        assert_eq!(a.to_string(), "memberPlanList(first: 50, filter: \"gold\")");
        assert_eq!(b.to_string(), "memberPlanList(first: 50)");
    }

    #[test]
    fn item_name_skips_empty() {
        assert_eq!(Item::named("1", "Gold").name(), Some("Gold"));
        assert_eq!(Item::named("2", "").name(), None);
        assert_eq!(Item::new("3").name(), None);
    }

    #[test]
    fn item_fields_flatten_in_json() {
        let item = Item::named("1", "Gold").with_field("active", Value::Bool(true));
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["name"], "Gold");
        assert_eq!(json["active"], true);

        let parsed: Item = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, item);
    }

    #[test]
    fn unique_ids_check() {
        let ok = ListQueryResult::new(vec![Item::new("1"), Item::new("2")], PageInfo::default());
        assert!(ok.has_unique_ids());

        let dup = ListQueryResult::new(vec![Item::new("1"), Item::new("1")], PageInfo::default());
        assert!(!dup.has_unique_ids());
    }
}
