//! listsync - paginated list queries with confirmed-delete cache patching
//!
//! A shared query cache holds list results by query key. Deletes go to the
//! remote store first; only a confirmed delete patches the cached list, and
//! every view subscribed to that key re-renders from the patched result.

pub mod audit;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod mutation;
pub mod query;
pub mod remote;
pub mod ui;
pub mod view;

pub use cache::{CacheEvent, QueryCache, Subscription};
pub use error::{ListSyncError, ListSyncResult, RemoteFailure, RemoteFailureKind};
pub use model::{Item, ListQueryResult, ListVariables, PageInfo, QueryKey};
pub use mutation::{DeleteOutcome, MutationExecutor};
pub use query::QueryClient;
pub use remote::RemoteStore;
pub use view::{ListView, Notice, RowState};
