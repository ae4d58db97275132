//! Error types for listsync
//!
//! All modules use `ListSyncResult<T>` as their return type. Remote store
//! failures have their own type, [`RemoteFailure`], because the mutation
//! executor hands them back as data instead of propagating them.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for listsync operations
pub type ListSyncResult<T> = Result<T, ListSyncError>;

/// Category of a remote store failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteFailureKind {
    /// Transport or backing storage could not be reached
    Unavailable,
    /// The store refused the request
    Rejected,
    /// The store has no record with the requested id
    NotFound,
}

impl RemoteFailureKind {
    /// Short lowercase label used in notices and logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unavailable => "unavailable",
            Self::Rejected => "rejected",
            Self::NotFound => "not found",
        }
    }
}

/// A request the remote store did not complete
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("remote store {}: {message}", kind.label())]
pub struct RemoteFailure {
    /// What went wrong
    pub kind: RemoteFailureKind,
    /// Human-readable detail from the store
    pub message: String,
}

impl RemoteFailure {
    /// Create a failure of an explicit kind
    pub fn new(kind: RemoteFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// The store could not be reached
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(RemoteFailureKind::Unavailable, message)
    }

    /// The store refused the request
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::new(RemoteFailureKind::Rejected, message)
    }

    /// No record with this id exists remotely
    pub fn not_found(id: &str) -> Self {
        Self::new(RemoteFailureKind::NotFound, format!("no item with id {id}"))
    }

    /// Whether trying again later could succeed
    pub fn is_transient(&self) -> bool {
        matches!(self.kind, RemoteFailureKind::Unavailable)
    }
}

/// All errors that can occur in listsync
#[derive(Error, Debug)]
pub enum ListSyncError {
    // Remote store errors
    #[error(transparent)]
    Remote(#[from] RemoteFailure),

    // Cache and view errors
    #[error("No cached list for query {0}")]
    QueryNotCached(String),

    #[error("Item not found in list: {0}")]
    ItemNotFound(String),

    #[error("A delete is already in progress for item {0}")]
    DeleteInProgress(String),

    #[error("No item is awaiting delete confirmation")]
    NothingToConfirm,

    #[error("No page after the current one for query {0}")]
    NoNextPage(String),

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl ListSyncError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a remote failure error
    pub fn remote(kind: RemoteFailureKind, message: impl Into<String>) -> Self {
        Self::Remote(RemoteFailure::new(kind, message))
    }

    /// Check if error is retryable.
    ///
    /// Informational only: nothing in listsync retries on its own.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Remote(failure) => failure.is_transient(),
            Self::DeleteInProgress(_) => true,
            _ => false,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Remote(failure) if failure.is_transient() => {
                Some("Check the store path and run the command again")
            }
            Self::Remote(RemoteFailure {
                kind: RemoteFailureKind::NotFound,
                ..
            }) => Some("Run: listsync list"),
            Self::ItemNotFound(_) => Some("Run: listsync list"),
            Self::ConfigInvalid { .. } => Some("Run: listsync config init --force"),
            _ => None,
        }
    }
}
