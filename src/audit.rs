//! Audit trail for mutations
//!
//! One JSON line per create or settled delete in `<state dir>/audit.log`.
//! Failed deletes are recorded too, with the store's reason.

use crate::config::{schema::Config, ConfigManager};
use crate::mutation::DeleteOutcome;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::PathBuf;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::warn;

/// One line of the audit file
#[derive(Debug, Serialize)]
struct AuditEntry<'a> {
    timestamp: DateTime<Utc>,
    event: &'a str,
    data: &'a Value,
}

/// Append-only JSON-lines audit log
pub struct AuditLog {
    path: PathBuf,
    enabled: bool,
}

impl AuditLog {
    /// Audit log at the state directory, switched by `general.audit_log`
    pub fn new(config: &Config) -> Self {
        Self::with_path(ConfigManager::audit_log_path(), config.general.audit_log)
    }

    pub fn with_path(path: PathBuf, enabled: bool) -> Self {
        Self { path, enabled }
    }

    /// Append an event. Write failures only produce a warning.
    pub async fn log(&self, event: &str, data: &Value) {
        if !self.enabled {
            return;
        }

        let entry = AuditEntry {
            timestamp: Utc::now(),
            event,
            data,
        };
        if let Err(e) = self.append(&entry).await {
            warn!("Audit entry {} not written: {}", event, e);
        }
    }

    /// Record a settled delete
    pub async fn log_delete(&self, store: &str, id: &str, outcome: &DeleteOutcome) {
        let (event, data) = match outcome {
            DeleteOutcome::Failure(failure) => (
                "item.delete_failed",
                json!({"store": store, "id": id, "reason": failure.to_string()}),
            ),
            DeleteOutcome::Success(_) => (
                "item.deleted",
                json!({"store": store, "id": id, "patched": true}),
            ),
            DeleteOutcome::NoOp => (
                "item.deleted",
                json!({"store": store, "id": id, "patched": false}),
            ),
        };
        self.log(event, &data).await;
    }

    async fn append(&self, entry: &AuditEntry<'_>) -> std::io::Result<()> {
        let mut line = serde_json::to_vec(entry)?;
        line.push(b'\n');

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&line).await?;
        file.flush().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RemoteFailure;
    use tempfile::TempDir;

    fn audit_in(dir: &TempDir, enabled: bool) -> AuditLog {
        AuditLog::with_path(dir.path().join("audit.log"), enabled)
    }

    async fn lines(audit: &AuditLog) -> Vec<Value> {
        let content = tokio::fs::read_to_string(&audit.path).await.unwrap();
        content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn writes_json_line() {
        let dir = TempDir::new().unwrap();
        let audit = audit_in(&dir, true);

        audit
            .log("item.created", &json!({"id": "abc", "name": "Gold"}))
            .await;

        let parsed = lines(&audit).await;
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0]["event"], "item.created");
        assert_eq!(parsed[0]["data"]["name"], "Gold");
        let stamp = parsed[0]["timestamp"].as_str().unwrap();
        assert!(stamp.parse::<DateTime<Utc>>().is_ok());
    }

    #[tokio::test]
    async fn records_delete_outcomes() {
        let dir = TempDir::new().unwrap();
        let audit = audit_in(&dir, true);

        audit.log_delete("file", "1", &DeleteOutcome::NoOp).await;
        audit
            .log_delete(
                "file",
                "2",
                &DeleteOutcome::Failure(RemoteFailure::rejected("in use")),
            )
            .await;

        let parsed = lines(&audit).await;
        assert_eq!(parsed[0]["event"], "item.deleted");
        assert_eq!(parsed[0]["data"]["patched"], false);
        assert_eq!(parsed[1]["event"], "item.delete_failed");
        assert_eq!(parsed[1]["data"]["reason"], "remote store rejected: in use");
    }

    #[tokio::test]
    async fn skips_when_disabled() {
        let dir = TempDir::new().unwrap();
        let audit = audit_in(&dir, false);

        audit.log("should.not.appear", &json!({})).await;

        assert!(!audit.path.exists());
    }
}
