//! Delete command - confirm and delete items
//!
//! Every target gets its own view on the shared cache, so each one walks
//! its own confirming → deleting → idle cycle. Confirmed deletes are sent
//! together and settle in whatever order the store answers.

use crate::audit::AuditLog;
use crate::cli::args::DeleteArgs;
use crate::cli::commands::{query_client, query_key};
use crate::config::Config;
use crate::error::{ListSyncError, ListSyncResult};
use crate::model::QueryKey;
use crate::query::QueryClient;
use crate::ui::{self, TaskSpinner, UiContext};
use crate::view::ListView;
use futures_util::future::join_all;
use std::collections::HashSet;
use std::time::Duration;
use tracing::debug;

/// Execute the delete command
pub async fn execute(args: DeleteArgs, config: &Config) -> ListSyncResult<()> {
    let ctx = UiContext::detect().with_auto_yes(args.yes);
    let client = query_client(config);
    let key = query_key(config, &args.query);
    let audit = AuditLog::new(config);
    let notice_duration = Duration::from_millis(config.notice.duration_ms);

    delete_items(&ctx, &client, &audit, &key, args.ids, notice_duration).await
}

/// Fetch pages until every target is cached, then confirm, delete and
/// settle each one.
///
/// Errors when a target is not in the list, or when any confirmed delete
/// failed. Deletes that succeeded are patched and audited either way.
pub(crate) async fn delete_items(
    ctx: &UiContext,
    client: &QueryClient,
    audit: &AuditLog,
    key: &QueryKey,
    ids: Vec<String>,
    notice_duration: Duration,
) -> ListSyncResult<()> {
    let mut seen = HashSet::new();
    let ids: Vec<String> = ids
        .into_iter()
        .filter(|id| seen.insert(id.clone()))
        .collect();

    load_targets(client, key, &ids).await?;

    // Open one confirmation per target before anything is sent
    let mut views = Vec::with_capacity(ids.len());
    for id in &ids {
        let mut view =
            ListView::mount(client.cache(), key.clone()).with_notice_duration(notice_duration);
        view.request_delete(id)?;
        views.push(view);
    }

    let mut confirmed = Vec::new();
    for mut view in views {
        let label = match view.pending() {
            Some(pending) => pending.label.clone(),
            None => continue,
        };
        if ui::confirm(ctx, &format!("Delete {label}?")).await? {
            let id = view.begin_delete()?;
            confirmed.push((id, view));
        } else {
            view.cancel();
            debug!("Delete of {} declined", label);
        }
    }

    if confirmed.is_empty() {
        ui::outro_warn(ctx, "Nothing deleted");
        return Ok(());
    }

    let sent = confirmed.len();
    let mut spinner = TaskSpinner::new(ctx);
    spinner.start(&format!("Deleting {sent} item(s)..."));

    let executor = client.executor();
    let outcomes = join_all(
        confirmed
            .iter()
            .map(|(id, view)| executor.delete_item(view.key(), id)),
    )
    .await;

    let failed = outcomes.iter().filter(|o| !o.is_confirmed()).count();
    if failed == 0 {
        spinner.stop("Deletes settled");
    } else {
        spinner.stop_error(&format!("{failed} delete(s) failed"));
    }

    let store_name = client.store().store_name();
    for ((id, mut view), outcome) in confirmed.into_iter().zip(outcomes) {
        let notice = view.settle(&outcome);
        ui::notice(ctx, &notice);
        audit.log_delete(store_name, &id, &outcome).await;
    }

    let remaining = client.cache().read(key).map_or(0, |list| list.len());
    ui::step_info(ctx, &format!("{remaining} item(s) remain in {key}"));

    if failed > 0 {
        return Err(ListSyncError::User(format!(
            "{failed} of {sent} delete(s) failed"
        )));
    }

    ui::outro_success(ctx, "Done");
    Ok(())
}

/// Fetch the first page, then further pages while a target is still missing
async fn load_targets(client: &QueryClient, key: &QueryKey, ids: &[String]) -> ListSyncResult<()> {
    let mut list = client.fetch(key).await?;
    while list.page_info.has_next_page && ids.iter().any(|id| !list.contains(id)) {
        debug!("Targets not on the first {} item(s), fetching more", list.len());
        list = client.fetch_more(key).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::QueryCache;
    use crate::error::RemoteFailure;
    use crate::model::{Item, ListVariables};
    use crate::remote::MemoryStore;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn plans(n: usize) -> Vec<Item> {
        (1..=n)
            .map(|i| Item::named(i.to_string(), format!("Plan {i}")))
            .collect()
    }

    fn setup(items: Vec<Item>, first: u32) -> (Arc<MemoryStore>, QueryClient, QueryKey) {
        let store = Arc::new(MemoryStore::with_items(items));
        let client = QueryClient::new(store.clone(), QueryCache::new());
        let key = QueryKey::new("memberPlanList", ListVariables::new(None, first));
        (store, client, key)
    }

    async fn audit_events(dir: &TempDir) -> Vec<serde_json::Value> {
        tokio::fs::read_to_string(dir.path().join("audit.log"))
            .await
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    fn yes() -> UiContext {
        UiContext::non_interactive().with_auto_yes(true)
    }

    #[tokio::test]
    async fn deletes_several_items() {
        let dir = TempDir::new().unwrap();
        let audit = AuditLog::with_path(dir.path().join("audit.log"), true);
        let (store, client, key) = setup(plans(4), 50);

        let ids = vec!["1".to_string(), "3".to_string(), "1".to_string()];
        delete_items(&yes(), &client, &audit, &key, ids, Duration::from_secs(1))
            .await
            .unwrap();

        assert_eq!(store.ids(), vec!["2", "4"]);
        assert_eq!(store.delete_calls(), 2);
        assert_eq!(client.cache().read(&key).unwrap().ids(), vec!["2", "4"]);
        assert_eq!(audit_events(&dir).await.len(), 2);
    }

    #[tokio::test]
    async fn partial_failure_errors_but_keeps_successes() {
        let dir = TempDir::new().unwrap();
        let audit = AuditLog::with_path(dir.path().join("audit.log"), true);
        let (store, client, key) = setup(plans(3), 50);
        store.fail_delete("2", RemoteFailure::rejected("plan has subscribers"));

        let ids = vec!["1".to_string(), "2".to_string()];
        let err = delete_items(&yes(), &client, &audit, &key, ids, Duration::from_secs(1))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "1 of 2 delete(s) failed");
        assert_eq!(store.ids(), vec!["2", "3"]);
        assert_eq!(client.cache().read(&key).unwrap().ids(), vec!["2", "3"]);

        let events = audit_events(&dir).await;
        assert_eq!(events[0]["event"], "item.deleted");
        assert_eq!(events[0]["data"]["id"], "1");
        assert_eq!(events[0]["data"]["patched"], true);
        assert_eq!(events[1]["event"], "item.delete_failed");
        assert_eq!(events[1]["data"]["id"], "2");
    }

    #[tokio::test]
    async fn finds_targets_past_the_first_page() {
        let dir = TempDir::new().unwrap();
        let audit = AuditLog::with_path(dir.path().join("audit.log"), false);
        let (store, client, key) = setup(plans(5), 2);

        delete_items(&yes(), &client, &audit, &key, vec!["5".to_string()], Duration::from_secs(1))
            .await
            .unwrap();

        assert_eq!(store.ids(), vec!["1", "2", "3", "4"]);
        assert!(!client.cache().read(&key).unwrap().contains("5"));
    }

    #[tokio::test]
    async fn unknown_target_fails_after_all_pages() {
        let dir = TempDir::new().unwrap();
        let audit = AuditLog::with_path(dir.path().join("audit.log"), false);
        let (store, client, key) = setup(plans(3), 1);

        let err = delete_items(&yes(), &client, &audit, &key, vec!["9".to_string()], Duration::from_secs(1))
            .await
            .unwrap_err();

        assert!(matches!(err, ListSyncError::ItemNotFound(id) if id == "9"));
        assert_eq!(client.cache().read(&key).unwrap().len(), 3);
        assert_eq!(store.delete_calls(), 0);
    }

    #[tokio::test]
    async fn declined_confirmation_sends_nothing() {
        let dir = TempDir::new().unwrap();
        let audit = AuditLog::with_path(dir.path().join("audit.log"), true);
        let (store, client, key) = setup(plans(2), 50);

        delete_items(
            &UiContext::non_interactive(),
            &client,
            &audit,
            &key,
            vec!["1".to_string()],
            Duration::from_secs(1),
        )
        .await
        .unwrap();

        assert_eq!(store.delete_calls(), 0);
        assert_eq!(store.ids(), vec!["1", "2"]);
        assert!(!dir.path().join("audit.log").exists());
    }
}
