//! Confirmation prompt with CI/non-interactive fallback

use super::context::UiContext;
use crate::error::{ListSyncError, ListSyncResult};

/// Ask before a destructive action.
///
/// `--yes` accepts; a non-interactive run declines unless `--yes` was given.
pub async fn confirm(ctx: &UiContext, message: &str) -> ListSyncResult<bool> {
    if ctx.auto_yes() {
        println!("  {} (auto-approved)", message);
        return Ok(true);
    }

    if !ctx.is_interactive() {
        return Ok(false);
    }

    // cliclack blocks on stdin
    let message = message.to_string();
    let result = tokio::task::spawn_blocking(move || {
        cliclack::confirm(&message).initial_value(false).interact()
    })
    .await
    .map_err(|e| ListSyncError::User(format!("Prompt task failed: {}", e)))?;

    result.map_err(|e| ListSyncError::User(format!("Prompt failed: {}", e)))
}
