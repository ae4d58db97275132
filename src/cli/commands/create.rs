//! Create command - add an item to the store

use crate::audit::AuditLog;
use crate::cli::args::CreateArgs;
use crate::config::Config;
use crate::error::{ListSyncError, ListSyncResult};
use crate::remote::create_store;
use crate::ui::{self, UiContext};
use serde_json::{json, Map, Value};

/// Execute the create command
pub async fn execute(args: CreateArgs, config: &Config) -> ListSyncResult<()> {
    let ctx = UiContext::detect();
    let store = create_store(config);
    let fields = build_fields(&args)?;

    let item = store.create(fields).await?;

    AuditLog::new(config)
        .log(
            "item.created",
            &json!({"store": store.store_name(), "id": item.id, "name": args.name}),
        )
        .await;

    ui::step_ok_detail(&ctx, &format!("Created {}", args.name), &item.id);
    Ok(())
}

/// Collect the item fields: name first, then `--field` values.
///
/// Values that parse as JSON (numbers, booleans, arrays...) keep that type;
/// anything else is stored as a string.
fn build_fields(args: &CreateArgs) -> ListSyncResult<Map<String, Value>> {
    let mut fields = Map::new();
    fields.insert("name".to_string(), Value::String(args.name.clone()));

    for (key, raw) in &args.field {
        if key == "id" || key == "name" {
            return Err(ListSyncError::User(format!(
                "Field '{key}' cannot be set with --field"
            )));
        }
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.clone()));
        fields.insert(key.clone(), value);
    }

    Ok(fields)
}
