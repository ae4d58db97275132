//! List command - show items

use crate::cli::args::{ListArgs, OutputFormat};
use crate::cli::commands::{query_client, query_key};
use crate::config::Config;
use crate::error::ListSyncResult;
use crate::ui::{self, UiContext};
use crate::view::ListView;
use tracing::debug;

/// Execute the list command
pub async fn execute(args: ListArgs, config: &Config) -> ListSyncResult<()> {
    let client = query_client(config);
    let key = query_key(config, &args.query);
    let mut view = ListView::mount(client.cache(), key.clone());

    let mut page = client.fetch(&key).await?;
    while args.all && page.page_info.has_next_page {
        debug!("Fetching next page after {:?}", page.page_info.end_cursor);
        page = client.fetch_more(&key).await?;
    }
    view.sync();

    let list = match view.snapshot() {
        Some(list) if !list.is_empty() => list,
        _ => {
            match args.format {
                OutputFormat::Json => println!("[]"),
                OutputFormat::Plain => {}
                OutputFormat::Table => {
                    let ctx = UiContext::detect();
                    ui::step_info(&ctx, "No items");
                }
            }
            return Ok(());
        }
    };

    match args.format {
        OutputFormat::Table => {
            let ctx = UiContext::detect();
            ui::intro(&ctx, &format!("Items ({})", client.store().store_name()));
            ui::row_table(&view.render());
            println!();
            println!("{} item(s)", list.len());
            if list.page_info.has_next_page {
                println!("More items available; use --all to fetch every page");
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&list.items)?),
        OutputFormat::Plain => {
            for item in &list.items {
                println!("{}", item.id);
            }
        }
    }

    Ok(())
}
