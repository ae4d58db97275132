//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// listsync - paginated lists with confirmed-delete cache patching
///
/// Lists items from a store, and deletes them with confirmation, patching
/// the cached list only after the store accepts each delete.
#[derive(Parser, Debug)]
#[command(name = "listsync")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "LISTSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// JSON store file (overrides the configured store)
    #[arg(long, global = true, env = "LISTSYNC_STORE")]
    pub store: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List items
    List(ListArgs),

    /// Delete items after confirmation
    Delete(DeleteArgs),

    /// Create an item
    Create(CreateArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Query variables shared by list and delete
#[derive(clap::Args, Debug, Clone, Default)]
pub struct QueryArgs {
    /// Only items whose name contains this text (case-insensitive)
    #[arg(long)]
    pub filter: Option<String>,

    /// Page size (default: from config)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub first: Option<u32>,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Keep fetching pages until the list is complete
    #[arg(short, long)]
    pub all: bool,

    /// Output format
    #[arg(long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the delete command
#[derive(Parser, Debug)]
pub struct DeleteArgs {
    /// Ids of the items to delete
    #[arg(required = true)]
    pub ids: Vec<String>,

    #[command(flatten)]
    pub query: QueryArgs,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the create command
#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Item name
    #[arg(short, long)]
    pub name: String,

    /// Additional fields (KEY=VALUE); values that parse as JSON are stored as JSON
    #[arg(short, long, value_parser = parse_field)]
    pub field: Vec<(String, String)>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Output format for list command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Ids only, one per line
    Plain,
}

/// Parse a field in KEY=VALUE format
fn parse_field(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid KEY=VALUE format: no '=' found in '{s}'"))?;
    let key = &s[..pos];
    if key.is_empty() {
        return Err(format!("invalid KEY=VALUE format: empty key in '{s}'"));
    }
    Ok((key.to_string(), s[pos + 1..].to_string()))
}
