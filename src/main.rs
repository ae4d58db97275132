//! listsync - paginated lists with confirmed-delete cache patching
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use listsync::cli::{Cli, Commands};
use listsync::config::ConfigManager;
use listsync::error::ListSyncResult;
use listsync::remote::StoreKind;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> ListSyncResult<()> {
    let cli = Cli::parse();

    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };
    let mut config = config_manager.load().await?;

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let verbosity = if config.general.verbose {
        cli.verbose.max(1)
    } else {
        cli.verbose
    };
    let filter = match verbosity {
        0 => EnvFilter::new("listsync=warn"),
        1 => EnvFilter::new("listsync=info"),
        _ => EnvFilter::new("listsync=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    debug!("Using config {}", config_manager.path().display());

    if let Some(path) = cli.store {
        debug!("Store overridden: {}", path.display());
        config.store.kind = StoreKind::File;
        config.store.path = Some(path);
    }

    ConfigManager::ensure_state_dirs().await?;

    match cli.command {
        Commands::List(args) => listsync::cli::commands::list(args, &config).await,
        Commands::Delete(args) => listsync::cli::commands::delete(args, &config).await,
        Commands::Create(args) => listsync::cli::commands::create(args, &config).await,
        Commands::Config(args) => {
            listsync::cli::commands::config(args, &config, &config_manager).await
        }
    }
}
