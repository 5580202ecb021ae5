mod commands;
mod errors;
mod libs;
mod logger;
mod schemas;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;

use commands::refresh::RefreshOptions;
use commands::{list, refresh, version};

#[derive(Parser)]
#[command(name = "winget-refresh")]
#[command(about = "Uninstall, clean up and reinstall installed applications", long_about = None)]
struct Cli {
    /// Turn debugging information on
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version information
    Version,
    /// Uninstall, clean up and reinstall selected applications
    Refresh {
        /// Package identifier(s) to refresh, exact match (repeatable)
        #[arg(long = "id")]
        ids: Vec<String>,
        /// Application name pattern(s) to refresh; `*` and `?` wildcards,
        /// case-insensitive (repeatable). Ignored when --id is given.
        #[arg(long = "name")]
        names: Vec<String>,
        /// Also offer store-marketplace packages for selection
        #[arg(long)]
        include_store: bool,
        /// Reinstall the currently-recorded version instead of the latest
        #[arg(long)]
        pin_version: bool,
        /// Log every intended action without executing any of them
        #[arg(long)]
        dry_run: bool,
        /// Write a JSON report of all pipeline outcomes to this path
        #[arg(long)]
        report: Option<PathBuf>,
        /// Path to an alternate config.yaml
        #[arg(long, env = "WINGET_REFRESH_CONFIG")]
        config: Option<String>,
    },
    /// Print the unified application catalog
    List {
        /// Include store-marketplace packages in the listing
        #[arg(long)]
        include_store: bool,
        /// Path to an alternate config.yaml
        #[arg(long, env = "WINGET_REFRESH_CONFIG")]
        config: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    logger::init(cli.debug);

    let result = match cli.command {
        Commands::Version => {
            version::run();
            Ok(())
        }
        Commands::Refresh {
            ids,
            names,
            include_store,
            pin_version,
            dry_run,
            report,
            config,
        } => refresh::run(RefreshOptions {
            ids,
            names,
            include_store,
            pin_version,
            dry_run,
            report,
            config,
        }),
        Commands::List {
            include_store,
            config,
        } => list::run(include_store, config),
    };

    if let Err(e) = result {
        log_error!("{e}");
        std::process::exit(1);
    }
}
