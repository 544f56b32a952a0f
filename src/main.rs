//! Skiff CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use console::style;
use skiff::cache::default_cache_root;
use skiff::cli::{commands, Cli, Commands};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is INFO
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("skiff=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("skiff=info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    tracing::debug!("Skiff starting with args: {:?}", cli);

    // Handle --no-color
    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let cache_root = cli.cache_dir.clone().unwrap_or_else(default_cache_root);

    let result = match &cli.command {
        Commands::Resolve(args) => commands::resolve::run(args, &cli),
        Commands::Fetch(args) => commands::fetch::run(args, &cli, &cache_root),
        Commands::Cache(args) => commands::cache::run(&args.command, &cli, &cache_root),
        Commands::Completions(args) => commands::completions::run(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            ExitCode::from(1)
        }
    }
}
