//! Sentinel CLI - watch-mode Go test runner
//!
//! Usage: sentinel <COMMAND>
//!
//! Commands:
//!   watch     Watch the project and rerun stale tests on every change
//!   classify  Print the change kind and content hash of files

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let color = cli.color.map(Into::into);
    match cli.command {
        Commands::Watch {
            root,
            debounce_ms,
            no_run_on_start,
        } => commands::watch::cmd_watch(
            &root,
            debounce_ms,
            no_run_on_start,
            cli.json,
            cli.verbose,
            color,
        ),
        Commands::Classify { paths, root } => {
            commands::classify::cmd_classify(&root, &paths, cli.json, cli.verbose, color)
        }
    }
}

/// Logs go to stderr so they never interleave with rendered results.
///
/// `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(verbose)));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(verbose > 1),
        )
        .with(filter)
        .init();
}

fn default_log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}
