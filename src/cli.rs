use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use sentinel::config::ColorMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

impl From<ColorWhen> for ColorMode {
    fn from(when: ColorWhen) -> Self {
        match when {
            ColorWhen::Auto => ColorMode::Auto,
            ColorWhen::Always => ColorMode::Always,
            ColorWhen::Never => ColorMode::Never,
        }
    }
}

/// Sentinel - watch-mode Go test runner
#[derive(Parser, Debug)]
#[command(name = "sentinel")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output NDJSON events instead of human-readable text
    #[arg(long, global = true)]
    pub json: bool,

    /// Color output
    #[arg(long, value_enum, global = true)]
    pub color: Option<ColorWhen>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Watch the project and rerun stale tests on every change
    Watch {
        /// Project root (the directory containing go.mod)
        #[arg(short, long, default_value = ".")]
        root: PathBuf,

        /// Quiet period per path, in milliseconds
        #[arg(long)]
        debounce_ms: Option<u64>,

        /// Wait for the first change instead of running everything at start
        #[arg(long)]
        no_run_on_start: bool,
    },

    /// Print the change kind and content hash of files (debugging)
    Classify {
        /// Files to classify
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Project root used to load classification rules
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
    },
}
