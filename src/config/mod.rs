//! Configuration module for Sentinel
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (SENTINEL_*)
//! 3. Project config (`sentinel.toml` at the project root)
//! 4. User config (`<config_dir>/sentinel/config.toml`)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{user_config_path, ConfigWarning, PROJECT_CONFIG_FILE};
pub use types::{ClassifyConfig, ColorMode, Config, OutputConfig, RunnerConfig, WatchConfig};
