//! Configuration type definitions

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::services::ClassifierRules;
use crate::error::SentinelResult;

use super::loader::{self, ConfigWarning};

/// Watch loop configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Per-path quiet period
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Gitignore-style patterns applied to watcher events
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,

    /// Run the whole project once when watching starts
    #[serde(default = "default_true")]
    pub run_on_start: bool,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            ignore: default_ignore(),
            run_on_start: true,
        }
    }
}

fn default_debounce_ms() -> u64 {
    crate::application::DEBOUNCE_MS
}

fn default_ignore() -> Vec<String> {
    vec![
        ".git/".to_string(),
        "vendor/".to_string(),
        "node_modules/".to_string(),
    ]
}

fn default_true() -> bool {
    true
}

/// Change classification rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifyConfig {
    #[serde(default = "default_test_suffix")]
    pub test_suffix: String,

    #[serde(default = "default_source_extension")]
    pub source_extension: String,

    #[serde(default = "default_dependency_files")]
    pub dependency_files: Vec<String>,

    #[serde(default = "default_config_files")]
    pub config_files: Vec<String>,

    #[serde(default)]
    pub config_extensions: Vec<String>,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        ClassifierRules::default().into()
    }
}

fn default_test_suffix() -> String {
    ClassifierRules::default().test_suffix
}

fn default_source_extension() -> String {
    ClassifierRules::default().source_extension
}

fn default_dependency_files() -> Vec<String> {
    ClassifierRules::default().dependency_files
}

fn default_config_files() -> Vec<String> {
    ClassifierRules::default().config_files
}

impl From<ClassifierRules> for ClassifyConfig {
    fn from(rules: ClassifierRules) -> Self {
        Self {
            test_suffix: rules.test_suffix,
            source_extension: rules.source_extension,
            dependency_files: rules.dependency_files,
            config_files: rules.config_files,
            config_extensions: rules.config_extensions,
        }
    }
}

impl From<&ClassifyConfig> for ClassifierRules {
    fn from(config: &ClassifyConfig) -> Self {
        // Extensions are matched without the leading dot
        let strip = |ext: &String| ext.trim_start_matches('.').to_string();
        Self {
            test_suffix: config.test_suffix.clone(),
            source_extension: strip(&config.source_extension),
            dependency_files: config.dependency_files.clone(),
            config_files: config.config_files.clone(),
            config_extensions: config.config_extensions.iter().map(strip).collect(),
        }
    }
}

/// Test runner configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerConfig {
    #[serde(default = "default_command")]
    pub command: String,

    #[serde(default = "default_args")]
    pub args: Vec<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            args: default_args(),
        }
    }
}

fn default_command() -> String {
    "go".to_string()
}

fn default_args() -> Vec<String> {
    vec!["test".to_string(), "-json".to_string()]
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub color: ColorMode,

    #[serde(default = "default_true")]
    pub unicode: bool,

    /// Width of the summary rule
    #[serde(default = "default_width")]
    pub width: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::default(),
            unicode: true,
            width: default_width(),
        }
    }
}

fn default_width() -> usize {
    80
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Parse `auto|always|never`, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "auto" => Some(ColorMode::Auto),
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            _ => None,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub watch: WatchConfig,

    #[serde(default)]
    pub classify: ClassifyConfig,

    #[serde(default)]
    pub runner: RunnerConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> SentinelResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> SentinelResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load from project config, user config, or defaults, then apply
    /// environment overrides
    pub fn discover(project_root: &Path) -> SentinelResult<(Self, Vec<ConfigWarning>)> {
        loader::discover(project_root)
    }

    /// Apply environment variable overrides (SENTINEL_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Classifier rules from the `[classify]` section
    pub fn classifier_rules(&self) -> ClassifierRules {
        ClassifierRules::from(&self.classify)
    }
}
