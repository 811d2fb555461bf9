//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{SentinelError, SentinelResult};

use super::types::{ColorMode, Config};

/// Project config file name, at the project root
pub const PROJECT_CONFIG_FILE: &str = "sentinel.toml";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> SentinelResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(&content, path)
}

pub(super) fn parse_with_warnings(
    content: &str,
    path: &Path,
) -> SentinelResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| SentinelError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Load from project config, user config, or defaults, then apply env
/// overrides.
///
/// Only the first file found is used. A file that exists but does not parse
/// is an error.
pub fn discover(project_root: &Path) -> SentinelResult<(Config, Vec<ConfigWarning>)> {
    let candidates = std::iter::once(project_root.join(PROJECT_CONFIG_FILE))
        .chain(user_config_path());

    for candidate in candidates {
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "loading config");
            let (config, warnings) = load_with_warnings(&candidate)?;
            return Ok((with_env_overrides(config), warnings));
        }
    }

    Ok((with_env_overrides(Config::default()), Vec::new()))
}

/// `<config_dir>/sentinel/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sentinel").join("config.toml"))
}

/// Apply environment variable overrides (SENTINEL_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_env(config, |key| std::env::var(key).ok())
}

pub(crate) fn apply_env<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    // SENTINEL_DEBOUNCE_MS
    if let Some(value) = lookup("SENTINEL_DEBOUNCE_MS") {
        match value.trim().parse::<u64>() {
            Ok(ms) => config.watch.debounce_ms = ms,
            Err(_) => tracing::warn!(value = %value, "ignoring invalid SENTINEL_DEBOUNCE_MS"),
        }
    }

    // SENTINEL_COLOR
    if let Some(value) = lookup("SENTINEL_COLOR") {
        match ColorMode::parse(&value) {
            Some(mode) => config.output.color = mode,
            None => tracing::warn!(value = %value, "ignoring invalid SENTINEL_COLOR"),
        }
    }

    // SENTINEL_TEST_COMMAND: "go" or a full command line such as "go test -json -race"
    if let Some(value) = lookup("SENTINEL_TEST_COMMAND") {
        let mut parts = value.split_whitespace().map(str::to_string);
        if let Some(command) = parts.next() {
            config.runner.command = command;
            let args: Vec<String> = parts.collect();
            if !args.is_empty() {
                config.runner.args = args;
            }
        }
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

pub(super) fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "watch",
        "debounce_ms",
        "ignore",
        "run_on_start",
        "classify",
        "test_suffix",
        "source_extension",
        "dependency_files",
        "config_files",
        "config_extensions",
        "runner",
        "command",
        "args",
        "output",
        "color",
        "unicode",
        "width",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

pub(super) fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
