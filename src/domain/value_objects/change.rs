//! Classified file changes

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

use serde::Serialize;

use super::hash::ContentHash;

/// Test path that stands for the whole project
pub const ROOT_TEST_PATH: &str = ".";

/// What a changed file is, as far as rerun decisions go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    /// A test file (`*_test.go`)
    Test,
    /// A non-test source file
    Source,
    /// Project configuration, and anything not otherwise recognized
    Config,
    /// Module manifest or lock file (`go.mod`, `go.sum`)
    Dependency,
}

impl ChangeKind {
    /// Human label used in change summaries
    pub fn label(&self) -> &'static str {
        match self {
            ChangeKind::Test => "test file",
            ChangeKind::Source => "source file",
            ChangeKind::Config => "config file",
            ChangeKind::Dependency => "dependency",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One observed filesystem event, already classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    pub path: PathBuf,
    pub kind: ChangeKind,
    /// No processed timestamp was recorded for this path yet
    pub is_new: bool,
    /// `None` when the file could not be read (e.g. deleted)
    pub content_hash: Option<ContentHash>,
    pub timestamp: SystemTime,
    /// Filled in by the staleness resolver, not by the classifier
    pub affected_tests: Vec<String>,
}

impl FileChange {
    pub fn new(path: impl Into<PathBuf>, kind: ChangeKind) -> Self {
        Self {
            path: path.into(),
            kind,
            is_new: false,
            content_hash: None,
            timestamp: SystemTime::now(),
            affected_tests: Vec::new(),
        }
    }

    pub fn with_new(mut self, is_new: bool) -> Self {
        self.is_new = is_new;
        self
    }

    pub fn with_timestamp(mut self, timestamp: SystemTime) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_affected_tests(mut self, tests: Vec<String>) -> Self {
        self.affected_tests = tests;
        self
    }
}

/// Directory of `path`, as a test path.
///
/// Files at the project root belong to `"."`.
pub fn owning_test_path(path: &Path) -> String {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => to_test_path(parent),
        _ => ROOT_TEST_PATH.to_string(),
    }
}

fn to_test_path(dir: &Path) -> String {
    let cleaned: PathBuf = dir
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if cleaned.as_os_str().is_empty() {
        ROOT_TEST_PATH.to_string()
    } else {
        cleaned.to_string_lossy().replace('\\', "/")
    }
}
