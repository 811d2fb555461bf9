//! Change classifier
//!
//! Maps a path to a [`ChangeKind`] by name alone. Content only matters for
//! the optional hash, which is computed separately so that classification
//! itself can never fail.

use std::path::Path;

use crate::domain::value_objects::{ChangeKind, ContentHash};
use crate::error::SentinelResult;

/// Naming rules the classifier matches against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierRules {
    /// Filename suffix of test files
    pub test_suffix: String,
    /// Extension (without dot) of source files
    pub source_extension: String,
    /// Module manifest / lock file names
    pub dependency_files: Vec<String>,
    /// Project config file names
    pub config_files: Vec<String>,
    /// Extensions (without dot) always treated as config
    pub config_extensions: Vec<String>,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            test_suffix: "_test.go".to_string(),
            source_extension: "go".to_string(),
            dependency_files: vec!["go.mod".to_string(), "go.sum".to_string()],
            config_files: vec![
                "sentinel.toml".to_string(),
                "sentinel.config.json".to_string(),
                ".golangci.yml".to_string(),
                ".golangci.yaml".to_string(),
            ],
            config_extensions: Vec::new(),
        }
    }
}

/// Result of inspecting one path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub kind: ChangeKind,
    /// `None` when the file could not be read
    pub content_hash: Option<ContentHash>,
}

#[derive(Debug, Clone, Default)]
pub struct ChangeClassifier {
    rules: ClassifierRules,
}

impl ChangeClassifier {
    pub fn new(rules: ClassifierRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ClassifierRules {
        &self.rules
    }

    /// Classify by name. First match wins:
    /// dependency manifest, config, test file, source file, then config as
    /// the catch-all.
    pub fn classify(&self, path: &Path) -> ChangeKind {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy())
            .unwrap_or_default();

        if self.rules.dependency_files.iter().any(|f| *f == name) {
            ChangeKind::Dependency
        } else if self.rules.config_files.iter().any(|f| *f == name)
            || self.rules.config_extensions.iter().any(|e| *e == ext)
        {
            ChangeKind::Config
        } else if name.ends_with(self.rules.test_suffix.as_str()) {
            ChangeKind::Test
        } else if !ext.is_empty() && ext == self.rules.source_extension.as_str() {
            ChangeKind::Source
        } else {
            ChangeKind::Config
        }
    }

    /// Classify and hash.
    ///
    /// With `require_hash`, a missing file is `NotFound`. Without it, an
    /// unreadable file still classifies and simply carries no hash; callers
    /// must treat that as changed.
    pub fn inspect(&self, path: &Path, require_hash: bool) -> SentinelResult<Classification> {
        let kind = self.classify(path);
        let content_hash = match ContentHash::from_file(path) {
            Ok(hash) => Some(hash),
            Err(e) if require_hash => return Err(e),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "classified without hash");
                None
            }
        };
        Ok(Classification { kind, content_hash })
    }
}
