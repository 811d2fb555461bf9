//! Watch ignore patterns
//!
//! Filters raw watcher events with gitignore semantics before they reach the
//! debouncer. Patterns come from `[watch] ignore` in the config plus an
//! optional `.sentinelignore` file at the project root.

use std::fs;
use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use thiserror::Error;

/// Name of the optional ignore file at the project root
pub const IGNORE_FILE: &str = ".sentinelignore";

/// Maximum file size for `.sentinelignore` (64KB)
const MAX_FILE_SIZE: u64 = 65536;

/// Maximum number of patterns allowed
const MAX_PATTERNS: usize = 1000;

/// Compiled ignore patterns anchored at the project root.
#[derive(Debug)]
pub struct IgnorePatterns {
    root: PathBuf,
    matcher: Gitignore,
    pattern_count: usize,
}

impl Default for IgnorePatterns {
    fn default() -> Self {
        Self::empty()
    }
}

impl IgnorePatterns {
    /// A pattern set that matches nothing.
    pub fn empty() -> Self {
        Self {
            root: PathBuf::new(),
            matcher: Gitignore::empty(),
            pattern_count: 0,
        }
    }

    /// Build from configured patterns plus `.sentinelignore` under `root`.
    ///
    /// A missing ignore file is not an error.
    pub fn load(root: &Path, configured: &[String]) -> Result<Self, IgnoreError> {
        let ignore_path = root.join(IGNORE_FILE);
        let file_content = if ignore_path.exists() {
            let metadata = fs::metadata(&ignore_path).map_err(IgnoreError::Io)?;
            if metadata.len() > MAX_FILE_SIZE {
                return Err(IgnoreError::FileTooLarge {
                    path: ignore_path,
                    size: metadata.len(),
                    limit: MAX_FILE_SIZE,
                });
            }
            fs::read_to_string(&ignore_path).map_err(IgnoreError::Io)?
        } else {
            String::new()
        };

        let mut lines: Vec<&str> = configured.iter().map(String::as_str).collect();
        lines.extend(file_content.lines());
        Self::from_lines(root, &lines)
    }

    /// Compile pattern lines. Blank lines and `#` comments are skipped.
    pub fn from_lines(root: &Path, lines: &[&str]) -> Result<Self, IgnoreError> {
        let mut builder = GitignoreBuilder::new(root);
        let mut pattern_count = 0;

        for line in lines {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            pattern_count += 1;
            if pattern_count > MAX_PATTERNS {
                return Err(IgnoreError::TooManyPatterns {
                    count: pattern_count,
                    limit: MAX_PATTERNS,
                });
            }

            builder
                .add_line(None, trimmed)
                .map_err(|e| IgnoreError::InvalidPattern {
                    pattern: trimmed.to_string(),
                    message: e.to_string(),
                })?;
        }

        let matcher = builder
            .build()
            .map_err(|e| IgnoreError::BuildFailed(e.to_string()))?;

        Ok(Self {
            root: root.to_path_buf(),
            matcher,
            pattern_count,
        })
    }

    /// Check if a path should be ignored.
    ///
    /// Absolute paths are made relative to the root first; absolute paths
    /// outside the root are never ignored.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        if self.pattern_count == 0 {
            return false;
        }
        let rel = if path.has_root() {
            match path.strip_prefix(&self.root) {
                Ok(rel) => rel,
                Err(_) => return false,
            }
        } else {
            path
        };
        if rel.as_os_str().is_empty() {
            return false;
        }
        self.matcher
            .matched_path_or_any_parents(rel, is_dir)
            .is_ignore()
    }

    /// Get the number of patterns loaded.
    pub fn pattern_count(&self) -> usize {
        self.pattern_count
    }

    /// Check if this is an empty pattern set.
    pub fn is_empty(&self) -> bool {
        self.pattern_count == 0
    }
}

/// Errors that can occur when loading ignore patterns.
#[derive(Debug, Error)]
pub enum IgnoreError {
    #[error(".sentinelignore exceeds {limit} byte limit ({size} bytes): {}", .path.display())]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("{count} ignore patterns exceeds the {limit} limit")]
    TooManyPatterns { count: usize, limit: usize },

    #[error("invalid ignore pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("failed to build ignore matcher: {0}")]
    BuildFailed(String),

    #[error("IO error reading .sentinelignore: {0}")]
    Io(#[source] std::io::Error),
}

impl From<IgnoreError> for crate::error::SentinelError {
    fn from(err: IgnoreError) -> Self {
        match err {
            IgnoreError::InvalidPattern { pattern, message } => {
                crate::error::SentinelError::InvalidPattern { pattern, message }
            }
            IgnoreError::Io(e) => crate::error::SentinelError::Io(e),
            other => crate::error::SentinelError::InvalidPattern {
                pattern: IGNORE_FILE.to_string(),
                message: other.to_string(),
            },
        }
    }
}
