//! Dependency-aware result cache

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::{Component, Path, PathBuf};
use std::time::SystemTime;

use ignore::WalkBuilder;
use parking_lot::RwLock;
use serde::Serialize;

use crate::domain::entities::{Suite, TestStatus};
use crate::domain::services::ChangeClassifier;
use crate::domain::value_objects::{
    owning_test_path, ChangeKind, ContentHash, FileChange, ROOT_TEST_PATH,
};
use crate::error::{SentinelError, SentinelResult};

/// Last known outcome of one test path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedResult {
    pub key: String,
    pub suite: Suite,
    /// Combined hash of `depends_on` at write time. Informational only.
    pub source_hash: Option<ContentHash>,
    pub last_run: SystemTime,
    pub status: TestStatus,
    /// Files (relative to the project root) whose processing after
    /// `last_run` invalidates this entry
    pub depends_on: BTreeSet<PathBuf>,
}

impl CachedResult {
    fn new(key: String, suite: Suite, depends_on: BTreeSet<PathBuf>) -> Self {
        let status = suite.status();
        Self {
            key,
            suite,
            source_hash: None,
            last_run: SystemTime::now(),
            status,
            depends_on,
        }
    }
}

/// Entry counts, for observability
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub cached_results: usize,
    pub tracked_files: usize,
    pub tracked_tests: usize,
}

#[derive(Debug, Default)]
struct CacheState {
    results: HashMap<String, CachedResult>,
    /// Last processed time per file, keyed relative to the root
    file_times: HashMap<PathBuf, SystemTime>,
    /// Last run time per test path
    test_times: HashMap<String, SystemTime>,
}

impl CacheState {
    fn is_valid(&self, entry: &CachedResult) -> bool {
        entry.depends_on.iter().all(|dep| {
            self.file_times
                .get(dep)
                .map_or(true, |processed| *processed <= entry.last_run)
        })
    }

    fn affected_by(&self, change: &FileChange, path: &Path) -> Vec<String> {
        match change.kind {
            ChangeKind::Test | ChangeKind::Source => vec![owning_test_path(path)],
            ChangeKind::Config => {
                let mut keys: Vec<String> = self.results.keys().cloned().collect();
                keys.sort();
                keys
            }
            ChangeKind::Dependency if !change.affected_tests.is_empty() => {
                change.affected_tests.clone()
            }
            ChangeKind::Dependency => {
                let mut keys: Vec<String> = self
                    .results
                    .values()
                    .filter(|entry| entry.depends_on.contains(path))
                    .map(|entry| entry.key.clone())
                    .collect();
                keys.sort();
                keys
            }
        }
    }
}

/// In-memory cache of test outcomes keyed by test path.
///
/// One lock guards all maps. File metadata and hashing always happen before
/// the lock is taken.
#[derive(Debug)]
pub struct ResultCache {
    root: PathBuf,
    classifier: ChangeClassifier,
    state: RwLock<CacheState>,
}

impl ResultCache {
    pub fn new(root: impl Into<PathBuf>, classifier: ChangeClassifier) -> Self {
        Self {
            root: root.into(),
            classifier,
            state: RwLock::new(CacheState::default()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Stat, classify and hash `path`.
    ///
    /// `is_new` is set when no processed time was recorded for the path.
    /// Nothing is recorded here; see [`ResultCache::mark_processed`].
    pub fn analyze_change(&self, path: &Path) -> SentinelResult<FileChange> {
        let rel = self.relative(path);
        let abs = self.absolute(&rel);

        let metadata = std::fs::metadata(&abs).map_err(|e| SentinelError::from_stat(&abs, e))?;
        let timestamp = metadata.modified().unwrap_or_else(|_| SystemTime::now());
        let classification = self.classifier.inspect(&abs, false)?;

        let is_new = !self.state.read().file_times.contains_key(&rel);

        let mut change = FileChange::new(rel, classification.kind)
            .with_new(is_new)
            .with_timestamp(timestamp);
        change.content_hash = classification.content_hash;
        Ok(change)
    }

    /// Build a change for a path that no longer exists.
    ///
    /// Deletions still classify by name; they carry no hash and are stamped
    /// with the current time.
    pub fn analyze_removal(&self, path: &Path) -> FileChange {
        let rel = self.relative(path);
        let kind = self.classifier.classify(&rel);
        let is_new = !self.state.read().file_times.contains_key(&rel);
        FileChange::new(rel, kind).with_new(is_new)
    }

    /// Record that `path` was handled at `when`. Last write wins.
    pub fn mark_processed(&self, path: &Path, when: SystemTime) {
        let rel = self.relative(path);
        self.state.write().file_times.insert(rel, when);
    }

    /// Store `suite` for `test_path`, overwriting any previous entry.
    ///
    /// Dependencies are the non-test source and config files directly in the
    /// test path's directory plus the module manifests at the root.
    pub fn cache_result(&self, test_path: &str, suite: Suite) {
        let key = normalize_test_path(test_path);
        let depends_on = self.collect_dependencies(&key);
        self.store(key, suite, depends_on);
    }

    /// Store `suite` with an explicit dependency set
    pub fn cache_result_with<I>(&self, test_path: &str, suite: Suite, depends_on: I)
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let key = normalize_test_path(test_path);
        let depends_on = depends_on
            .into_iter()
            .map(|p| self.relative(&p))
            .collect();
        self.store(key, suite, depends_on);
    }

    fn store(&self, key: String, suite: Suite, depends_on: BTreeSet<PathBuf>) {
        let hashes: Vec<ContentHash> = depends_on
            .iter()
            .filter_map(|dep| ContentHash::from_file(&self.absolute(dep)).ok())
            .collect();
        let mut entry = CachedResult::new(key.clone(), suite, depends_on);
        if !hashes.is_empty() {
            entry.source_hash = Some(ContentHash::combine(&hashes));
        }

        tracing::debug!(
            test_path = %key,
            status = ?entry.status,
            dependencies = entry.depends_on.len(),
            "cached result"
        );

        let mut state = self.state.write();
        state.test_times.insert(key.clone(), entry.last_run);
        state.results.insert(key, entry);
    }

    /// Valid entry for `test_path`, if any.
    ///
    /// An entry whose dependency was processed after its last run is
    /// reported as missing but stays in the cache.
    pub fn get_cached_result(&self, test_path: &str) -> Option<CachedResult> {
        let key = normalize_test_path(test_path);
        let state = self.state.read();
        let entry = state.results.get(&key)?;
        if state.is_valid(entry) {
            Some(entry.clone())
        } else {
            tracing::trace!(test_path = %key, "cached result is stale");
            None
        }
    }

    /// Entry for `test_path` without validation
    pub fn peek(&self, test_path: &str) -> Option<CachedResult> {
        let key = normalize_test_path(test_path);
        self.state.read().results.get(&key).cloned()
    }

    pub fn is_valid(&self, test_path: &str) -> bool {
        self.get_cached_result(test_path).is_some()
    }

    /// Suites of every entry, valid or not, keyed by test path
    pub fn suites(&self) -> BTreeMap<String, Suite> {
        self.state
            .read()
            .results
            .iter()
            .map(|(key, entry)| (key.clone(), entry.suite.clone()))
            .collect()
    }

    /// Decide whether `changes` require a run, and over which test paths.
    ///
    /// Stale paths win; a batch with new files but nothing stale falls back
    /// to the whole project.
    pub fn should_run_tests(&self, changes: &[FileChange]) -> (bool, Vec<String>) {
        if changes.is_empty() {
            return (false, Vec::new());
        }

        let stale = self.get_stale_tests(changes);
        if !stale.is_empty() {
            return (true, stale);
        }

        if changes.iter().any(|c| c.is_new) {
            return (true, vec![ROOT_TEST_PATH.to_string()]);
        }

        (false, Vec::new())
    }

    /// Test paths affected by `changes`, deduplicated
    pub fn get_stale_tests(&self, changes: &[FileChange]) -> Vec<String> {
        let state = self.state.read();
        let mut seen = BTreeSet::new();
        let mut stale = Vec::new();
        for change in changes {
            let rel = self.relative(&change.path);
            for test_path in state.affected_by(change, &rel) {
                if seen.insert(test_path.clone()) {
                    stale.push(test_path);
                }
            }
        }
        stale
    }

    /// Test paths a single change affects
    pub fn resolve_affected_tests(&self, change: &FileChange) -> Vec<String> {
        let rel = self.relative(&change.path);
        self.state.read().affected_by(change, &rel)
    }

    /// Drop every entry and every recorded time
    pub fn clear(&self) {
        *self.state.write() = CacheState::default();
    }

    pub fn stats(&self) -> CacheStats {
        let state = self.state.read();
        CacheStats {
            cached_results: state.results.len(),
            tracked_files: state.file_times.len(),
            tracked_tests: state.test_times.len(),
        }
    }

    fn collect_dependencies(&self, key: &str) -> BTreeSet<PathBuf> {
        let rules = self.classifier.rules();
        let dir = if key == ROOT_TEST_PATH {
            self.root.clone()
        } else {
            self.root.join(key)
        };

        let mut deps = BTreeSet::new();
        let walker = WalkBuilder::new(&dir)
            .standard_filters(false)
            .max_depth(Some(1))
            .build();
        for entry in walker.flatten() {
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let path = entry.path();
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let explicit_config = rules.config_files.iter().any(|f| *f == name);
            let kind = self.classifier.classify(path);
            if kind == ChangeKind::Source || (kind == ChangeKind::Config && explicit_config) {
                deps.insert(self.relative(path));
            }
        }

        for manifest in rules.dependency_files.iter().chain(&rules.config_files) {
            if self.root.join(manifest).is_file() {
                deps.insert(PathBuf::from(manifest));
            }
        }
        deps
    }

    fn relative(&self, path: &Path) -> PathBuf {
        let stripped = if path.is_absolute() {
            path.strip_prefix(&self.root).unwrap_or(path)
        } else {
            path
        };
        stripped
            .components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect()
    }

    fn absolute(&self, rel: &Path) -> PathBuf {
        if rel.is_absolute() {
            rel.to_path_buf()
        } else {
            self.root.join(rel)
        }
    }
}

/// Canonical form of a test path: no leading `./`, no trailing `/`, and
/// `"."` for the project root.
pub fn normalize_test_path(test_path: &str) -> String {
    let trimmed = test_path.trim().trim_end_matches('/');
    let mut rest = trimmed;
    while let Some(stripped) = rest.strip_prefix("./") {
        rest = stripped;
    }
    if rest.is_empty() || rest == "." {
        ROOT_TEST_PATH.to_string()
    } else {
        rest.to_string()
    }
}
