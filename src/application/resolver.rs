//! Staleness resolver
//!
//! Glue between settled file events, the result cache and the test
//! executor. Paths are queued with [`StalenessResolver::submit`] and turned
//! into at most one executor invocation per [`StalenessResolver::run_pending`]
//! call. While a run is in flight, further submissions wait in the backlog
//! for the next call.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use crate::application::cache::ResultCache;
use crate::domain::entities::Suite;
use crate::domain::ports::{CancelToken, ExecutionOutcome, TestExecutor};
use crate::domain::value_objects::{ContentHash, FileChange, ROOT_TEST_PATH};
use crate::error::{SentinelError, SentinelResult};

/// What one batch decided and produced
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Classified changes, in arrival order, with affected tests filled in
    pub changes: Vec<FileChange>,
    /// Paths that could not be analyzed
    pub errors: Vec<(PathBuf, SentinelError)>,
    /// Events dropped because the content hash did not change
    pub unchanged: usize,
    /// Whether the executor was invoked
    pub ran: bool,
    pub test_paths: Vec<String>,
    /// Suites returned by a completed run
    pub suites: BTreeMap<String, Suite>,
    pub cancelled: bool,
    pub duration: Duration,
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty() && !self.cancelled
    }
}

/// Clears the in-flight flag when a batch ends, however it ends
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct StalenessResolver {
    cache: Arc<ResultCache>,
    executor: Arc<dyn TestExecutor>,
    backlog: Mutex<Vec<PathBuf>>,
    in_flight: AtomicBool,
    /// Last hash seen per path, to drop touch/auto-save noise
    seen_hashes: Mutex<HashMap<PathBuf, ContentHash>>,
}

impl StalenessResolver {
    pub fn new(cache: Arc<ResultCache>, executor: Arc<dyn TestExecutor>) -> Self {
        Self {
            cache,
            executor,
            backlog: Mutex::new(Vec::new()),
            in_flight: AtomicBool::new(false),
            seen_hashes: Mutex::new(HashMap::new()),
        }
    }

    pub fn cache(&self) -> &Arc<ResultCache> {
        &self.cache
    }

    /// Queue settled paths for the next batch
    pub fn submit<I>(&self, paths: I)
    where
        I: IntoIterator<Item = PathBuf>,
    {
        self.backlog.lock().extend(paths);
    }

    pub fn pending(&self) -> usize {
        self.backlog.lock().len()
    }

    pub fn is_running(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Run the whole project regardless of cache state
    pub fn run_all(&self, cancel: &CancelToken) -> SentinelResult<Option<BatchOutcome>> {
        let Some(_guard) = self.begin() else {
            return Ok(None);
        };
        let mut outcome = BatchOutcome::default();
        self.execute(vec![ROOT_TEST_PATH.to_string()], cancel, &mut outcome)?;
        Ok(Some(outcome))
    }

    /// Process everything in the backlog as one batch.
    ///
    /// Returns `None` when a run is already in flight (the backlog is kept)
    /// or when there is nothing to process.
    pub fn run_pending(&self, cancel: &CancelToken) -> SentinelResult<Option<BatchOutcome>> {
        let Some(_guard) = self.begin() else {
            tracing::debug!(pending = self.pending(), "run in flight, deferring batch");
            return Ok(None);
        };

        let paths = {
            let mut backlog = self.backlog.lock();
            let mut seen = HashSet::new();
            let mut unique = Vec::with_capacity(backlog.len());
            for path in backlog.drain(..) {
                if seen.insert(path.clone()) {
                    unique.push(path);
                }
            }
            unique
        };
        if paths.is_empty() {
            return Ok(None);
        }

        let mut outcome = BatchOutcome::default();
        for path in paths {
            let change = match self.cache.analyze_change(&path) {
                Ok(change) => change,
                Err(SentinelError::NotFound { .. }) => self.cache.analyze_removal(&path),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to analyze change");
                    outcome.errors.push((path, e));
                    continue;
                }
            };
            if self.is_noise(&change) {
                tracing::trace!(path = %change.path.display(), "content unchanged, skipping");
                outcome.unchanged += 1;
                continue;
            }
            outcome.changes.push(change);
        }

        let (run, test_paths) = self.cache.should_run_tests(&outcome.changes);
        for change in &mut outcome.changes {
            change.affected_tests = self.cache.resolve_affected_tests(change);
            self.cache.mark_processed(&change.path, change.timestamp);
        }

        tracing::debug!(
            changes = outcome.changes.len(),
            run,
            test_paths = ?test_paths,
            "resolved batch"
        );

        if run {
            if let Err(e) = self.execute(test_paths, cancel, &mut outcome) {
                self.forget(&outcome.changes);
                return Err(e);
            }
            if outcome.cancelled {
                self.forget(&outcome.changes);
            }
        }
        Ok(Some(outcome))
    }

    fn begin(&self) -> Option<InFlight<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| InFlight(&self.in_flight))
    }

    fn execute(
        &self,
        test_paths: Vec<String>,
        cancel: &CancelToken,
        outcome: &mut BatchOutcome,
    ) -> SentinelResult<()> {
        let started = Instant::now();
        outcome.ran = true;
        outcome.test_paths = test_paths;

        match self.executor.run(&outcome.test_paths, cancel)? {
            ExecutionOutcome::Completed(suites) => {
                for (test_path, suite) in &suites {
                    self.cache.cache_result(test_path, suite.clone());
                }
                outcome.suites = suites;
            }
            ExecutionOutcome::Cancelled => {
                tracing::info!("test run cancelled, discarding partial results");
                outcome.cancelled = true;
            }
        }
        outcome.duration = started.elapsed();
        Ok(())
    }

    /// Drop remembered hashes so an unchanged save retriggers these paths
    fn forget(&self, changes: &[FileChange]) {
        let mut seen = self.seen_hashes.lock();
        for change in changes {
            seen.remove(&change.path);
        }
    }

    /// True when the change carries the same hash as the last one seen for
    /// its path. Unreadable files are never noise.
    fn is_noise(&self, change: &FileChange) -> bool {
        let mut seen = self.seen_hashes.lock();
        match &change.content_hash {
            Some(hash) => {
                let previous = seen.insert(change.path.clone(), hash.clone());
                previous.as_ref() == Some(hash)
            }
            None => {
                seen.remove(&change.path);
                false
            }
        }
    }
}
