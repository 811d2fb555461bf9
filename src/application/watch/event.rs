//! Watch event types and options

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::application::resolver::BatchOutcome;
use crate::domain::entities::{RunStats, Suite};
use crate::domain::value_objects::ChangeKind;
use crate::error::SentinelResult;

use super::debounce::DEBOUNCE_MS;

/// Watch options
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Project root to watch
    pub root: PathBuf,
    /// Quiet period per path
    pub debounce: Duration,
    /// Gitignore-style patterns on top of `.sentinelignore`
    pub ignore: Vec<String>,
    /// Run the whole project once before waiting for changes
    pub run_on_start: bool,
    /// Output as NDJSON
    pub json: bool,
}

impl WatchOptions {
    /// Create new watch options with defaults
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            debounce: Duration::from_millis(DEBOUNCE_MS),
            ignore: Vec::new(),
            run_on_start: true,
            json: false,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_ignore(mut self, ignore: Vec<String>) -> Self {
        self.ignore = ignore;
        self
    }

    pub fn with_run_on_start(mut self, run_on_start: bool) -> Self {
        self.run_on_start = run_on_start;
        self
    }

    /// Set JSON output mode
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }
}

/// Watch event types for NDJSON output
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    /// Watch started
    WatchStarted {
        root: String,
        debounce_ms: u64,
        ignore_patterns: usize,
    },
    /// A settled change was classified
    FileChanged {
        path: String,
        kind: ChangeKind,
        affected_tests: Vec<String>,
    },
    /// Executor invoked
    RunStarted { test_paths: Vec<String> },
    /// Executor finished
    RunComplete {
        suites: usize,
        passed: usize,
        failed: usize,
        skipped: usize,
        duration_ms: u64,
    },
    /// Changes seen, nothing stale
    NoRunNeeded { changes: usize },
    /// Run aborted, nothing cached
    RunCancelled,
    /// Error occurred
    Error { message: String },
    /// Watch stopped
    Shutdown,
}

impl WatchEvent {
    /// Convert to JSON string with "command": "watch" field included
    pub fn to_json(&self) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("watch"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }

    pub(crate) fn run_complete(stats: &RunStats) -> Self {
        WatchEvent::RunComplete {
            suites: stats.total_files,
            passed: stats.passed_tests,
            failed: stats.failed_tests,
            skipped: stats.skipped_tests,
            duration_ms: stats.duration.as_millis().min(u128::from(u64::MAX)) as u64,
        }
    }
}

/// Receives everything the watch loop reports
pub trait WatchSink {
    /// Lifecycle and per-change events, in order
    fn event(&mut self, event: WatchEvent);

    /// Called once per processed batch, after its events, with the current
    /// suite view and its aggregate stats
    fn batch(
        &mut self,
        _outcome: &BatchOutcome,
        _suites: &BTreeMap<String, Suite>,
        _stats: &RunStats,
    ) -> SentinelResult<()> {
        Ok(())
    }
}

impl<F> WatchSink for F
where
    F: FnMut(WatchEvent),
{
    fn event(&mut self, event: WatchEvent) {
        self(event)
    }
}
