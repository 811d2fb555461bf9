//! Watch Use Case implementation

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::application::resolver::{BatchOutcome, StalenessResolver};
use crate::domain::entities::RunStats;
use crate::domain::ports::CancelToken;
use crate::domain::value_objects::IgnorePatterns;
use crate::error::SentinelResult;

use super::debounce::Debouncer;
use super::event::{WatchEvent, WatchOptions, WatchSink};

/// Upper bound on how long the loop blocks waiting for an event
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// notify sometimes replays events for existing files right after the
/// watch is registered
const STARTUP_COOLDOWN: Duration = Duration::from_millis(500);

/// Watch Use Case
///
/// Owns the loop: raw events are filtered, debounced per path, handed to
/// the resolver in batches, and reported to a [`WatchSink`].
pub struct WatchUseCase {
    options: WatchOptions,
    resolver: Arc<StalenessResolver>,
}

impl WatchUseCase {
    pub fn new(options: WatchOptions, resolver: Arc<StalenessResolver>) -> Self {
        Self { options, resolver }
    }

    pub fn options(&self) -> &WatchOptions {
        &self.options
    }

    /// Start watching (blocking)
    ///
    /// Returns once `running` is cleared. `cancel` is handed to every
    /// executor run so an in-flight run can be aborted as well.
    pub fn start<S>(
        &self,
        running: Arc<AtomicBool>,
        cancel: &CancelToken,
        sink: &mut S,
    ) -> SentinelResult<()>
    where
        S: WatchSink + ?Sized,
    {
        let ignore = IgnorePatterns::load(&self.options.root, &self.options.ignore)?;
        sink.event(WatchEvent::WatchStarted {
            root: self.options.root.display().to_string(),
            debounce_ms: self.options.debounce.as_millis().min(u128::from(u64::MAX)) as u64,
            ignore_patterns: ignore.pattern_count(),
        });
        let session_start = Local::now();

        let (tx, rx) = channel();
        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| match res {
                Ok(event) if !matches!(event.kind, EventKind::Access(_)) => {
                    for path in event.paths {
                        let _ = tx.send(path);
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "watcher error"),
            },
            Config::default(),
        )?;
        watcher.watch(&self.options.root, RecursiveMode::Recursive)?;
        tracing::info!(root = %self.options.root.display(), "watching");

        let cooldown_end = Instant::now() + STARTUP_COOLDOWN;
        while Instant::now() < cooldown_end {
            let _ = rx.recv_timeout(POLL_INTERVAL);
        }

        if self.options.run_on_start && running.load(Ordering::SeqCst) {
            self.report(self.resolver.run_all(cancel), sink, session_start)?;
        }

        let mut debouncer = Debouncer::new(self.options.debounce);
        while running.load(Ordering::SeqCst) {
            let timeout = debouncer
                .next_deadline()
                .map(|deadline| deadline.saturating_duration_since(Instant::now()))
                .map_or(POLL_INTERVAL, |d| d.min(POLL_INTERVAL));

            if let Ok(path) = rx.recv_timeout(timeout) {
                self.accept(path, &ignore, &mut debouncer);
                while let Ok(path) = rx.try_recv() {
                    self.accept(path, &ignore, &mut debouncer);
                }
            }

            let settled = debouncer.settled(Instant::now());
            if !settled.is_empty() {
                tracing::debug!(paths = settled.len(), "changes settled");
                self.resolver.submit(settled);
            }

            if self.resolver.pending() > 0 {
                let result = self.resolver.run_pending(cancel);
                self.report(result, sink, session_start)?;
            }
        }

        sink.event(WatchEvent::Shutdown);
        Ok(())
    }

    fn accept(&self, path: PathBuf, ignore: &IgnorePatterns, debouncer: &mut Debouncer) {
        let is_dir = path.is_dir();
        if is_dir || ignore.is_ignored(&path, is_dir) {
            return;
        }
        debouncer.record(path, Instant::now());
    }

    /// Turn one batch result into sink calls.
    ///
    /// Batch failures are reported and swallowed; only sink failures
    /// propagate.
    pub(crate) fn report<S>(
        &self,
        result: SentinelResult<Option<BatchOutcome>>,
        sink: &mut S,
        session_start: DateTime<Local>,
    ) -> SentinelResult<()>
    where
        S: WatchSink + ?Sized,
    {
        let outcome = match result {
            Ok(Some(outcome)) => outcome,
            Ok(None) => return Ok(()),
            Err(e) => {
                tracing::error!(error = %e, "batch failed");
                sink.event(WatchEvent::Error {
                    message: e.to_string(),
                });
                return Ok(());
            }
        };

        for (path, err) in &outcome.errors {
            sink.event(WatchEvent::Error {
                message: format!("{}: {}", path.display(), err),
            });
        }
        for change in &outcome.changes {
            sink.event(WatchEvent::FileChanged {
                path: change.path.display().to_string(),
                kind: change.kind,
                affected_tests: change.affected_tests.clone(),
            });
        }

        if outcome.ran {
            sink.event(WatchEvent::RunStarted {
                test_paths: outcome.test_paths.clone(),
            });
            if outcome.cancelled {
                sink.event(WatchEvent::RunCancelled);
                return Ok(());
            }
        } else if outcome.changes.is_empty() {
            return Ok(());
        } else {
            sink.event(WatchEvent::NoRunNeeded {
                changes: outcome.changes.len(),
            });
        }

        let suites = self.resolver.cache().suites();
        let stats = RunStats::from_suites(&suites, outcome.duration).with_start(session_start);
        if outcome.ran {
            sink.event(WatchEvent::run_complete(&stats));
        }
        sink.batch(&outcome, &suites, &stats)
    }
}
