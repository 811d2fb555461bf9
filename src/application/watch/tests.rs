//! Tests for the watch module

use super::debounce::{Debouncer, DEBOUNCE_MS};
use super::event::{WatchEvent, WatchOptions, WatchSink};
use super::use_case::WatchUseCase;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::tempdir;

use crate::application::cache::ResultCache;
use crate::application::resolver::{BatchOutcome, StalenessResolver};
use crate::domain::entities::{RunStats, Suite, TestCase};
use crate::domain::ports::{CancelToken, ExecutionOutcome, TestExecutor};
use crate::domain::services::ChangeClassifier;
use crate::domain::value_objects::ChangeKind;
use crate::error::{SentinelError, SentinelResult};

struct PassingExecutor;

impl TestExecutor for PassingExecutor {
    fn run(&self, test_paths: &[String], _cancel: &CancelToken) -> SentinelResult<ExecutionOutcome> {
        Ok(ExecutionOutcome::Completed(
            test_paths
                .iter()
                .map(|p| (p.clone(), Suite::new(vec![TestCase::passed("TestOk")])))
                .collect(),
        ))
    }
}

struct BrokenExecutor;

impl TestExecutor for BrokenExecutor {
    fn run(&self, _test_paths: &[String], _cancel: &CancelToken) -> SentinelResult<ExecutionOutcome> {
        Err(SentinelError::Executor {
            message: "go: command not found".to_string(),
        })
    }
}

/// Collects events and counts batch callbacks
#[derive(Default)]
struct RecordingSink {
    events: Vec<WatchEvent>,
    batches: Vec<(usize, RunStats)>,
}

impl WatchSink for RecordingSink {
    fn event(&mut self, event: WatchEvent) {
        self.events.push(event);
    }

    fn batch(
        &mut self,
        _outcome: &BatchOutcome,
        suites: &BTreeMap<String, Suite>,
        stats: &RunStats,
    ) -> SentinelResult<()> {
        self.batches.push((suites.len(), stats.clone()));
        Ok(())
    }
}

fn use_case(root: PathBuf, executor: Arc<dyn TestExecutor>) -> WatchUseCase {
    let cache = Arc::new(ResultCache::new(&root, ChangeClassifier::default()));
    let resolver = Arc::new(StalenessResolver::new(cache, executor));
    WatchUseCase::new(WatchOptions::new(root), resolver)
}

// === WatchEvent tests ===

#[test]
fn test_watch_event_to_json_started() {
    let event = WatchEvent::WatchStarted {
        root: "/work/demo".to_string(),
        debounce_ms: 250,
        ignore_patterns: 3,
    };
    let json = event.to_json();
    assert!(json.contains("\"event\":\"watch_started\""));
    assert!(json.contains("\"command\":\"watch\""));
    assert!(json.contains("\"debounce_ms\":250"));
}

#[test]
fn test_watch_event_to_json_file_changed() {
    let event = WatchEvent::FileChanged {
        path: "pkg/a/a_test.go".to_string(),
        kind: ChangeKind::Test,
        affected_tests: vec!["pkg/a".to_string()],
    };
    let json = event.to_json();
    assert!(json.contains("\"event\":\"file_changed\""));
    assert!(json.contains("\"kind\":\"test\""));
    assert!(json.contains("\"affected_tests\":[\"pkg/a\"]"));
}

#[test]
fn test_watch_event_to_json_run_complete() {
    let event = WatchEvent::RunComplete {
        suites: 2,
        passed: 5,
        failed: 1,
        skipped: 0,
        duration_ms: 1200,
    };
    let json = event.to_json();
    assert!(json.contains("\"event\":\"run_complete\""));
    assert!(json.contains("\"passed\":5"));
    assert!(json.contains("\"failed\":1"));
}

#[test]
fn test_watch_event_to_json_error() {
    let event = WatchEvent::Error {
        message: "Something \"failed\"".to_string(),
    };
    let json = event.to_json();
    assert!(json.contains("\"event\":\"error\""));
    assert!(json.contains("\\\"failed\\\""));
}

// === Debouncer tests ===

#[test]
fn test_debouncer_waits_for_quiet_period() {
    let mut debouncer = Debouncer::new(Duration::from_millis(100));
    let t0 = Instant::now();

    debouncer.record(PathBuf::from("a.go"), t0);

    assert!(debouncer.settled(t0 + Duration::from_millis(50)).is_empty());
    assert_eq!(
        debouncer.settled(t0 + Duration::from_millis(100)),
        vec![PathBuf::from("a.go")]
    );
    assert!(!debouncer.has_pending());
}

#[test]
fn test_debouncer_resets_on_repeat_event() {
    let mut debouncer = Debouncer::new(Duration::from_millis(100));
    let t0 = Instant::now();

    debouncer.record(PathBuf::from("a.go"), t0);
    debouncer.record(PathBuf::from("a.go"), t0 + Duration::from_millis(80));

    assert!(debouncer.settled(t0 + Duration::from_millis(150)).is_empty());
    assert_eq!(debouncer.len(), 1);
    assert_eq!(
        debouncer.settled(t0 + Duration::from_millis(180)),
        vec![PathBuf::from("a.go")]
    );
}

#[test]
fn test_debouncer_paths_settle_independently() {
    let mut debouncer = Debouncer::new(Duration::from_millis(100));
    let t0 = Instant::now();

    debouncer.record(PathBuf::from("a.go"), t0);
    debouncer.record(PathBuf::from("b.go"), t0 + Duration::from_millis(60));

    assert_eq!(
        debouncer.settled(t0 + Duration::from_millis(120)),
        vec![PathBuf::from("a.go")]
    );
    assert_eq!(
        debouncer.next_deadline(),
        Some(t0 + Duration::from_millis(160))
    );
}

#[test]
fn test_debouncer_keeps_first_arrival_order() {
    let mut debouncer = Debouncer::default();
    let t0 = Instant::now();

    debouncer.record(PathBuf::from("b.go"), t0);
    debouncer.record(PathBuf::from("a.go"), t0);
    debouncer.record(PathBuf::from("b.go"), t0);

    let settled = debouncer.settled(t0 + Duration::from_millis(DEBOUNCE_MS));
    assert_eq!(settled, vec![PathBuf::from("b.go"), PathBuf::from("a.go")]);
}

#[test]
fn test_debouncer_event_storm_settles_in_arrival_order() {
    let mut debouncer = Debouncer::new(Duration::from_millis(100));
    let t0 = Instant::now();
    let paths: Vec<PathBuf> = (0..20_000)
        .map(|i| PathBuf::from(format!("gen/f{:05}.go", 19_999 - i)))
        .collect();

    for path in &paths {
        debouncer.record(path.clone(), t0);
    }
    for path in paths.iter().step_by(2) {
        debouncer.record(path.clone(), t0 + Duration::from_millis(10));
    }
    assert_eq!(debouncer.len(), paths.len());

    assert_eq!(debouncer.settled(t0 + Duration::from_millis(110)), paths);
    assert!(debouncer.is_empty());
}

#[test]
fn test_debouncer_empty_has_no_deadline() {
    let debouncer = Debouncer::default();
    assert!(debouncer.next_deadline().is_none());
    assert!(debouncer.is_empty());
}

// === WatchUseCase tests ===

#[test]
fn test_watch_stops_immediately_when_not_running() {
    let dir = tempdir().unwrap();
    let use_case = use_case(dir.path().to_path_buf(), Arc::new(PassingExecutor));

    let mut events = Vec::new();
    let running = Arc::new(AtomicBool::new(false));
    use_case
        .start(running, &CancelToken::new(), &mut |event: WatchEvent| {
            events.push(event.to_json())
        })
        .unwrap();

    assert!(events[0].contains("watch_started"));
    assert!(events.last().unwrap().contains("shutdown"));
    assert_eq!(events.len(), 2);
}

#[test]
fn test_watch_rejects_invalid_ignore_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".sentinelignore"), "x\n".repeat(40000)).unwrap();
    let use_case = use_case(dir.path().to_path_buf(), Arc::new(PassingExecutor));

    let mut sink = RecordingSink::default();
    let result = use_case.start(
        Arc::new(AtomicBool::new(false)),
        &CancelToken::new(),
        &mut sink,
    );
    assert!(matches!(result, Err(SentinelError::InvalidPattern { .. })));
}

#[test]
fn test_report_completed_run() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("pkg/a")).unwrap();
    fs::write(dir.path().join("pkg/a/a_test.go"), "package a\n").unwrap();
    let cache = Arc::new(ResultCache::new(dir.path(), ChangeClassifier::default()));
    let resolver = Arc::new(StalenessResolver::new(cache, Arc::new(PassingExecutor)));
    let use_case = WatchUseCase::new(WatchOptions::new(dir.path().to_path_buf()), resolver.clone());

    resolver.submit(vec![dir.path().join("pkg/a/a_test.go")]);
    let result = resolver.run_pending(&CancelToken::new());
    let mut sink = RecordingSink::default();
    use_case
        .report(result, &mut sink, chrono::Local::now())
        .unwrap();

    assert!(matches!(sink.events[0], WatchEvent::FileChanged { .. }));
    assert!(matches!(sink.events[1], WatchEvent::RunStarted { .. }));
    assert!(matches!(
        sink.events[2],
        WatchEvent::RunComplete { passed: 1, .. }
    ));
    assert_eq!(sink.batches.len(), 1);
    assert_eq!(sink.batches[0].0, 1);
    assert!(sink.batches[0].1.started_at.is_some());
}

#[test]
fn test_report_executor_failure_is_not_fatal() {
    let dir = tempdir().unwrap();
    let use_case = use_case(dir.path().to_path_buf(), Arc::new(BrokenExecutor));
    let mut sink = RecordingSink::default();

    let result = Err(SentinelError::Executor {
        message: "go: command not found".to_string(),
    });
    use_case
        .report(result, &mut sink, chrono::Local::now())
        .unwrap();

    assert_eq!(sink.events.len(), 1);
    assert!(matches!(sink.events[0], WatchEvent::Error { .. }));
    assert!(sink.batches.is_empty());
}

#[test]
fn test_report_deferred_batch_is_silent() {
    let dir = tempdir().unwrap();
    let use_case = use_case(dir.path().to_path_buf(), Arc::new(PassingExecutor));
    let mut sink = RecordingSink::default();

    use_case
        .report(Ok(None), &mut sink, chrono::Local::now())
        .unwrap();

    assert!(sink.events.is_empty());
}

#[test]
fn test_watch_options_builder() {
    let options = WatchOptions::new(PathBuf::from("."))
        .with_debounce(Duration::from_millis(10))
        .with_run_on_start(false)
        .with_json(true);

    assert_eq!(options.debounce, Duration::from_millis(10));
    assert!(!options.run_on_start);
    assert!(options.json);
}
