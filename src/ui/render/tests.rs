//! Tests for the incremental renderer

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::time::Duration;

use super::IncrementalRenderer;
use crate::domain::entities::{RunStats, Suite, TestCase};
use crate::domain::value_objects::{ChangeKind, FileChange};
use crate::ui::primitives::{Icon, SemanticColor};
use crate::ui::style::{Style, TerminalStyle};

fn renderer() -> IncrementalRenderer<Vec<u8>> {
    IncrementalRenderer::new(Vec::new(), Box::new(TerminalStyle::plain()), 10)
}

fn take(renderer: &mut IncrementalRenderer<Vec<u8>>) -> String {
    String::from_utf8(std::mem::take(renderer.get_mut())).unwrap()
}

fn suites(entries: &[(&str, Suite)]) -> BTreeMap<String, Suite> {
    entries
        .iter()
        .map(|(path, suite)| (path.to_string(), suite.clone()))
        .collect()
}

fn stats(suites: &BTreeMap<String, Suite>) -> RunStats {
    RunStats::from_suites(suites, Duration::from_millis(5))
}

fn render(renderer: &mut IncrementalRenderer<Vec<u8>>, current: &BTreeMap<String, Suite>) -> String {
    renderer.render(current, &stats(current), &[]).unwrap();
    take(renderer)
}

fn passing(names: &[&str]) -> Suite {
    Suite::new(names.iter().map(|n| TestCase::passed(*n)).collect())
}

#[test]
fn test_empty_suites_prints_notice_and_keeps_snapshot() {
    let mut r = renderer();
    let out = render(&mut r, &BTreeMap::new());

    assert_eq!(out, "[i] No test changes detected - tests not needed\n\n");
    assert!(r.last_suites().is_empty());
    assert!(r.last_stats().is_none());
}

#[test]
fn test_first_render_shows_full_suite_and_summary() {
    let mut r = renderer();
    let current = suites(&[("pkg/a", passing(&["TestA", "TestB"]))]);

    let out = render(&mut r, &current);

    assert!(out.contains("[PKG] pkg/a (2 tests, 0ms)\n"));
    assert!(out.contains("  [OK] TestA 0ms\n"));
    assert!(out.contains("  [OK] TestB 0ms\n"));
    assert!(out.contains("----------\n"));
    assert!(out.contains("[SUM] Test Summary\n"));
    assert!(out.contains("  Test Files: 0 failed | 1 passed (1)\n"));
    assert!(out.contains("  Tests:      0 failed | 2 passed | 0 skipped (2)\n"));
    assert!(out.contains("  Duration:   5ms\n"));
    assert!(!out.contains("(+"));
    assert_eq!(r.last_suites(), &current);
}

#[test]
fn test_identical_results_render_only_notice() {
    let mut r = renderer();
    let current = suites(&[("pkg/a", passing(&["TestA"]))]);
    render(&mut r, &current);

    assert!(r.identify_changed_suites(&current).is_empty());
    let out = render(&mut r, &current);

    assert_eq!(out, "[i] No test result changes detected\n\n");
}

#[test]
fn test_status_transition_is_rendered_with_deltas() {
    let mut r = renderer();
    render(&mut r, &suites(&[("pkg/a", passing(&["TestA", "TestB"]))]));

    let next = suites(&[(
        "pkg/a",
        Suite::new(vec![TestCase::failed("TestA"), TestCase::passed("TestB")]),
    )]);
    let out = render(&mut r, &next);

    assert!(out.contains("[PKG] pkg/a\n"));
    assert!(out.contains("  [CHG] [OK] -> [FAIL] TestA 0ms\n"));
    assert!(!out.contains("TestB"));
    assert!(out.contains("[SUM] Updated 1 test suite\n"));
    assert!(out.contains("  Tests:    2\n"));
    assert!(out.contains("  Passed:   1 (-1)\n"));
    assert!(out.contains("  Failed:   1 (+1)\n"));
    assert!(out.contains("  Skipped:  0\n"));
}

#[test]
fn test_new_test_is_marked_distinctly() {
    let mut r = renderer();
    render(&mut r, &suites(&[("pkg/a", passing(&["TestA"]))]));

    let out = render(&mut r, &suites(&[("pkg/a", passing(&["TestA", "TestNew"]))]));

    assert!(out.contains("  [NEW] [OK] TestNew 0ms\n"));
    assert!(!out.contains("[CHG]"));
    assert!(!out.contains("TestA"));
}

#[test]
fn test_dropped_test_is_reported_instead_of_no_changes() {
    let mut r = renderer();
    render(&mut r, &suites(&[("pkg/a", passing(&["TestA", "TestB"]))]));

    let out = render(&mut r, &suites(&[("pkg/a", passing(&["TestA"]))]));

    assert!(out.contains("[PKG] pkg/a\n  [DEL] TestB (removed)\n"));
    assert!(!out.contains("No changes"));
    assert!(out.contains("  Tests:    1 (-1)\n"));
}

#[test]
fn test_unchanged_suites_are_not_rendered() {
    let mut r = renderer();
    let a = passing(&["TestA"]);
    render(&mut r, &suites(&[("pkg/a", a.clone()), ("pkg/b", passing(&["TestB"]))]));

    let out = render(
        &mut r,
        &suites(&[("pkg/a", a), ("pkg/b", Suite::new(vec![TestCase::skipped("TestB")]))]),
    );

    assert!(!out.contains("pkg/a"));
    assert!(out.contains("  [CHG] [OK] -> [SKIP] TestB 0ms\n"));
}

#[test]
fn test_removed_suite_counts_as_change() {
    let mut r = renderer();
    let a = passing(&["TestA"]);
    render(&mut r, &suites(&[("pkg/a", a.clone()), ("pkg/b", passing(&["TestB"]))]));

    let current = suites(&[("pkg/a", a)]);
    let out = render(&mut r, &current);

    assert!(out.contains("[DEL] pkg/b (removed)\n"));
    assert!(out.contains("[SUM] Updated 1 test suite\n"));
    assert_eq!(r.last_suites(), &current);
}

#[test]
fn test_change_summary_lists_kind_and_affected_tests() {
    let mut r = renderer();
    let changes = vec![
        FileChange::new("pkg/a/a.go", ChangeKind::Source)
            .with_affected_tests(vec!["pkg/a".to_string()]),
        FileChange::new("go.mod", ChangeKind::Dependency),
    ];

    r.render(&BTreeMap::new(), &RunStats::default(), &changes)
        .unwrap();
    let out = take(&mut r);

    assert!(out.starts_with("[~] File changes detected:\n"));
    assert!(out.contains("   [S] pkg/a/a.go (source file) -> pkg/a\n"));
    assert!(out.contains("   [D] go.mod (dependency)\n"));
    assert!(out.contains("No test changes detected"));
}

#[test]
fn test_package_error_is_rendered() {
    let mut r = renderer();
    let broken = Suite::new(vec![]).with_error("undefined: Foo\nbuild failed");

    let out = render(&mut r, &suites(&[("pkg/a", broken)]));
    assert!(out.contains("  [FAIL] undefined: Foo\n    build failed\n"));
    assert!(out.contains("  Test Files: 1 failed | 0 passed (1)\n"));

    let out = render(&mut r, &suites(&[("pkg/a", Suite::new(vec![]))]));
    assert!(out.contains("[CHG] package error resolved"));
}

#[test]
fn test_snapshot_is_a_deep_copy() {
    let mut r = renderer();
    let mut current = suites(&[("pkg/a", passing(&["TestA"]))]);
    render(&mut r, &current);

    // Caller mutates its own map after rendering
    if let Some(suite) = current.get_mut("pkg/a") {
        suite.tests[0] = TestCase::failed("TestA");
    }

    assert_eq!(r.last_suites()["pkg/a"], passing(&["TestA"]));
    assert_eq!(r.identify_changed_suites(&current), vec!["pkg/a".to_string()]);
}

#[test]
fn test_start_time_is_shown_on_first_summary() {
    use chrono::{Local, TimeZone};

    let mut r = renderer();
    let current = suites(&[("pkg/a", passing(&["TestA"]))]);
    let start = Local.with_ymd_and_hms(2024, 1, 2, 9, 8, 7).unwrap();

    r.render(&current, &stats(&current).with_start(start), &[])
        .unwrap();
    let out = take(&mut r);

    assert!(out.contains("  Start at:   09:08:07\n"));
}

struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_write_error_propagates_and_keeps_snapshot() {
    let mut r = IncrementalRenderer::new(FailingWriter, Box::new(TerminalStyle::plain()), 10);
    let current = suites(&[("pkg/a", passing(&["TestA"]))]);

    let err = r.render(&current, &stats(&current), &[]).unwrap_err();

    assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    assert!(r.last_suites().is_empty());
    assert!(r.last_stats().is_none());
}

/// Marks every color and icon so tests can see which semantic was asked for
struct TaggingStyle;

impl Style for TaggingStyle {
    fn colorize(&self, text: &str, color: SemanticColor) -> String {
        format!("<{:?}>{}</>", color, text)
    }

    fn icon(&self, icon: Icon) -> String {
        format!("{{{:?}}}", icon)
    }
}

#[test]
fn test_style_receives_semantic_colors() {
    let mut r = IncrementalRenderer::new(Vec::new(), Box::new(TaggingStyle), 3);
    let current = suites(&[("pkg/a", Suite::new(vec![TestCase::failed("TestA")]))]);

    let out = render(&mut r, &current);

    assert!(out.contains("{Package} pkg/a"));
    assert!(out.contains("  {Fail} <Error>TestA</> <Dim>0ms</>\n"));
    assert!(out.contains("---\n"));
}
