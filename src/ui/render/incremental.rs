//! Incremental renderer for watch mode
//!
//! Keeps its own deep copy of the last displayed suites and stats, and on
//! every cycle prints only what differs from that snapshot: new suites in
//! full, new tests, status transitions, removed suites, and summary deltas.

use std::collections::{BTreeMap, HashMap};
use std::io::{self, Write};

use crate::domain::entities::{RunStats, Suite, TestCase, TestStatus};
use crate::domain::value_objects::FileChange;
use crate::ui::primitives::{Icon, SemanticColor};
use crate::ui::style::Style;

use super::format::{format_delta, format_duration, pluralize, signed_delta};

pub struct IncrementalRenderer<W: Write> {
    out: W,
    style: Box<dyn Style>,
    width: usize,
    last_suites: BTreeMap<String, Suite>,
    last_stats: Option<RunStats>,
}

impl<W: Write> IncrementalRenderer<W> {
    pub fn new(out: W, style: Box<dyn Style>, width: usize) -> Self {
        Self {
            out,
            style,
            width,
            last_suites: BTreeMap::new(),
            last_stats: None,
        }
    }

    /// Render one cycle.
    ///
    /// Write errors abort the cycle and leave the snapshot untouched.
    pub fn render(
        &mut self,
        suites: &BTreeMap<String, Suite>,
        stats: &RunStats,
        changes: &[FileChange],
    ) -> io::Result<()> {
        let lines = self.change_lines(changes);
        self.emit(lines)?;

        if suites.is_empty() {
            let line = format!(
                "{} No test changes detected - tests not needed",
                self.style.icon(Icon::Info)
            );
            return self.emit(vec![line, String::new()]);
        }

        let changed = self.identify_changed_suites(suites);
        let removed = self.removed_suites(suites);

        if changed.is_empty() && removed.is_empty() {
            let line = format!(
                "{} No test result changes detected",
                self.style.icon(Icon::Info)
            );
            return self.emit(vec![line, String::new()]);
        }

        for path in &changed {
            if let Some(suite) = suites.get(path) {
                let lines = match self.last_suites.get(path) {
                    None => self.new_suite_lines(path, suite),
                    Some(previous) => self.comparison_lines(path, previous, suite),
                };
                self.emit(lines)?;
            }
        }

        for path in &removed {
            let lines = vec![
                format!(
                    "{} {} {}",
                    self.style.icon(Icon::Removed),
                    path,
                    self.style.colorize("(removed)", SemanticColor::Dim)
                ),
                String::new(),
            ];
            self.emit(lines)?;
        }

        let lines = self.summary_lines(stats, changed.len() + removed.len());
        self.emit(lines)?;

        self.update_last_results(suites, stats);
        Ok(())
    }

    /// Test paths whose results differ from the snapshot, in path order.
    ///
    /// A suite has changed when it is not in the snapshot, its counts or
    /// package error differ, or any of its tests is new or has a different
    /// status.
    pub fn identify_changed_suites(&self, suites: &BTreeMap<String, Suite>) -> Vec<String> {
        suites
            .iter()
            .filter(|(path, suite)| match self.last_suites.get(path.as_str()) {
                None => true,
                Some(previous) => suite_has_changed(previous, suite),
            })
            .map(|(path, _)| path.clone())
            .collect()
    }

    /// Replace the snapshot with a deep copy of the given results
    pub fn update_last_results(&mut self, suites: &BTreeMap<String, Suite>, stats: &RunStats) {
        self.last_suites = suites.clone();
        self.last_stats = Some(stats.clone());
    }

    pub fn last_suites(&self) -> &BTreeMap<String, Suite> {
        &self.last_suites
    }

    pub fn last_stats(&self) -> Option<&RunStats> {
        self.last_stats.as_ref()
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn removed_suites(&self, suites: &BTreeMap<String, Suite>) -> Vec<String> {
        self.last_suites
            .keys()
            .filter(|path| !suites.contains_key(path.as_str()))
            .cloned()
            .collect()
    }

    fn emit(&mut self, lines: Vec<String>) -> io::Result<()> {
        for line in lines {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()
    }

    fn change_lines(&self, changes: &[FileChange]) -> Vec<String> {
        if changes.is_empty() {
            return Vec::new();
        }

        let mut lines = vec![format!(
            "{} File changes detected:",
            self.style.icon(Icon::Watch)
        )];
        for change in changes {
            let mut line = format!(
                "   {} {} ({})",
                self.style.icon(Icon::for_change(change.kind)),
                change.path.display(),
                change.kind.label()
            );
            if !change.affected_tests.is_empty() {
                let affected = change.affected_tests.join(", ");
                line.push_str(&format!(
                    " {} {}",
                    self.style.icon(Icon::Arrow),
                    self.style.colorize(&affected, SemanticColor::Dim)
                ));
            }
            lines.push(line);
        }
        lines.push(String::new());
        lines
    }

    fn new_suite_lines(&self, path: &str, suite: &Suite) -> Vec<String> {
        let counts = suite.counts();
        let mut lines = vec![format!(
            "{} {} {}",
            self.style.icon(Icon::Package),
            path,
            self.style.colorize(
                &format!(
                    "({} {}, {})",
                    counts.total,
                    pluralize("test", counts.total),
                    format_duration(suite.duration)
                ),
                SemanticColor::Dim
            )
        )];

        for test in &suite.tests {
            lines.push(format!(
                "  {} {}",
                self.style.icon(Icon::for_status(test.status)),
                self.test_label(test)
            ));
        }
        if let Some(error) = &suite.error {
            lines.extend(self.error_lines(error));
        }

        lines.push(String::new());
        lines
    }

    fn comparison_lines(&self, path: &str, previous: &Suite, current: &Suite) -> Vec<String> {
        let mut lines = vec![format!("{} {}", self.style.icon(Icon::Package), path)];
        let previous_status = status_by_name(previous);
        let mut has_changes = false;

        for test in &current.tests {
            match previous_status.get(test.name.as_str()) {
                None => {
                    lines.push(format!(
                        "  {} {} {}",
                        self.style.icon(Icon::New),
                        self.style.icon(Icon::for_status(test.status)),
                        self.test_label(test)
                    ));
                    has_changes = true;
                }
                Some(old) if *old != test.status => {
                    lines.push(format!(
                        "  {} {} {} {} {}",
                        self.style.icon(Icon::Changed),
                        self.style.icon(Icon::for_status(*old)),
                        self.style.icon(Icon::Arrow),
                        self.style.icon(Icon::for_status(test.status)),
                        self.test_label(test)
                    ));
                    has_changes = true;
                }
                Some(_) => {}
            }
        }

        let current_status = status_by_name(current);
        for test in &previous.tests {
            if !current_status.contains_key(test.name.as_str()) {
                lines.push(format!(
                    "  {} {} {}",
                    self.style.icon(Icon::Removed),
                    self.style.colorize(&test.name, SemanticColor::Dim),
                    self.style.colorize("(removed)", SemanticColor::Dim)
                ));
                has_changes = true;
            }
        }

        if current.error != previous.error {
            match &current.error {
                Some(error) => lines.extend(self.error_lines(error)),
                None => lines.push(format!(
                    "  {} {}",
                    self.style.icon(Icon::Changed),
                    self.style.colorize("package error resolved", SemanticColor::Success)
                )),
            }
            has_changes = true;
        }

        if !has_changes {
            lines.push(format!("  {} No changes", self.style.icon(Icon::Unchanged)));
        }

        lines.push(String::new());
        lines
    }

    fn test_label(&self, test: &TestCase) -> String {
        format!(
            "{} {}",
            self.style
                .colorize(&test.name, SemanticColor::for_status(test.status)),
            self.style
                .colorize(&format_duration(test.duration), SemanticColor::Dim)
        )
    }

    fn error_lines(&self, error: &str) -> Vec<String> {
        let mut lines = Vec::new();
        for (i, line) in error.lines().enumerate() {
            let text = self.style.colorize(line, SemanticColor::Error);
            if i == 0 {
                lines.push(format!("  {} {}", self.style.icon(Icon::Fail), text));
            } else {
                lines.push(format!("    {}", text));
            }
        }
        lines
    }

    fn summary_lines(&self, stats: &RunStats, changed: usize) -> Vec<String> {
        let mut lines = vec![self.style.rule(self.width)];

        match &self.last_stats {
            Some(previous) => {
                lines.push(format!(
                    "{} Updated {} test {}",
                    self.style.icon(Icon::Summary),
                    changed,
                    pluralize("suite", changed)
                ));
                lines.push(format!(
                    "  Tests:    {}{}",
                    stats.total_tests,
                    self.delta(
                        signed_delta(stats.total_tests, previous.total_tests),
                        SemanticColor::Dim,
                        SemanticColor::Dim
                    )
                ));
                lines.push(format!(
                    "  Passed:   {}{}",
                    self.style
                        .colorize(&stats.passed_tests.to_string(), SemanticColor::Success),
                    self.delta(
                        signed_delta(stats.passed_tests, previous.passed_tests),
                        SemanticColor::Success,
                        SemanticColor::Error
                    )
                ));
                lines.push(format!(
                    "  Failed:   {}{}",
                    self.style
                        .colorize(&stats.failed_tests.to_string(), SemanticColor::Error),
                    self.delta(
                        signed_delta(stats.failed_tests, previous.failed_tests),
                        SemanticColor::Error,
                        SemanticColor::Success
                    )
                ));
                lines.push(format!(
                    "  Skipped:  {}{}",
                    self.style
                        .colorize(&stats.skipped_tests.to_string(), SemanticColor::Warning),
                    self.delta(
                        signed_delta(stats.skipped_tests, previous.skipped_tests),
                        SemanticColor::Dim,
                        SemanticColor::Dim
                    )
                ));
                lines.push(format!("  Duration: {}", format_duration(stats.duration)));
            }
            None => {
                lines.push(format!("{} Test Summary", self.style.icon(Icon::Summary)));
                lines.push(format!(
                    "  Test Files: {} | {} ({})",
                    self.style
                        .colorize(&format!("{} failed", stats.failed_files), SemanticColor::Error),
                    self.style
                        .colorize(&format!("{} passed", stats.passed_files), SemanticColor::Success),
                    stats.total_files
                ));
                lines.push(format!(
                    "  Tests:      {} | {} | {} ({})",
                    self.style
                        .colorize(&format!("{} failed", stats.failed_tests), SemanticColor::Error),
                    self.style
                        .colorize(&format!("{} passed", stats.passed_tests), SemanticColor::Success),
                    self.style.colorize(
                        &format!("{} skipped", stats.skipped_tests),
                        SemanticColor::Warning
                    ),
                    stats.total_tests
                ));
                if let Some(started_at) = stats.started_at {
                    lines.push(format!("  Start at:   {}", started_at.format("%H:%M:%S")));
                }
                lines.push(format!("  Duration:   {}", format_duration(stats.duration)));
            }
        }

        lines.push(String::new());
        lines
    }

    /// Colored ` (+n)`/` (-n)` suffix; empty when nothing moved
    fn delta(&self, delta: i64, up: SemanticColor, down: SemanticColor) -> String {
        match format_delta(delta) {
            Some(text) => {
                let color = if delta > 0 { up } else { down };
                self.style.colorize(&text, color)
            }
            None => String::new(),
        }
    }
}

fn status_by_name(suite: &Suite) -> HashMap<&str, TestStatus> {
    suite
        .tests
        .iter()
        .map(|t| (t.name.as_str(), t.status))
        .collect()
}

fn suite_has_changed(previous: &Suite, current: &Suite) -> bool {
    if previous.counts() != current.counts() || previous.error != current.error {
        return true;
    }

    let previous_status = status_by_name(previous);
    current
        .tests
        .iter()
        .any(|test| previous_status.get(test.name.as_str()) != Some(&test.status))
}
