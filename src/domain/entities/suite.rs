//! Test outcome model
//!
//! A `Suite` is the executor's report for one test path (a package
//! directory). Counts are always derived from `tests`, so they can never
//! drift from the individual outcomes.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Local};
use serde::Serialize;

/// Outcome of a single test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Passed,
    Failed,
    Skipped,
}

/// One named test and how it ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestCase {
    pub name: String,
    pub status: TestStatus,
    #[serde(with = "duration_ms")]
    pub duration: Duration,
}

impl TestCase {
    pub fn new(name: impl Into<String>, status: TestStatus, duration: Duration) -> Self {
        Self {
            name: name.into(),
            status,
            duration,
        }
    }

    pub fn passed(name: impl Into<String>) -> Self {
        Self::new(name, TestStatus::Passed, Duration::ZERO)
    }

    pub fn failed(name: impl Into<String>) -> Self {
        Self::new(name, TestStatus::Failed, Duration::ZERO)
    }

    pub fn skipped(name: impl Into<String>) -> Self {
        Self::new(name, TestStatus::Skipped, Duration::ZERO)
    }
}

/// Per-status counts of a suite
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SuiteCounts {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Ordered outcomes for one test path
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Suite {
    pub tests: Vec<TestCase>,
    #[serde(with = "duration_ms")]
    pub duration: Duration,
    /// Package-level failure with no failing test (e.g. a build error)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Suite {
    pub fn new(tests: Vec<TestCase>) -> Self {
        let duration = tests.iter().map(|t| t.duration).sum();
        Self {
            tests,
            duration,
            error: None,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }

    pub fn counts(&self) -> SuiteCounts {
        let mut counts = SuiteCounts {
            total: self.tests.len(),
            ..SuiteCounts::default()
        };
        for test in &self.tests {
            match test.status {
                TestStatus::Passed => counts.passed += 1,
                TestStatus::Failed => counts.failed += 1,
                TestStatus::Skipped => counts.skipped += 1,
            }
        }
        counts
    }

    /// Aggregate status: Failed > Skipped > Passed.
    ///
    /// Any failed test (or a package-level error) makes the whole suite
    /// Failed regardless of how many tests were skipped. An empty suite is
    /// Passed.
    pub fn status(&self) -> TestStatus {
        let counts = self.counts();
        if counts.failed > 0 || self.error.is_some() {
            TestStatus::Failed
        } else if counts.skipped > 0 {
            TestStatus::Skipped
        } else {
            TestStatus::Passed
        }
    }

    /// Look up a test by exact name
    pub fn test(&self, name: &str) -> Option<&TestCase> {
        self.tests.iter().find(|t| t.name == name)
    }
}

/// Aggregate counts over a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    pub total_files: usize,
    pub passed_files: usize,
    pub failed_files: usize,
    pub total_tests: usize,
    pub passed_tests: usize,
    pub failed_tests: usize,
    pub skipped_tests: usize,
    #[serde(with = "duration_ms")]
    pub duration: Duration,
    pub started_at: Option<DateTime<Local>>,
}

impl RunStats {
    /// Fold suite counts into run totals
    pub fn from_suites(suites: &BTreeMap<String, Suite>, duration: Duration) -> Self {
        let mut stats = RunStats {
            duration,
            ..RunStats::default()
        };
        for suite in suites.values() {
            let counts = suite.counts();
            stats.total_files += 1;
            if suite.status() == TestStatus::Failed {
                stats.failed_files += 1;
            } else {
                stats.passed_files += 1;
            }
            stats.total_tests += counts.total;
            stats.passed_tests += counts.passed;
            stats.failed_tests += counts.failed;
            stats.skipped_tests += counts.skipped;
        }
        stats
    }

    pub fn with_start(mut self, started_at: DateTime<Local>) -> Self {
        self.started_at = Some(started_at);
        self
    }
}

mod duration_ms {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis().min(u128::from(u64::MAX)) as u64)
    }
}
