//! TestExecutor port - abstraction over the external test runner
//!
//! The core decides *what* to run; an executor decides *how*. The default
//! implementation shells out to `go test -json` (see
//! `infrastructure::executor`), tests use in-memory fakes.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::domain::entities::Suite;
use crate::error::SentinelResult;

/// Cooperative cancellation flag shared between a run and its caller
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a token on top of an existing flag (e.g. the Ctrl+C flag)
    pub fn from_flag(flag: Arc<AtomicBool>) -> Self {
        Self(flag)
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// How an executor invocation ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// Suites keyed by test path
    Completed(BTreeMap<String, Suite>),
    /// The run was aborted; nothing it produced may be cached
    Cancelled,
}

/// Runs a set of test paths as a single invocation
pub trait TestExecutor: Send + Sync {
    /// Run `test_paths` together.
    ///
    /// Implementations should poll `cancel` and return
    /// [`ExecutionOutcome::Cancelled`] promptly once it is set.
    fn run(&self, test_paths: &[String], cancel: &CancelToken) -> SentinelResult<ExecutionOutcome>;
}
