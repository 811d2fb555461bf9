//! Sentinel - watch-mode Go test runner
//!
//! Sentinel watches a Go module, classifies every settled file change, and
//! reruns only the test packages whose cached results went stale. Results
//! are rendered incrementally: each cycle prints only what changed since the
//! last one.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;

// Re-exports for convenience
pub use application::{BatchOutcome, ResultCache, StalenessResolver, WatchEvent, WatchOptions, WatchUseCase};
pub use config::Config;
pub use domain::entities::{RunStats, Suite, TestCase, TestStatus};
pub use domain::services::{ChangeClassifier, ClassifierRules};
pub use domain::value_objects::{ChangeKind, ContentHash, FileChange};
pub use error::{SentinelError, SentinelResult};
pub use infrastructure::GoTestExecutor;
pub use ui::IncrementalRenderer;
