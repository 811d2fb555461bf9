//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Owns the shared, lock-guarded state (the result cache)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Components
//!
//! - `ResultCache` - Last outcome per test path plus its file dependencies
//! - `StalenessResolver` - Turns settled changes into at most one run per batch
//! - `WatchUseCase` - Orchestrates file watching, debouncing and reruns

pub mod cache;
pub mod resolver;
pub mod watch;

pub use cache::{normalize_test_path, CacheStats, CachedResult, ResultCache};
pub use resolver::{BatchOutcome, StalenessResolver};
pub use watch::{Debouncer, WatchEvent, WatchOptions, WatchSink, WatchUseCase, DEBOUNCE_MS};
