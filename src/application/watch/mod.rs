//! Watch Use Case
//!
//! Continuous watch mode. It orchestrates:
//! - File system monitoring (via `notify` crate)
//! - Ignore filtering (`[watch] ignore` plus `.sentinelignore`)
//! - Per-path quiet-period debouncing
//! - Batched staleness resolution and reruns (via `StalenessResolver`)
//!
//! ## Usage
//!
//! ```ignore
//! let options = WatchOptions::new(root);
//! let use_case = WatchUseCase::new(options, resolver);
//! use_case.start(running, &cancel, &mut |event| { ... })?;
//! ```

mod debounce;
mod event;
mod use_case;

#[cfg(test)]
mod tests;

pub use debounce::{Debouncer, DEBOUNCE_MS};
pub use event::{WatchEvent, WatchOptions, WatchSink};
pub use use_case::WatchUseCase;
