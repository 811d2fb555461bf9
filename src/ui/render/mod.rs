//! Test result rendering
//!
//! - `IncrementalRenderer` - diffs each cycle against the last displayed snapshot
//! - `format` - duration and delta formatting shared by views

mod format;
mod incremental;

#[cfg(test)]
mod tests;

pub use format::{format_delta, format_duration, pluralize, signed_delta};
pub use incremental::IncrementalRenderer;
