//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod change;
mod hash;
mod ignore_patterns;

pub use change::{owning_test_path, ChangeKind, FileChange, ROOT_TEST_PATH};
pub use hash::ContentHash;
pub use ignore_patterns::{IgnoreError, IgnorePatterns};
