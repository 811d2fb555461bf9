//! Domain Services
//!
//! Pure logic over domain values. No state, no shared I/O handles.

mod classifier;

pub use classifier::{ChangeClassifier, Classification, ClassifierRules};
