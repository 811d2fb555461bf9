//! Domain Layer
//!
//! The core model of Sentinel: what a change is, what a test outcome is,
//! and the seams to the outside world.
//!
//! ## Structure
//!
//! - `entities/` - Test outcomes (TestCase, Suite, RunStats)
//! - `value_objects/` - Immutable value types (FileChange, ContentHash, IgnorePatterns)
//! - `services/` - Pure domain services (ChangeClassifier)
//! - `ports/` - Interface definitions for infrastructure (TestExecutor)

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
