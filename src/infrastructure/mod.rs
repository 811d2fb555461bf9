//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles process and pipe I/O.
//!
//! ## Structure
//!
//! - `executor/` - Test executors (`go test -json`)

pub mod executor;

pub use executor::GoTestExecutor;
