//! Domain Ports (Interfaces)
//!
//! Traits at the boundary between the core and its external collaborators.
//! Infrastructure provides the concrete implementations.

pub mod test_executor;

pub use test_executor::{CancelToken, ExecutionOutcome, TestExecutor};
