//! Domain Entities
//!
//! - `Suite` - Ordered outcomes reported by the executor for one test path
//! - `RunStats` - Aggregate counts over a whole run

mod suite;

pub use suite::{RunStats, Suite, SuiteCounts, TestCase, TestStatus};
