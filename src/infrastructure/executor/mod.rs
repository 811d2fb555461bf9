//! Test executors
//!
//! Implementations of the `TestExecutor` port.


pub use go_test::{package_dir, package_pattern, parse_test_stream, read_module_path, GoTestExecutor};
