//! Result cache
//!
//! Keeps the last outcome per test path together with the files it depends
//! on, and answers which test paths a batch of changes makes stale.
//!
//! Validity is dependency-driven: an entry stops being served once any of
//! its dependencies is processed after the entry's last run. Stale entries
//! stay in the map until [`ResultCache::clear`].

mod result_cache;


pub use result_cache::{normalize_test_path, CacheStats, CachedResult, ResultCache};
