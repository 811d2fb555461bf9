//! Property tests for result cache status and invalidation.

use proptest::prelude::*;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use sentinel::application::ResultCache;
use sentinel::domain::entities::{Suite, TestCase, TestStatus};
use sentinel::domain::services::ChangeClassifier;
use sentinel::domain::value_objects::{ChangeKind, FileChange};

fn status() -> impl Strategy<Value = TestStatus> {
    prop_oneof![
        Just(TestStatus::Passed),
        Just(TestStatus::Failed),
        Just(TestStatus::Skipped),
    ]
}

fn suite() -> impl Strategy<Value = Suite> {
    proptest::collection::vec(status(), 0..16).prop_map(|statuses| {
        Suite::new(
            statuses
                .into_iter()
                .enumerate()
                .map(|(i, s)| TestCase::new(format!("Test{}", i), s, Duration::from_millis(i as u64)))
                .collect(),
        )
    })
}

fn test_path() -> impl Strategy<Value = String> {
    proptest::string::string_regex("pkg/[a-z]{1,8}").unwrap()
}

fn cache() -> (tempfile::TempDir, ResultCache) {
    let dir = tempfile::tempdir().unwrap();
    let cache = ResultCache::new(dir.path(), ChangeClassifier::default());
    (dir, cache)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: aggregate status is Failed > Skipped > Passed.
    #[test]
    fn property_failure_dominates(suite in suite()) {
        let (_dir, cache) = cache();
        let has_failed = suite.tests.iter().any(|t| t.status == TestStatus::Failed);
        let has_skipped = suite.tests.iter().any(|t| t.status == TestStatus::Skipped);

        cache.cache_result_with("pkg/a", suite.clone(), Vec::new());
        let entry = cache.get_cached_result("pkg/a").unwrap();

        let expected = if has_failed {
            TestStatus::Failed
        } else if has_skipped {
            TestStatus::Skipped
        } else {
            TestStatus::Passed
        };
        prop_assert_eq!(entry.status, expected);
        prop_assert_eq!(entry.suite, suite);
    }

    /// PROPERTY: processing a dependency after the last run invalidates the entry.
    #[test]
    fn property_dependency_invalidation(key in test_path(), dep in "[a-z]{1,8}\\.go", secs in 1u64..10_000) {
        let (_dir, cache) = cache();
        cache.cache_result_with(&key, Suite::default(), vec![PathBuf::from(&dep)]);
        let last_run = cache.peek(&key).unwrap().last_run;

        cache.mark_processed(Path::new(&dep), last_run + Duration::from_secs(secs));

        prop_assert!(cache.get_cached_result(&key).is_none());
        prop_assert!(cache.peek(&key).is_some());
    }

    /// PROPERTY: an entry with no dependencies stays valid whatever else is processed.
    #[test]
    fn property_no_dependency_stability(
        key in test_path(),
        others in proptest::collection::vec("[a-z]{1,8}/[a-z]{1,8}\\.go", 0..8)
    ) {
        let (_dir, cache) = cache();
        cache.cache_result_with(&key, Suite::default(), Vec::new());

        let future = SystemTime::now() + Duration::from_secs(3600);
        for other in &others {
            cache.mark_processed(Path::new(other), future);
        }

        prop_assert!(cache.get_cached_result(&key).is_some());
    }

    /// PROPERTY: a single config change stales every cached test path.
    #[test]
    fn property_config_blast_radius(keys in proptest::collection::btree_set(test_path(), 0..8)) {
        let (_dir, cache) = cache();
        for key in &keys {
            cache.cache_result_with(key, Suite::default(), Vec::new());
        }

        let mut stale = cache.get_stale_tests(&[FileChange::new("notes.txt", ChangeKind::Config)]);
        stale.sort();

        prop_assert_eq!(stale, keys.into_iter().collect::<Vec<_>>());
    }
}
