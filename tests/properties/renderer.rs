//! Property tests for the incremental renderer.

use proptest::prelude::*;
use std::collections::BTreeMap;
use std::time::Duration;

use sentinel::domain::entities::{RunStats, Suite, TestCase, TestStatus};
use sentinel::ui::{IncrementalRenderer, TerminalStyle};

fn suites() -> impl Strategy<Value = BTreeMap<String, Suite>> {
    let status = prop_oneof![
        Just(TestStatus::Passed),
        Just(TestStatus::Failed),
        Just(TestStatus::Skipped),
    ];
    let suite = proptest::collection::vec(status, 0..6).prop_map(|statuses| {
        Suite::new(
            statuses
                .into_iter()
                .enumerate()
                .map(|(i, s)| TestCase::new(format!("Test{}", i), s, Duration::ZERO))
                .collect(),
        )
    });
    proptest::collection::btree_map("pkg/[a-z]{1,6}", suite, 1..6)
}

fn renderer() -> IncrementalRenderer<Vec<u8>> {
    IncrementalRenderer::new(Vec::new(), Box::new(TerminalStyle::plain()), 20)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: rendering identical results twice emits only the notice.
    #[test]
    fn property_renderer_minimality(current in suites()) {
        let mut r = renderer();
        let stats = RunStats::from_suites(&current, Duration::ZERO);
        r.render(&current, &stats, &[]).unwrap();
        r.get_mut().clear();

        let copy = current.clone();
        prop_assert!(r.identify_changed_suites(&copy).is_empty());
        r.render(&copy, &stats, &[]).unwrap();

        let out = String::from_utf8(r.get_ref().clone()).unwrap();
        prop_assert_eq!(out, "[i] No test result changes detected\n\n");
    }

    /// PROPERTY: after a render the snapshot equals what was rendered.
    #[test]
    fn property_snapshot_tracks_last_render(first in suites(), second in suites()) {
        let mut r = renderer();
        r.render(&first, &RunStats::from_suites(&first, Duration::ZERO), &[]).unwrap();
        r.render(&second, &RunStats::from_suites(&second, Duration::ZERO), &[]).unwrap();

        prop_assert_eq!(r.last_suites(), &second);
    }
}
