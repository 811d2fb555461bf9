//! Property tests for change classification.

use proptest::prelude::*;
use std::fs;
use std::path::Path;

use sentinel::domain::services::ChangeClassifier;
use sentinel::domain::value_objects::ChangeKind;

fn file_name() -> impl Strategy<Value = String> {
    let stem = proptest::string::string_regex("[A-Za-z0-9_-]{1,12}").unwrap();
    let ext = prop_oneof![
        Just("go".to_string()),
        Just("_test.go".to_string()),
        Just("mod".to_string()),
        Just("yaml".to_string()),
        Just("md".to_string()),
        Just("txt".to_string()),
    ];
    (stem, ext).prop_map(|(stem, ext)| {
        if ext.starts_with('_') {
            format!("{}{}", stem, ext)
        } else {
            format!("{}.{}", stem, ext)
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: inspecting an unchanged file twice yields the same kind and hash.
    #[test]
    fn property_classification_is_idempotent(
        name in file_name(),
        content in proptest::collection::vec(any::<u8>(), 0..512)
    ) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(&name);
        fs::write(&path, &content).unwrap();
        let classifier = ChangeClassifier::default();

        let first = classifier.inspect(&path, true).unwrap();
        let second = classifier.inspect(&path, true).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert!(first.content_hash.is_some());
    }

    /// PROPERTY: pure classification never fails and never touches the disk.
    #[test]
    fn property_classify_is_total(s in "[A-Za-z0-9./_-]{0,64}") {
        let classifier = ChangeClassifier::default();
        let kind = classifier.classify(Path::new(&s));
        prop_assert_eq!(kind, classifier.classify(Path::new(&s)));
    }

    /// PROPERTY: `*_test.go` is always a Test change, other `*.go` always Source.
    #[test]
    fn property_go_files_split_on_test_suffix(stem in "[a-z][a-z0-9_]{0,12}") {
        let classifier = ChangeClassifier::default();
        prop_assume!(!stem.ends_with("_test"));

        let test = format!("pkg/{}_test.go", stem);
        let source = format!("pkg/{}.go", stem);
        prop_assert_eq!(classifier.classify(Path::new(&test)), ChangeKind::Test);
        prop_assert_eq!(classifier.classify(Path::new(&source)), ChangeKind::Source);
    }
}
