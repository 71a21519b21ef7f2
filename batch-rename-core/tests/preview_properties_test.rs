use batch_rename_core::{build_names, PreviewOptions, RowStatus, Session};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use tempfile::TempDir;

fn file_name() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_ .-]{1,12}".prop_filter("not a dot name", |s| s != "." && s != "..")
}

fn file_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set(file_name(), 1..12).prop_map(|set| set.into_iter().collect())
}

proptest! {
    #[test]
    fn invalid_pattern_never_changes_anything(
        names in file_names(),
        pattern in prop::sample::select(vec!["(", "[", "*", "a{2,1}"]),
        replacement in "[a-z]{0,4}",
    ) {
        let rows = build_names(&names, pattern, &replacement, &PreviewOptions::default());
        prop_assert_eq!(rows.len(), names.len());
        for row in &rows {
            prop_assert_eq!(row.status, RowStatus::InvalidPattern);
            prop_assert!(!row.is_changed());
        }
    }

    #[test]
    fn identity_replacement_is_unchanged(
        names in file_names(),
        replacement in prop::sample::select(vec![r"\g<1>", r"\g<0>", r"\1"]),
    ) {
        let rows = build_names(&names, "(.+)", replacement, &PreviewOptions::default());
        for row in &rows {
            prop_assert_eq!(row.status, RowStatus::Unchanged);
            prop_assert_eq!(&row.proposed_name, &row.original_name);
        }
    }

    #[test]
    fn unsafe_character_in_every_name(names in file_names()) {
        let rows = build_names(&names, "^", "?", &PreviewOptions::default());
        for row in &rows {
            prop_assert_eq!(row.status, RowStatus::ChangedUnsafe);
        }
    }

    #[test]
    fn rows_follow_input_order(
        names in file_names(),
        pattern in "[a-z.]{0,3}",
        replacement in "[a-z_]{0,3}",
    ) {
        let rows = build_names(&names, &pattern, &replacement, &PreviewOptions::default());
        let originals: Vec<&str> = rows.iter().map(|r| r.original_name.as_str()).collect();
        let expected: Vec<&str> = names.iter().map(String::as_str).collect();
        prop_assert_eq!(originals, expected);
    }

    #[test]
    fn duplicate_final_names_are_always_unsafe(
        names in file_names(),
        pattern in "[a-z.]{0,3}",
        replacement in "[a-z_.]{0,3}",
    ) {
        let rows = build_names(&names, &pattern, &replacement, &PreviewOptions::default());
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for row in &rows {
            *counts.entry(row.proposed_name.as_str()).or_default() += 1;
        }
        for row in &rows {
            if counts[row.proposed_name.as_str()] > 1 {
                prop_assert_eq!(row.status, RowStatus::ChangedUnsafe);
            }
        }
    }

    #[test]
    fn status_matches_name_comparison(
        names in file_names(),
        pattern in "[a-z]{0,2}",
        replacement in "[a-z]{0,2}",
    ) {
        let rows = build_names(&names, &pattern, &replacement, &PreviewOptions::default());
        for row in &rows {
            match row.status {
                RowStatus::Unchanged => prop_assert_eq!(&row.proposed_name, &row.original_name),
                RowStatus::Changed => {
                    prop_assert_ne!(&row.proposed_name, &row.original_name);
                    prop_assert!(!row.proposed_name.contains(['?', '|']));
                },
                RowStatus::ChangedUnsafe => {},
                RowStatus::InvalidPattern => prop_assert!(false, "pattern compiles"),
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn commit_then_undo_restores_listing(
        names in prop::collection::btree_set("[a-z]{1,6}\\.txt", 1..8),
        pattern in prop::sample::select(vec!["^[a-m]", "\\.txt$", "[aeiou]"]),
        replacement in prop::sample::select(vec!["x", "", "_"]),
    ) {
        let temp_dir = TempDir::new().unwrap();
        for name in &names {
            fs::write(temp_dir.path().join(name), name).unwrap();
        }

        let mut session = Session::default();
        session.open(temp_dir.path()).unwrap();
        let rows = session.preview(pattern, replacement);
        session.commit_rows(&rows).unwrap();

        // No file is ever lost to an overwrite
        prop_assert_eq!(session.files().len(), names.len());

        session.undo();
        let restored: BTreeSet<String> = session
            .files()
            .iter()
            .map(|f| f.name().to_string())
            .collect();
        prop_assert_eq!(&restored, &names);
        for name in &names {
            let content = fs::read_to_string(temp_dir.path().join(name)).unwrap();
            prop_assert_eq!(&content, name);
        }
    }
}
