mod common;

use edars::stats::{self, ColumnType};
use edars::Dataset;

#[test]
fn test_empty_cell_disqualifies_whole_column() {
    let ds = common::people();
    let types = stats::classify_columns(&ds);

    assert!(types.numeric.is_empty());
    assert_eq!(types.categorical, vec!["age", "city"]);
}

#[test]
fn test_partition_is_exhaustive_disjoint_and_ordered() {
    let ds = Dataset::from_records(
        ["id", "name", "score", "note", "ratio"],
        vec![
            vec!["1", "alice", "9.5", "", "0.1"],
            vec!["2", "bob", "7", "ok", "-2e-3"],
            vec!["3", "carol", "x", "ok", "4"],
        ],
    )
    .unwrap();
    let types = stats::classify_columns(&ds);

    assert_eq!(types.numeric, vec!["id", "ratio"]);
    assert_eq!(types.categorical, vec!["name", "score", "note"]);

    for column in ds.column_names() {
        let in_numeric = types.numeric.contains(column);
        let in_categorical = types.categorical.contains(column);
        assert!(in_numeric ^ in_categorical, "{column} must be in exactly one set");
    }
    assert_eq!(
        types.numeric.len() + types.categorical.len(),
        ds.column_count()
    );
}

#[test]
fn test_empty_dataset_is_vacuously_numeric() {
    let ds = Dataset::with_columns(["a", "b"]).unwrap();
    let types = stats::classify_columns(&ds);

    assert_eq!(types.numeric, vec!["a", "b"]);
    assert_eq!(types.type_of("a"), Some(ColumnType::Numeric));
}

#[test]
fn test_non_finite_values_are_categorical() {
    let ds = Dataset::from_records(["v"], vec![vec!["1"], vec!["NaN"]]).unwrap();
    assert_eq!(stats::classify_columns(&ds).categorical, vec!["v"]);

    let ds = Dataset::from_records(["v"], vec![vec!["1"], vec!["inf"]]).unwrap();
    assert_eq!(stats::classify_columns(&ds).categorical, vec!["v"]);
}

#[test]
fn test_classification_does_not_touch_dataset() {
    let ds = common::people();
    let before = ds.clone();
    let _ = stats::classify_columns(&ds);
    assert_eq!(ds, before);
}
