//! Common test utilities module
//!
//! Provides shared utilities for tests including:
//! - Temporary input files with cleanup
//! - Sample datasets

#![allow(dead_code)]

pub mod test_utils;

pub use test_utils::{create_test_csv, get_temp_dir, test_temp_path, TempTestFile};

use edars::Dataset;

/// The three-row dataset from the upload page: `age` has one empty cell
pub fn people() -> Dataset {
    Dataset::from_records(
        ["age", "city"],
        vec![vec!["25", "A"], vec!["30", "B"], vec!["", "A"]],
    )
    .unwrap()
}

/// Single numeric column built from `values`
pub fn numeric_column(name: &str, values: &[f64]) -> Dataset {
    Dataset::from_records([name], values.iter().map(|v| vec![v.to_string()])).unwrap()
}
