mod common;

use edars::error::Error;
use edars::stats::{self, DEFAULT_IQR_MULTIPLIER};
use edars::Dataset;

#[test]
fn test_single_injected_outlier() {
    let ds = common::numeric_column("age", &[10.0, 20.0, 30.0, 40.0, 100.0]);
    let types = stats::classify_columns(&ds);
    let counts = stats::outlier_counts(&ds, &types, DEFAULT_IQR_MULTIPLIER).unwrap();

    assert_eq!(counts.get("age"), Some(&1));
}

#[test]
fn test_known_injected_outliers_on_both_sides() {
    // 1..=20 に -100, 250, 300 を注入
    let mut data: Vec<f64> = (1..=20).map(f64::from).collect();
    data.extend([-100.0, 250.0, 300.0]);

    assert_eq!(stats::outlier_count(&data).unwrap(), 3);
}

#[test]
fn test_count_grows_as_fence_narrows() {
    let data: Vec<f64> = (0..200)
        .map(|i| {
            let x = i as f64 / 199.0;
            // 裾の重い分布
            (x - 0.5).powi(3) * 1000.0
        })
        .collect();

    let multipliers = [3.0, 2.0, 1.5, 1.0, 0.5, 0.25, 0.0];
    let counts: Vec<usize> = multipliers
        .iter()
        .map(|&k| stats::outlier_count_with_multiplier(&data, k).unwrap())
        .collect();

    for pair in counts.windows(2) {
        assert!(pair[0] <= pair[1], "counts must not decrease: {counts:?}");
    }
    assert!(counts.last().unwrap() > &0);
}

#[test]
fn test_fence_uses_index_based_quantiles() {
    let fence = stats::iqr_fence(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 1.5).unwrap();
    // n=6: Q1 = v[1], Q3 = v[4]
    assert_eq!(fence.q1, 2.0);
    assert_eq!(fence.q3, 5.0);
    assert_eq!(fence.iqr, 3.0);
    assert_eq!(fence.lower, -2.5);
    assert_eq!(fence.upper, 9.5);
}

#[test]
fn test_categorical_columns_are_skipped() {
    let ds = common::people();
    let types = stats::classify_columns(&ds);
    let counts = stats::outlier_counts(&ds, &types, DEFAULT_IQR_MULTIPLIER).unwrap();
    assert!(counts.is_empty());
}

#[test]
fn test_empty_dataset_and_invalid_multiplier() {
    let ds = Dataset::with_columns(["a"]).unwrap();
    let types = stats::classify_columns(&ds);
    assert!(stats::outlier_counts(&ds, &types, 1.5)
        .unwrap_err()
        .is_empty_data());

    assert!(matches!(
        stats::outlier_count_with_multiplier(&[1.0, 2.0], f64::INFINITY),
        Err(Error::InvalidInput(_))
    ));
}
