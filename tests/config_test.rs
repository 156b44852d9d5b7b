mod common;

use common::TempTestFile;
use edars::error::Error;
use edars::{Analysis, AnalysisConfig, AnalysisReport, Dataset};

#[test]
fn test_config_from_file() {
    let file = TempTestFile::with_contents(
        "analysis_config",
        "toml",
        r#"
analyses = ["corr", "outliers"]
iqr_multiplier = 0.5
preview_rows = 2
parallel = true

[csv]
delimiter = "\t"
has_header = false
trim = true
"#,
    );

    let config = AnalysisConfig::from_file(file.path()).unwrap();
    assert_eq!(
        config.analyses,
        vec![Analysis::Correlation, Analysis::Outliers]
    );
    assert_eq!(config.iqr_multiplier, 0.5);
    assert_eq!(config.preview_rows, 2);
    assert!(config.parallel);
    assert_eq!(config.csv.delimiter, '\t');
    assert!(!config.csv.has_header);
    assert!(config.csv.trim);
}

#[test]
fn test_config_missing_file() {
    let path = common::test_temp_path("missing_config", "toml");
    assert!(matches!(
        AnalysisConfig::from_file(&path),
        Err(Error::Io(_))
    ));
}

#[test]
fn test_config_syntax_error() {
    let file = TempTestFile::with_contents("broken_config", "toml", "analyses = [");
    assert!(matches!(
        AnalysisConfig::from_file(file.path()),
        Err(Error::Config(_))
    ));
}

#[test]
fn test_multiplier_changes_report() {
    let ds = common::numeric_column("v", &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0]);

    let default = AnalysisReport::build(&ds, &AnalysisConfig::default());
    assert_eq!(default.outliers.computed().unwrap().get("v"), Some(&0));

    // k = 0 ではフェンスが [Q1, Q3] になる
    let narrow = AnalysisConfig::from_toml_str("iqr_multiplier = 0.0").unwrap();
    let report = AnalysisReport::build(&ds, &narrow);
    assert_eq!(report.outliers.computed().unwrap().get("v"), Some(&4));
}

#[test]
fn test_preview_rows_setting() {
    let ds = Dataset::from_records(["a"], (0..10).map(|i| vec![i.to_string()])).unwrap();
    let config = AnalysisConfig::from_toml_str("preview_rows = 3").unwrap();
    let report = AnalysisReport::build(&ds, &config);
    assert_eq!(report.preview.rows.len(), 3);

    let none = AnalysisConfig::from_toml_str("preview_rows = 0").unwrap();
    assert!(AnalysisReport::build(&ds, &none).preview.rows.is_empty());
}
