// 列型判定モジュール

use serde::Serialize;

use crate::dataframe::Dataset;
use crate::error::{Error, Result};

/// 列の型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// すべての値が有限の数値として解釈できる列
    Numeric,
    /// それ以外の列
    Categorical,
}

/// 数値列とカテゴリ列への分割結果
///
/// どちらも元の列順を保持し、互いに素で、合わせるとすべての列になります。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ColumnTypes {
    pub numeric: Vec<String>,
    pub categorical: Vec<String>,
}

impl ColumnTypes {
    /// 列の型を取得（存在しない列はNone）
    pub fn type_of(&self, column: &str) -> Option<ColumnType> {
        if self.numeric.iter().any(|c| c == column) {
            Some(ColumnType::Numeric)
        } else if self.categorical.iter().any(|c| c == column) {
            Some(ColumnType::Categorical)
        } else {
            None
        }
    }
}

/// 生の値を有限の数値として解釈
///
/// 前後の空白は無視しますが、空白のみの値は数値とみなしません。
/// 空白のみのセルは空セルと同じく非数値として扱います（欠損値には数えません）。
pub(crate) fn parse_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// 値が有限の数値として解釈できるかどうか
///
/// ```
/// use edars::stats::is_numeric_value;
///
/// assert!(is_numeric_value("3.5"));
/// assert!(is_numeric_value("-1e3"));
/// assert!(!is_numeric_value(""));
/// assert!(!is_numeric_value("NaN"));
/// assert!(!is_numeric_value("abc"));
/// ```
pub fn is_numeric_value(raw: &str) -> bool {
    parse_numeric(raw).is_some()
}

/// 列型判定の内部実装
///
/// 1つでも空・欠落・非数値のセルがあれば列全体がカテゴリ列になります。
/// 行が0件の場合、すべての列が数値列になります。
pub(crate) fn classify_impl(dataset: &Dataset) -> ColumnTypes {
    let mut types = ColumnTypes::default();

    for column in dataset.column_names() {
        let numeric = dataset.rows().iter().all(|row| {
            row.get(column)
                .map(|raw| is_numeric_value(raw))
                .unwrap_or(false)
        });

        if numeric {
            types.numeric.push(column.clone());
        } else {
            types.categorical.push(column.clone());
        }
    }

    log::debug!(
        "列型判定: 数値列 {:?}, カテゴリ列 {:?}",
        types.numeric,
        types.categorical
    );
    types
}

/// 数値列の値を取得する内部実装
pub(crate) fn numeric_values_impl(dataset: &Dataset, column: &str) -> Result<Vec<f64>> {
    let values = dataset.column_values(column)?;

    values
        .into_iter()
        .enumerate()
        .map(|(row, raw)| {
            raw.and_then(parse_numeric)
                .ok_or_else(|| Error::NonNumericValue {
                    column: column.to_string(),
                    row,
                    value: raw.unwrap_or_default().to_string(),
                })
        })
        .collect()
}
