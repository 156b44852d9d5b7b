// 欠損値集計モジュール

use crate::dataframe::Dataset;
use crate::error::Result;
use crate::stats::ColumnResults;

/// 欠損値かどうか（空文字列または欠落）
fn is_missing(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}

/// 1列の欠損値を数える内部実装
pub(crate) fn count_impl(dataset: &Dataset, column: &str) -> Result<usize> {
    let values = dataset.column_values(column)?;
    Ok(values.into_iter().filter(|v| is_missing(*v)).count())
}

/// 全列の欠損値を数える内部実装
///
/// 数値列・カテゴリ列を問わず、宣言されたすべての列が対象です。
pub(crate) fn counts_impl(dataset: &Dataset) -> ColumnResults<usize> {
    let mut results = ColumnResults::new();
    for column in dataset.column_names() {
        let count = dataset
            .rows()
            .iter()
            .filter(|row| is_missing(row.get(column).map(String::as_str)))
            .count();
        results.insert(column.clone(), count);
    }
    results
}
