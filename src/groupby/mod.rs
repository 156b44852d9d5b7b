use std::collections::HashMap;

use crate::dataframe::Dataset;
use crate::error::{Error, Result};
use crate::stats::classify::parse_numeric;
use crate::stats::ColumnResults;

/// キー列の値で行をグループ化した結果
///
/// グループはキーが最初に現れた順に並び、各グループ内の行は元の順序を保持します。
/// キーが欠落している行は空文字列のグループに入ります。
#[derive(Debug)]
pub struct GroupedRows<'a> {
    /// 元のデータセット
    source: &'a Dataset,
    /// キー列の名前
    key_column: String,
    /// グループのキーと行番号
    groups: Vec<(String, Vec<usize>)>,
}

/// キー列で行をグループ化
///
/// # 例
/// ```rust
/// use edars::{groupby, Dataset};
///
/// let ds = Dataset::from_records(
///     ["city", "sales"],
///     vec![vec!["A", "1"], vec!["B", "2"], vec!["A", "3"]],
/// ).unwrap();
/// let grouped = groupby::group_rows(&ds, "city").unwrap();
/// let series = grouped.numeric_series("sales").unwrap();
/// assert_eq!(series.get("A"), Some(&vec![1.0, 3.0]));
/// ```
pub fn group_rows<'a>(dataset: &'a Dataset, key_column: &str) -> Result<GroupedRows<'a>> {
    let keys = dataset.column_values(key_column)?;

    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
    for (row, key) in keys.into_iter().enumerate() {
        let key = key.unwrap_or_default();
        match positions.get(key) {
            Some(&pos) => groups[pos].1.push(row),
            None => {
                positions.insert(key, groups.len());
                groups.push((key.to_string(), vec![row]));
            }
        }
    }

    log::debug!("列 {} で {} グループに分割しました", key_column, groups.len());

    Ok(GroupedRows {
        source: dataset,
        key_column: key_column.to_string(),
        groups,
    })
}

impl<'a> GroupedRows<'a> {
    /// キー列の名前
    pub fn key_column(&self) -> &str {
        &self.key_column
    }

    /// グループ数
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// グループのキーを出現順に取得
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(k, _)| k.as_str())
    }

    /// グループに属する行番号
    pub fn indices(&self, key: &str) -> Option<&[usize]> {
        self.groups
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, rows)| rows.as_slice())
    }

    fn numeric_at(&self, row: usize, column: &str) -> Result<f64> {
        let raw = self.source.value(row, column);
        raw.and_then(parse_numeric)
            .ok_or_else(|| Error::NonNumericValue {
                column: column.to_string(),
                row,
                value: raw.unwrap_or_default().to_string(),
            })
    }

    fn check_column(&self, column: &str) -> Result<()> {
        if self.source.contains_column(column) {
            Ok(())
        } else {
            Err(Error::ColumnNotFound(column.to_string()))
        }
    }

    /// グループごとの数値系列
    pub fn numeric_series(&self, value_column: &str) -> Result<ColumnResults<Vec<f64>>> {
        self.check_column(value_column)?;
        self.groups
            .iter()
            .map(|(key, rows)| {
                rows.iter()
                    .map(|&row| self.numeric_at(row, value_column))
                    .collect::<Result<Vec<f64>>>()
                    .map(|values| (key.clone(), values))
            })
            .collect()
    }

    /// グループごとの散布図用の点 (x, y)
    pub fn scatter_points(
        &self,
        x_column: &str,
        y_column: &str,
    ) -> Result<ColumnResults<Vec<(f64, f64)>>> {
        self.check_column(x_column)?;
        self.check_column(y_column)?;
        self.groups
            .iter()
            .map(|(key, rows)| {
                rows.iter()
                    .map(|&row| Ok((self.numeric_at(row, x_column)?, self.numeric_at(row, y_column)?)))
                    .collect::<Result<Vec<(f64, f64)>>>()
                    .map(|points| (key.clone(), points))
            })
            .collect()
    }
}
