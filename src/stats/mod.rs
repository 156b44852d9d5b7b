// edars 統計モジュール
//
// このモジュールは、探索的データ分析のための統計機能を提供します。
// 列の型判定、記述統計、相関係数、外れ値検出、欠損値の集計が実装されています。
// すべての関数はデータセットを変更しない純粋関数です。

pub mod classify;
pub mod correlation;
pub mod descriptive;
pub mod missing;
pub mod outlier;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::dataframe::Dataset;
use crate::error::Result;

pub use classify::{is_numeric_value, ColumnType, ColumnTypes};
pub use correlation::{CorrelationMatrix, Strength};
pub use outlier::{Fence, DEFAULT_IQR_MULTIPLIER};

/// 表示用に丸める小数点以下の桁数
pub const DISPLAY_DECIMALS: u32 = 2;

/// 列名をキーとした結果の集合（列の順序を保持）
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnResults<T> {
    entries: Vec<(String, T)>,
}

impl<T> ColumnResults<T> {
    pub fn new() -> Self {
        ColumnResults {
            entries: Vec::new(),
        }
    }

    /// 結果を追加（同じ列名が既にあれば置き換え）
    pub fn insert(&mut self, column: impl Into<String>, value: T) {
        let column = column.into();
        match self.entries.iter_mut().find(|(c, _)| *c == column) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(c, _)| c == column)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 列名を順に取得
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(c, _)| c.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(c, v)| (c.as_str(), v))
    }

    /// 各値を変換した新しい結果集合を作成
    pub fn map<U, F>(&self, mut f: F) -> ColumnResults<U>
    where
        F: FnMut(&T) -> U,
    {
        ColumnResults {
            entries: self
                .entries
                .iter()
                .map(|(c, v)| (c.clone(), f(v)))
                .collect(),
        }
    }
}

impl<T> Default for ColumnResults<T> {
    fn default() -> Self {
        ColumnResults::new()
    }
}

impl<T> FromIterator<(String, T)> for ColumnResults<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        let mut results = ColumnResults::new();
        for (column, value) in iter {
            results.insert(column, value);
        }
        results
    }
}

impl<T: Serialize> Serialize for ColumnResults<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (column, value) in &self.entries {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// 記述統計量の結果を保持する構造体
///
/// 値は完全な精度で保持されます。表示用には [`DescriptiveStats::rounded`] を使用します。
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct DescriptiveStats {
    /// データの件数
    pub count: usize,
    /// 最小値
    pub min: f64,
    /// 最大値
    pub max: f64,
    /// 平均値
    pub mean: f64,
    /// 中央値
    pub median: f64,
    /// 標準偏差（母標準偏差）
    pub std: f64,
}

impl DescriptiveStats {
    /// 平均値・中央値・標準偏差を小数点以下2桁に丸めた表示用の値
    pub fn rounded(&self) -> DescriptiveStats {
        DescriptiveStats {
            mean: round_to(self.mean, DISPLAY_DECIMALS),
            median: round_to(self.median, DISPLAY_DECIMALS),
            std: round_to(self.std, DISPLAY_DECIMALS),
            ..*self
        }
    }
}

/// 指定した小数点以下の桁数に丸める
///
/// ```
/// assert_eq!(edars::stats::round_to(0.12345, 2), 0.12);
/// assert_eq!(edars::stats::round_to(-0.001, 2), 0.0);
/// assert_eq!(edars::stats::round_to(1e307, 2), 1e307);
/// ```
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    // この大きさの値には小数部がないので、そのまま返す
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / factor;
    // -0.0 を 0.0 に正規化
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// 列を数値列とカテゴリ列に分類
///
/// # 例
/// ```rust
/// use edars::{stats, Dataset};
///
/// let ds = Dataset::from_records(
///     ["age", "city"],
///     vec![vec!["25", "A"], vec!["30", "B"]],
/// ).unwrap();
/// let types = stats::classify_columns(&ds);
/// assert_eq!(types.numeric, vec!["age"]);
/// assert_eq!(types.categorical, vec!["city"]);
/// ```
pub fn classify_columns(dataset: &Dataset) -> ColumnTypes {
    classify::classify_impl(dataset)
}

/// 数値列の値を行順に取得
///
/// 空・欠落・数値でない値があれば `NonNumericValue` エラーになります。
pub fn numeric_values(dataset: &Dataset, column: &str) -> Result<Vec<f64>> {
    classify::numeric_values_impl(dataset, column)
}

/// データの基本統計量を計算
///
/// # 例
/// ```rust
/// use edars::stats;
///
/// let stats = stats::describe(&[10.0, 20.0, 30.0, 40.0, 100.0]).unwrap();
/// assert_eq!(stats.mean, 40.0);
/// assert_eq!(stats.median, 30.0);
/// ```
pub fn describe<T: AsRef<[f64]>>(data: T) -> Result<DescriptiveStats> {
    descriptive::describe_impl(data.as_ref())
}

/// データセットの1列に対する基本統計量を計算
pub fn describe_column(dataset: &Dataset, column: &str) -> Result<DescriptiveStats> {
    let values = numeric_values(dataset, column)?;
    descriptive::describe_impl(&values)
}

/// すべての数値列に対する基本統計量を計算
pub fn describe_all(
    dataset: &Dataset,
    types: &ColumnTypes,
) -> Result<ColumnResults<DescriptiveStats>> {
    types
        .numeric
        .iter()
        .map(|c| describe_column(dataset, c).map(|s| (c.clone(), s)))
        .collect()
}

/// ピアソン相関係数を計算（丸めなし）
///
/// どちらかの分散がゼロの場合は 0 を返します。
///
/// # 例
/// ```rust
/// use edars::stats;
///
/// let x = vec![1.0, 2.0, 3.0, 4.0];
/// let y = vec![2.0, 4.0, 6.0, 8.0];
/// assert!((stats::pearson(&x, &y).unwrap() - 1.0).abs() < 1e-12);
/// assert_eq!(stats::pearson(&x, &[3.0; 4]).unwrap(), 0.0);
/// ```
pub fn pearson<T: AsRef<[f64]>, U: AsRef<[f64]>>(x: T, y: U) -> Result<f64> {
    correlation::pearson_impl(x.as_ref(), y.as_ref())
}

/// すべての数値列の組に対する相関行列を計算
pub fn correlation_matrix(dataset: &Dataset, types: &ColumnTypes) -> Result<CorrelationMatrix> {
    let columns = types
        .numeric
        .iter()
        .map(|c| numeric_values(dataset, c).map(|v| (c.clone(), v)))
        .collect::<Result<Vec<_>>>()?;
    correlation::matrix_impl(&columns)
}

/// IQR法によるフェンスを計算
pub fn iqr_fence<T: AsRef<[f64]>>(data: T, multiplier: f64) -> Result<Fence> {
    outlier::fence_impl(data.as_ref(), multiplier)
}

/// IQR法（1.5×IQR）による外れ値の件数
///
/// # 例
/// ```rust
/// use edars::stats;
///
/// assert_eq!(stats::outlier_count(&[10.0, 20.0, 30.0, 40.0, 100.0]).unwrap(), 1);
/// ```
pub fn outlier_count<T: AsRef<[f64]>>(data: T) -> Result<usize> {
    outlier::count_impl(data.as_ref(), DEFAULT_IQR_MULTIPLIER)
}

/// フェンスの倍率を指定した外れ値の件数
pub fn outlier_count_with_multiplier<T: AsRef<[f64]>>(data: T, multiplier: f64) -> Result<usize> {
    outlier::count_impl(data.as_ref(), multiplier)
}

/// すべての数値列に対する外れ値の件数
pub fn outlier_counts(
    dataset: &Dataset,
    types: &ColumnTypes,
    multiplier: f64,
) -> Result<ColumnResults<usize>> {
    types
        .numeric
        .iter()
        .map(|c| {
            let values = numeric_values(dataset, c)?;
            outlier::count_impl(&values, multiplier).map(|n| (c.clone(), n))
        })
        .collect()
}

/// 1列の欠損値（空文字列または欠落）の件数
pub fn missing_count(dataset: &Dataset, column: &str) -> Result<usize> {
    missing::count_impl(dataset, column)
}

/// すべての列に対する欠損値の件数
pub fn missing_counts(dataset: &Dataset) -> ColumnResults<usize> {
    missing::counts_impl(dataset)
}
