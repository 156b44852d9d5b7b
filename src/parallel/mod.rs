//! 並列処理機能を提供するモジュール
//!
//! 列ごとの分析を rayon のスレッドプールで計算します。結果は逐次版と同一です。

use rayon::prelude::*;

use crate::dataframe::Dataset;
use crate::error::Result;
use crate::stats::{
    self, correlation, numeric_values, outlier, ColumnResults, ColumnTypes, CorrelationMatrix,
    DescriptiveStats,
};

/// 並列処理ユーティリティ
pub struct ParallelUtils;

impl ParallelUtils {
    /// すべての数値列の記述統計を並列に計算
    pub fn describe_all(
        dataset: &Dataset,
        types: &ColumnTypes,
    ) -> Result<ColumnResults<DescriptiveStats>> {
        let results = types
            .numeric
            .par_iter()
            .map(|c| stats::describe_column(dataset, c).map(|s| (c.clone(), s)))
            .collect::<Result<Vec<_>>>()?;
        Ok(results.into_iter().collect())
    }

    /// すべての数値列の外れ値件数を並列に計算
    pub fn outlier_counts(
        dataset: &Dataset,
        types: &ColumnTypes,
        multiplier: f64,
    ) -> Result<ColumnResults<usize>> {
        let results = types
            .numeric
            .par_iter()
            .map(|c| {
                let values = numeric_values(dataset, c)?;
                outlier::count_impl(&values, multiplier).map(|n| (c.clone(), n))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(results.into_iter().collect())
    }

    /// 相関行列を並列に計算（行ごとに分割）
    pub fn correlation_matrix(
        dataset: &Dataset,
        types: &ColumnTypes,
    ) -> Result<CorrelationMatrix> {
        let columns = types
            .numeric
            .par_iter()
            .map(|c| numeric_values(dataset, c))
            .collect::<Result<Vec<_>>>()?;

        let coefficients = columns
            .par_iter()
            .map(|x| {
                columns
                    .iter()
                    .map(|y| correlation::pearson_impl(x, y))
                    .collect::<Result<Vec<f64>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(correlation::matrix_from_parts(
            types.numeric.clone(),
            coefficients,
        ))
    }
}
