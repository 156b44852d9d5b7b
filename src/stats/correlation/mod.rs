// 相関分析モジュール

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{Error, Result};
use crate::stats::descriptive::scale_factor;
use crate::stats::{round_to, DISPLAY_DECIMALS};

/// 相関の強さ
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum Strength {
    Strong,
    Moderate,
    Weak,
}

impl Strength {
    /// 丸めた相関係数から相関の強さを判定
    ///
    /// ```
    /// use edars::stats::Strength;
    ///
    /// assert_eq!(Strength::from_coefficient(-0.71), Strength::Strong);
    /// assert_eq!(Strength::from_coefficient(0.7), Strength::Moderate);
    /// assert_eq!(Strength::from_coefficient(0.4), Strength::Weak);
    /// ```
    pub fn from_coefficient(value: f64) -> Self {
        let abs = value.abs();
        if abs > 0.7 {
            Strength::Strong
        } else if abs > 0.4 {
            Strength::Moderate
        } else {
            Strength::Weak
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strength::Strong => "Strong",
            Strength::Moderate => "Moderate",
            Strength::Weak => "Weak",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 数値列同士の相関行列
///
/// 係数は完全な精度で保持し、[`CorrelationMatrix::get`] は小数点以下2桁に丸めた値を返します。
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    columns: Vec<String>,
    coefficients: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// 行列の列名（行と列で共通）
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// 丸めていない相関係数
    pub fn raw(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.position(a)?;
        let j = self.position(b)?;
        Some(self.coefficients[i][j])
    }

    /// 小数点以下2桁に丸めた相関係数
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        self.raw(a, b).map(|r| round_to(r, DISPLAY_DECIMALS))
    }

    /// 丸めた相関係数に対する相関の強さ
    pub fn strength(&self, a: &str, b: &str) -> Option<Strength> {
        self.get(a, b).map(Strength::from_coefficient)
    }
}

struct Cell {
    r: f64,
    strength: Strength,
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("r", &self.r)?;
        map.serialize_entry("strength", &self.strength)?;
        map.end()
    }
}

struct MatrixRow<'a> {
    matrix: &'a CorrelationMatrix,
    row: usize,
}

impl Serialize for MatrixRow<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let columns = &self.matrix.columns;
        let mut map = serializer.serialize_map(Some(columns.len()))?;
        for (j, column) in columns.iter().enumerate() {
            let r = round_to(self.matrix.coefficients[self.row][j], DISPLAY_DECIMALS);
            let cell = Cell {
                r,
                strength: Strength::from_coefficient(r),
            };
            map.serialize_entry(column, &cell)?;
        }
        map.end()
    }
}

impl Serialize for CorrelationMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (i, column) in self.columns.iter().enumerate() {
            map.serialize_entry(column, &MatrixRow { matrix: self, row: i })?;
        }
        map.end()
    }
}

/// ピアソン相関係数を計算する内部実装
///
/// どちらかの分散がゼロの場合は 0 を返します（対角成分も特別扱いしません）。
pub(crate) fn pearson_impl(x: &[f64], y: &[f64]) -> Result<f64> {
    if x.len() != y.len() {
        return Err(Error::DimensionMismatch(format!(
            "相関係数計算のデータ長が一致しません: x={}, y={}",
            x.len(),
            y.len()
        )));
    }

    if x.is_empty() {
        return Err(Error::EmptyData("相関係数計算にはデータが必要です".into()));
    }

    // 定数列の平均には丸め誤差が残るため、値の一致で分散ゼロを判定する
    if is_constant(x) || is_constant(y) {
        return Ok(0.0);
    }

    // 相関係数は尺度に依存しないので、桁あふれしない大きさに縮小してから計算する
    let scale_x = scale_factor(x);
    let scale_y = scale_factor(y);
    let x: Vec<f64> = x.iter().map(|&v| v / scale_x).collect();
    let y: Vec<f64> = y.iter().map(|&v| v / scale_y).collect();

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    // 分子: Σ(xi - x̄)(yi - ȳ)
    let numerator = x
        .iter()
        .zip(y.iter())
        .map(|(&xi, &yi)| (xi - mean_x) * (yi - mean_y))
        .sum::<f64>();

    // 分母: √[Σ(xi - x̄)² * Σ(yi - ȳ)²]
    let sum_squared_diff_x = x.iter().map(|&xi| (xi - mean_x).powi(2)).sum::<f64>();
    let sum_squared_diff_y = y.iter().map(|&yi| (yi - mean_y).powi(2)).sum::<f64>();

    let denominator = (sum_squared_diff_x * sum_squared_diff_y).sqrt();

    if denominator == 0.0 {
        return Ok(0.0);
    }

    Ok((numerator / denominator).clamp(-1.0, 1.0))
}

fn is_constant(data: &[f64]) -> bool {
    data.windows(2).all(|w| w[0] == w[1])
}

/// 相関行列を計算する内部実装
///
/// すべての順序付きの組を評価します。
pub(crate) fn matrix_impl(columns: &[(String, Vec<f64>)]) -> Result<CorrelationMatrix> {
    let coefficients = columns
        .iter()
        .map(|(_, x)| {
            columns
                .iter()
                .map(|(_, y)| pearson_impl(x, y))
                .collect::<Result<Vec<f64>>>()
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorrelationMatrix {
        columns: columns.iter().map(|(c, _)| c.clone()).collect(),
        coefficients,
    })
}

/// 計算済みの係数から相関行列を組み立てる
pub(crate) fn matrix_from_parts(
    columns: Vec<String>,
    coefficients: Vec<Vec<f64>>,
) -> CorrelationMatrix {
    CorrelationMatrix {
        columns,
        coefficients,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correlation() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let corr = pearson_impl(&x, &y).unwrap();
        assert!((corr - 1.0).abs() < 1e-10);

        let y_neg = vec![5.0, 4.0, 3.0, 2.0, 1.0];
        let corr_neg = pearson_impl(&x, &y_neg).unwrap();
        assert!((corr_neg + 1.0).abs() < 1e-10);

        // 分散ゼロはエラーではなく 0
        let y_const = vec![3.0, 3.0, 3.0, 3.0, 3.0];
        assert_eq!(pearson_impl(&x, &y_const).unwrap(), 0.0);
    }

    #[test]
    fn test_correlation_constant_with_rounding_residue() {
        // 平均に丸め誤差が出ても定数列として扱われる
        let x = vec![0.1, 0.1, 0.1];
        assert_eq!(pearson_impl(&x, &x).unwrap(), 0.0);
    }

    #[test]
    fn test_correlation_errors() {
        assert!(matches!(
            pearson_impl(&[1.0, 2.0], &[1.0]),
            Err(Error::DimensionMismatch(_))
        ));
        assert!(matches!(pearson_impl(&[], &[]), Err(Error::EmptyData(_))));
    }

    #[test]
    fn test_correlation_large_values() {
        let x = vec![1e200, 2e200, 3e200];
        let y: Vec<f64> = x.iter().map(|v| v * 2.0).collect();
        let corr = pearson_impl(&x, &y).unwrap();
        assert!((corr - 1.0).abs() < 1e-10);

        let z = vec![1.7e308, -1.7e308, 1.0e308];
        let corr = pearson_impl(&z, &[1.0, 2.0, 3.0]).unwrap();
        assert!(corr.is_finite());
        assert!((-1.0..=1.0).contains(&corr));
    }

    #[test]
    fn test_single_value_is_zero_variance() {
        assert_eq!(pearson_impl(&[4.0], &[9.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_strength_thresholds() {
        assert_eq!(Strength::from_coefficient(1.0), Strength::Strong);
        assert_eq!(Strength::from_coefficient(0.71), Strength::Strong);
        assert_eq!(Strength::from_coefficient(0.70), Strength::Moderate);
        assert_eq!(Strength::from_coefficient(-0.41), Strength::Moderate);
        assert_eq!(Strength::from_coefficient(0.40), Strength::Weak);
        assert_eq!(Strength::from_coefficient(0.0), Strength::Weak);
        assert_eq!(Strength::Moderate.to_string(), "Moderate");
    }

    #[test]
    fn test_matrix_symmetric_and_diagonal() {
        let columns = vec![
            ("a".to_string(), vec![1.0, 2.0, 3.0, 4.0]),
            ("b".to_string(), vec![2.0, 1.0, 4.0, 3.0]),
            ("c".to_string(), vec![5.0, 5.0, 5.0, 5.0]),
        ];
        let matrix = matrix_impl(&columns).unwrap();

        assert_eq!(matrix.get("a", "a"), Some(1.0));
        assert_eq!(matrix.get("b", "b"), Some(1.0));
        assert_eq!(matrix.get("c", "c"), Some(0.0));
        assert_eq!(matrix.get("a", "b"), matrix.get("b", "a"));
        assert_eq!(matrix.get("a", "b"), Some(0.6));
        assert_eq!(matrix.strength("a", "b"), Some(Strength::Moderate));
        assert_eq!(matrix.get("a", "z"), None);
    }
}
