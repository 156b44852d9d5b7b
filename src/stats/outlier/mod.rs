// 外れ値検出モジュール（IQR法）

use serde::Serialize;

use crate::error::{Error, Result};
use crate::stats::descriptive::{scale_factor, sorted_copy};

/// フェンスの既定倍率
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

/// IQR法のフェンス
///
/// 四分位点は補間せず、ソート済みデータの `floor(n * p)` 番目の値を使います。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Fence {
    /// 第1四分位点
    pub q1: f64,
    /// 第3四分位点
    pub q3: f64,
    /// 四分位範囲
    pub iqr: f64,
    /// 下側フェンス
    pub lower: f64,
    /// 上側フェンス
    pub upper: f64,
}

impl Fence {
    /// フェンスの外側（境界を含まない）にある値かどうか
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }
}

fn check_multiplier(multiplier: f64) -> Result<()> {
    if !multiplier.is_finite() || multiplier < 0.0 {
        return Err(Error::InvalidInput(format!(
            "フェンスの倍率は0以上の有限値である必要があります: {}",
            multiplier
        )));
    }
    Ok(())
}

/// ソート済みデータからフェンスを計算
fn fence_sorted(sorted: &[f64], multiplier: f64) -> Fence {
    let n = sorted.len();
    let q1 = sorted[(n as f64 * 0.25).floor() as usize];
    let q3 = sorted[(n as f64 * 0.75).floor() as usize];
    // 四分位範囲は桁あふれし得るので縮小した値で幅を求める
    let scale = scale_factor(&[q1, q3]);
    let iqr = q3 - q1;
    let spread = multiplier * (q3 / scale - q1 / scale) * scale;

    Fence {
        q1,
        q3,
        iqr,
        lower: q1 - spread,
        upper: q3 + spread,
    }
}

/// フェンスを計算する内部実装
pub(crate) fn fence_impl(data: &[f64], multiplier: f64) -> Result<Fence> {
    check_multiplier(multiplier)?;
    if data.is_empty() {
        return Err(Error::EmptyData(
            "四分位点の計算には少なくとも1つのデータが必要です".into(),
        ));
    }
    Ok(fence_sorted(&sorted_copy(data), multiplier))
}

/// 外れ値の件数を計算する内部実装
pub(crate) fn count_impl(data: &[f64], multiplier: f64) -> Result<usize> {
    let fence = fence_impl(data, multiplier)?;
    Ok(data.iter().filter(|&&v| fence.is_outlier(v)).count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_high_outlier() {
        let data = vec![10.0, 20.0, 30.0, 40.0, 100.0];
        let fence = fence_impl(&data, DEFAULT_IQR_MULTIPLIER).unwrap();

        // n=5: Q1 = v[1], Q3 = v[3]
        assert_eq!(fence.q1, 20.0);
        assert_eq!(fence.q3, 40.0);
        assert_eq!(fence.iqr, 20.0);
        assert_eq!(fence.lower, -10.0);
        assert_eq!(fence.upper, 70.0);
        assert_eq!(count_impl(&data, DEFAULT_IQR_MULTIPLIER).unwrap(), 1);
    }

    #[test]
    fn test_index_based_quantiles_not_interpolated() {
        // n=4: Q1 = v[1] = 2, Q3 = v[3] = 4（補間なら 1.75 / 3.25）
        let fence = fence_impl(&[4.0, 1.0, 3.0, 2.0], 1.5).unwrap();
        assert_eq!(fence.q1, 2.0);
        assert_eq!(fence.q3, 4.0);
    }

    #[test]
    fn test_boundary_values_are_not_outliers() {
        // Q1 = 0, Q3 = 10, 上側フェンス = 25
        let data = vec![0.0, 0.0, 10.0, 10.0, 25.0];
        assert_eq!(count_impl(&data, 1.5).unwrap(), 0);
    }

    #[test]
    fn test_single_value() {
        assert_eq!(count_impl(&[42.0], 1.5).unwrap(), 0);
    }

    #[test]
    fn test_zero_multiplier() {
        // フェンスが [Q1, Q3] になる
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let fence = fence_impl(&data, 0.0).unwrap();
        assert_eq!((fence.lower, fence.upper), (3.0, 7.0));
        assert_eq!(count_impl(&data, 0.0).unwrap(), 3);
    }

    #[test]
    fn test_large_values_with_zero_multiplier() {
        // Q3 - Q1 は f64 の範囲を超える
        let data = vec![-1.7e308, -1.6e308, 0.0, 1.6e308, 1.7e308];
        let fence = fence_impl(&data, 0.0).unwrap();
        assert_eq!((fence.lower, fence.upper), (-1.6e308, 1.6e308));
        assert_eq!(count_impl(&data, 0.0).unwrap(), 2);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(count_impl(&[], 1.5), Err(Error::EmptyData(_))));
        assert!(matches!(
            count_impl(&[1.0], -1.0),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            count_impl(&[1.0], f64::NAN),
            Err(Error::InvalidInput(_))
        ));
    }
}
