// 記述統計モジュール

use crate::error::{Error, Result};
use crate::stats::DescriptiveStats;

/// 記述統計量を計算する内部実装
pub(crate) fn describe_impl(data: &[f64]) -> Result<DescriptiveStats> {
    if data.is_empty() {
        return Err(Error::EmptyData(
            "記述統計量の計算には少なくとも1つのデータが必要です".into(),
        ));
    }

    let count = data.len();
    let n = count as f64;

    // 桁あふれを避けるため、2の累乗で縮小した値で計算して元に戻す
    let scale = scale_factor(data);

    // 平均値の計算
    let scaled_mean = data.iter().map(|&x| x / scale).sum::<f64>() / n;
    let mean = scaled_mean * scale;

    // 標準偏差の計算（母標準偏差、nで割る）
    let variance = data
        .iter()
        .map(|&x| (x / scale - scaled_mean).powi(2))
        .sum::<f64>()
        / n;
    let std = variance.sqrt() * scale;

    // データをソートして中央値を計算
    let sorted = sorted_copy(data);

    let min = sorted[0];
    let max = sorted[count - 1];

    let median = if count % 2 == 0 {
        sorted[count / 2 - 1] / 2.0 + sorted[count / 2] / 2.0
    } else {
        sorted[count / 2]
    };

    Ok(DescriptiveStats {
        count,
        min,
        max,
        mean,
        median,
        std,
    })
}

/// 絶対値の最大が1以下に収まる2の累乗の縮小率
///
/// 2の累乗で割るため、通常の大きさの値では結果が変わりません。
pub(crate) fn scale_factor(data: &[f64]) -> f64 {
    let max_abs = data.iter().fold(0.0f64, |m, &x| m.max(x.abs()));
    if max_abs <= 1.0 {
        return 1.0;
    }
    let exponent = (max_abs.log2().ceil() as i32).clamp(0, 1023);
    2f64.powi(exponent)
}

/// 昇順にソートしたコピーを作成
pub(crate) fn sorted_copy(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}
