//! 分析レポート
//!
//! 選択された分析を1つのデータセットに対して実行し、表示用にまとめます。
//! 各分析の結果は独立した [`Outcome`] として保持され、ある分析の失敗やデータ不足が
//! 他の分析の計算や表示を妨げることはありません。

mod render;

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::dataframe::Dataset;
use crate::error::{Error, Result};
use crate::parallel::ParallelUtils;
use crate::stats::{self, ColumnResults, ColumnTypes, CorrelationMatrix, DescriptiveStats};

/// 提供する分析の種類
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Analysis {
    /// 数値列ごとの記述統計
    Stats,
    /// 強さのラベル付きピアソン相関行列
    #[serde(rename = "corr")]
    #[value(name = "corr")]
    Correlation,
    /// 数値列ごとのIQR法による外れ値の件数
    Outliers,
    /// 列ごとの欠損値の件数
    Missing,
}

impl Analysis {
    pub const ALL: [Analysis; 4] = [
        Analysis::Stats,
        Analysis::Correlation,
        Analysis::Outliers,
        Analysis::Missing,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Analysis::Stats => "Descriptive Statistics",
            Analysis::Correlation => "Correlation Matrix",
            Analysis::Outliers => "Outlier Detection (IQR)",
            Analysis::Missing => "Missing Values",
        }
    }
}

/// 1つの分析の結果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "result", rename_all = "snake_case")]
pub enum Outcome<T> {
    Computed(T),
    /// 分析対象の行がない
    NoData { reason: String },
    Failed { reason: String },
    /// 設定で選択されていない
    Skipped,
}

impl<T> Outcome<T> {
    pub fn from_result(result: Result<T>) -> Self {
        match result {
            Ok(value) => Outcome::Computed(value),
            Err(Error::EmptyData(reason)) => Outcome::NoData { reason },
            Err(err) => Outcome::Failed {
                reason: error_chain(&err),
            },
        }
    }

    pub fn computed(&self) -> Option<&T> {
        match self {
            Outcome::Computed(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, Outcome::Computed(_))
    }
}

fn error_chain(err: &Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// 分析結果の上に表示するデータセット全体の件数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub row_count: usize,
    pub column_count: usize,
    pub numeric_column_count: usize,
    pub categorical_column_count: usize,
}

/// データセットの先頭行（列の位置順）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl Preview {
    pub fn of(dataset: &Dataset, rows: usize) -> Self {
        let head = dataset.head(rows);
        let columns = head.column_names().to_vec();
        let rows = head
            .rows()
            .iter()
            .map(|row| columns.iter().map(|c| row.get(c).cloned()).collect())
            .collect();
        Preview { columns, rows }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub overview: Overview,
    pub column_types: ColumnTypes,
    pub preview: Preview,
    /// 表示用の値（平均値・中央値・標準偏差は小数点以下2桁に丸め済み）
    pub descriptive: Outcome<ColumnResults<DescriptiveStats>>,
    pub correlation: Outcome<CorrelationMatrix>,
    pub outliers: Outcome<ColumnResults<usize>>,
    pub missing: Outcome<ColumnResults<usize>>,
}

impl AnalysisReport {
    /// `config` で有効な分析をすべて `dataset` に対して実行
    pub fn build(dataset: &Dataset, config: &AnalysisConfig) -> Self {
        let column_types = stats::classify_columns(dataset);
        let overview = Overview {
            row_count: dataset.row_count(),
            column_count: dataset.column_count(),
            numeric_column_count: column_types.numeric.len(),
            categorical_column_count: column_types.categorical.len(),
        };
        log::debug!(
            "レポートを作成します: {} 行, 数値列 {} / カテゴリ列 {}",
            overview.row_count,
            overview.numeric_column_count,
            overview.categorical_column_count
        );

        let parallel = config.parallel;
        let multiplier = config.iqr_multiplier;

        let descriptive = run(config, Analysis::Stats, || {
            let all = if parallel {
                ParallelUtils::describe_all(dataset, &column_types)
            } else {
                stats::describe_all(dataset, &column_types)
            }?;
            Ok(all.map(DescriptiveStats::rounded))
        });
        let correlation = run(config, Analysis::Correlation, || {
            if parallel {
                ParallelUtils::correlation_matrix(dataset, &column_types)
            } else {
                stats::correlation_matrix(dataset, &column_types)
            }
        });
        let outliers = run(config, Analysis::Outliers, || {
            if parallel {
                ParallelUtils::outlier_counts(dataset, &column_types, multiplier)
            } else {
                stats::outlier_counts(dataset, &column_types, multiplier)
            }
        });
        let missing = run(config, Analysis::Missing, || Ok(stats::missing_counts(dataset)));

        AnalysisReport {
            overview,
            preview: Preview::of(dataset, config.preview_rows),
            column_types,
            descriptive,
            correlation,
            outliers,
            missing,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 分析ごとのセクションに分けたテキスト形式の表
    pub fn render_text(&self) -> String {
        render::render_report(self)
    }
}

fn run<T, F>(config: &AnalysisConfig, analysis: Analysis, compute: F) -> Outcome<T>
where
    F: FnOnce() -> Result<T>,
{
    if !config.runs(analysis) {
        return Outcome::Skipped;
    }

    let outcome = Outcome::from_result(compute());
    match &outcome {
        Outcome::NoData { reason } => {
            log::warn!("{}: データがありません ({})", analysis.title(), reason)
        }
        Outcome::Failed { reason } => log::warn!("{} に失敗しました: {}", analysis.title(), reason),
        _ => log::debug!("{} を計算しました", analysis.title()),
    }
    outcome
}
