//! TOMLから読み込む分析設定
//!
//! すべての項目に既定値があるため、空のファイル（またはファイルなし）では
//! 4種類すべての分析、1.5×IQRのフェンス、5行のプレビューになります。
//!
//! ```toml
//! analyses = ["stats", "missing"]
//! iqr_multiplier = 3.0
//! parallel = true
//!
//! [csv]
//! delimiter = ";"
//! trim = true
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::io::CsvOptions;
use crate::report::Analysis;
use crate::stats::DEFAULT_IQR_MULTIPLIER;

/// プレビューに表示する行数の既定値
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    pub csv: CsvOptions,
    /// 実行する分析（表示順）
    pub analyses: Vec<Analysis>,
    pub iqr_multiplier: f64,
    pub preview_rows: usize,
    /// 列ごとの分析を rayon のスレッドプールで計算する
    pub parallel: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            csv: CsvOptions::default(),
            analyses: Analysis::ALL.to_vec(),
            iqr_multiplier: DEFAULT_IQR_MULTIPLIER,
            preview_rows: DEFAULT_PREVIEW_ROWS,
            parallel: false,
        }
    }
}

impl AnalysisConfig {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: AnalysisConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let input = fs::read_to_string(path).map_err(Error::Io)?;
        let config = Self::from_toml_str(&input)?;
        log::debug!("分析設定を読み込みました: {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.csv
            .delimiter_byte()
            .map_err(|e| Error::Config(e.to_string()))?;
        if !self.iqr_multiplier.is_finite() || self.iqr_multiplier < 0.0 {
            return Err(Error::Config(format!(
                "iqr_multiplier は0以上の有限値である必要があります: {}",
                self.iqr_multiplier
            )));
        }
        Ok(())
    }

    /// `analysis` が有効かどうか
    pub fn runs(&self, analysis: Analysis) -> bool {
        self.analyses.contains(&analysis)
    }
}
