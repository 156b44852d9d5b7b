use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use edars::{io, Analysis, AnalysisConfig, AnalysisReport, Dataset};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// CSV（またはレコード指向JSON）ファイルを分析します:
/// 列の型、記述統計、相関、外れ値、欠損値
#[derive(Parser)]
#[command(name = "edars", version, about)]
struct Args {
    /// 入力ファイル（`.json` はレコードの配列、それ以外はCSVとして読み込む）
    input: PathBuf,

    /// TOML形式の設定ファイル
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// 実行する分析（複数指定可、設定ファイルより優先）
    #[arg(long = "analysis", value_enum)]
    analyses: Vec<Analysis>,

    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// 列ごとの分析を並列に計算する
    #[arg(long)]
    parallel: bool,

    /// プレビューの行数
    #[arg(long, value_name = "N")]
    preview: Option<usize>,

    /// CSVの区切り文字
    #[arg(long)]
    delimiter: Option<char>,

    /// CSVの1行目をヘッダーではなくデータとして扱う
    #[arg(long)]
    no_header: bool,

    /// IQR法のフェンスの倍率
    #[arg(long, value_name = "K")]
    iqr_multiplier: Option<f64>,
}

impl Args {
    fn analysis_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_file(path)
                .with_context(|| format!("設定ファイルを読み込めません: {}", path.display()))?,
            None => AnalysisConfig::default(),
        };

        if !self.analyses.is_empty() {
            config.analyses = self.analyses.clone();
        }
        if self.parallel {
            config.parallel = true;
        }
        if let Some(n) = self.preview {
            config.preview_rows = n;
        }
        if let Some(delimiter) = self.delimiter {
            config.csv.delimiter = delimiter;
        }
        if self.no_header {
            config.csv.has_header = false;
        }
        if let Some(k) = self.iqr_multiplier {
            config.iqr_multiplier = k;
        }

        config.validate().context("設定が無効です")?;
        Ok(config)
    }
}

fn load(path: &Path, config: &AnalysisConfig) -> Result<Dataset> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let dataset = if is_json {
        io::read_json(path)
    } else {
        io::read_csv(path, &config.csv)
    };
    dataset.with_context(|| format!("入力ファイルを読み込めません: {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = args.analysis_config()?;
    let dataset = load(&args.input, &config)?;
    let report = AnalysisReport::build(&dataset, &config);

    let output = match args.format {
        OutputFormat::Text => report.render_text(),
        OutputFormat::Json => {
            let mut json = report.to_json().context("レポートをJSONに変換できません")?;
            json.push('\n');
            json
        }
    };

    let mut stdout = std::io::stdout().lock();
    match stdout.write_all(output.as_bytes()) {
        Err(err) if err.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
        other => other.context("レポートを出力できません"),
    }
}
