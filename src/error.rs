use thiserror::Error;

/// エラー型の定義
#[derive(Error, Debug)]
pub enum Error {
    #[error("入出力エラー")]
    Io(#[source] std::io::Error),

    #[error("CSVエラー")]
    Csv(#[source] csv::Error),

    #[error("JSONエラー")]
    Json(#[source] serde_json::Error),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("列が見つかりません: {0}")]
    ColumnNotFound(String),

    #[error("列名が重複しています: {0}")]
    DuplicateColumnName(String),

    #[error("数値ではない値です: 列 {column}, 行 {row}, 値 {value:?}")]
    NonNumericValue {
        column: String,
        row: usize,
        value: String,
    },

    #[error("データがありません: {0}")]
    EmptyData(String),

    #[error("次元不一致エラー: {0}")]
    DimensionMismatch(String),

    #[error("無効な入力です: {0}")]
    InvalidInput(String),
}

pub type EdaError = Error;

/// Resultの型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// 「データなし」として扱うべきエラーかどうか
    pub fn is_empty_data(&self) -> bool {
        matches!(self, Error::EmptyData(_))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}
