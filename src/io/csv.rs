use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};

use crate::dataframe::Dataset;
use crate::error::{Error, Result};

/// CSV読み込みの設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    /// 区切り文字（ASCII）
    pub delimiter: char,
    /// 1行目をヘッダーとして扱うかどうか
    pub has_header: bool,
    /// 各フィールドの前後の空白を取り除くかどうか
    pub trim: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            delimiter: ',',
            has_header: true,
            trim: false,
        }
    }
}

impl CsvOptions {
    /// 区切り文字をバイトとして取得
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(Error::InvalidInput(format!(
                "区切り文字はASCII文字である必要があります: {:?}",
                self.delimiter
            )))
        }
    }
}

/// CSVファイルからDatasetを読み込む
pub fn read_csv<P: AsRef<Path>>(path: P, options: &CsvOptions) -> Result<Dataset> {
    let file = File::open(path.as_ref()).map_err(Error::Io)?;
    let ds = read_csv_from_reader(file, options)?;
    log::info!(
        "{} を読み込みました: {} 行, {} 列",
        path.as_ref().display(),
        ds.row_count(),
        ds.column_count()
    );
    Ok(ds)
}

/// 任意のリーダーからDatasetを読み込む
///
/// 空行は読み飛ばします。列数より短い行の残りの列は欠落として扱い、
/// 長すぎる行の余分なフィールドは無視します。
pub fn read_csv_from_reader<R: Read>(reader: R, options: &CsvOptions) -> Result<Dataset> {
    // CSVリーダーを設定
    let mut rdr = ReaderBuilder::new()
        .delimiter(options.delimiter_byte()?)
        .has_headers(options.has_header)
        .flexible(true)
        .trim(if options.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        })
        .from_reader(reader);

    let mut pending: Option<StringRecord> = None;

    // ヘッダー行を取得
    let headers: Vec<String> = if options.has_header {
        let headers = rdr.headers().map_err(Error::Csv)?;
        if headers.is_empty() || is_blank(headers) {
            Vec::new()
        } else {
            headers.iter().map(|h| h.to_string()).collect()
        }
    } else {
        // ヘッダーがない場合は、最初の行から推測して"column_0", "column_1"などとする
        // 最初のレコードは保留してデータとして扱う
        let mut names = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(Error::Csv)?;
            if is_blank(&record) {
                continue;
            }
            names = (0..record.len()).map(|i| format!("column_{}", i)).collect();
            pending = Some(record);
            break;
        }
        names
    };

    if headers.is_empty() {
        log::warn!("CSVが空です");
        return Ok(Dataset::new());
    }

    let mut ds = Dataset::with_columns(headers)?;
    let width = ds.column_count();

    for (index, result) in pending.into_iter().map(Ok).chain(rdr.records()).enumerate() {
        let record = result.map_err(Error::Csv)?;
        if is_blank(&record) {
            continue;
        }

        if record.len() > width {
            log::warn!(
                "レコード {} のフィールド数 ({}) が列数 ({}) を超えています。余分なフィールドは無視します",
                index + 1,
                record.len(),
                width
            );
        }
        ds.push_record(record.iter().take(width))?;
    }

    Ok(ds)
}

fn is_blank(record: &StringRecord) -> bool {
    record.len() == 1 && record[0].is_empty()
}
