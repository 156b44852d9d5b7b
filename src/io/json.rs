use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::{Map, Value};

use crate::dataframe::{Dataset, Row};
use crate::error::{Error, Result};

/// レコード指向JSON（オブジェクトの配列）からDatasetを読み込む
pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let file = File::open(path.as_ref()).map_err(Error::Io)?;
    let ds = read_json_from_reader(BufReader::new(file))?;
    log::info!(
        "{} を読み込みました: {} 行, {} 列",
        path.as_ref().display(),
        ds.row_count(),
        ds.column_count()
    );
    Ok(ds)
}

/// 任意のリーダーからレコード指向JSONを読み込む
///
/// 列の順序はキーが最初に現れた順です。`null` は欠落として扱い、
/// 数値と真偽値は文字列に変換します。
pub fn read_json_from_reader<R: Read>(reader: R) -> Result<Dataset> {
    // JSONを解析
    let json_value: Value = serde_json::from_reader(reader).map_err(Error::Json)?;

    let array = match json_value {
        Value::Array(array) => array,
        _ => {
            return Err(Error::InvalidInput(
                "JSONはオブジェクトの配列である必要があります".to_string(),
            ))
        }
    };

    // 全てのキーを出現順に収集
    let mut columns: Vec<String> = Vec::new();
    let mut objects: Vec<Map<String, Value>> = Vec::with_capacity(array.len());
    for item in array {
        match item {
            Value::Object(map) => {
                for key in map.keys() {
                    if !columns.contains(key) {
                        columns.push(key.clone());
                    }
                }
                objects.push(map);
            }
            _ => {
                return Err(Error::InvalidInput(
                    "配列の各要素はオブジェクトである必要があります".to_string(),
                ))
            }
        }
    }

    let mut ds = Dataset::with_columns(columns)?;
    for (index, object) in objects.into_iter().enumerate() {
        let mut row = Row::new();
        for (key, value) in object {
            if let Some(raw) = raw_value(&key, index, value)? {
                row.insert(key, raw);
            }
        }
        ds.add_row(row)?;
    }

    Ok(ds)
}

fn raw_value(key: &str, index: usize, value: Value) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => Err(Error::InvalidInput(format!(
            "レコード {} の列 {} の値がスカラーではありません",
            index, key
        ))),
    }
}
