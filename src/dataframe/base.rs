use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};

/// 1行分のデータ（列名 → 生の文字列値）
pub type Row = HashMap<String, String>;

/// 行指向の表形式データセット
///
/// 取り込み時の順序で行を保持し、列名は最初に現れた順序で管理します。
/// 行は宣言された列の値を持たない場合があり（欠落）、その場合は空文字列と同様に扱われます。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// 列名（順序を保持）
    columns: Vec<String>,
    /// 行データ
    rows: Vec<Row>,
}

impl Dataset {
    /// 空のデータセットを作成
    pub fn new() -> Self {
        Dataset {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// 列名を指定してデータセットを作成
    ///
    /// 列名が重複している場合はエラーになります。
    pub fn with_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        for column in columns {
            let name = column.into();
            if !seen.insert(name.clone()) {
                return Err(Error::DuplicateColumnName(name));
            }
            names.push(name);
        }

        Ok(Dataset {
            columns: names,
            rows: Vec::new(),
        })
    }

    /// 列名と位置指定のレコード群からデータセットを作成
    ///
    /// ```
    /// use edars::Dataset;
    ///
    /// let ds = Dataset::from_records(
    ///     ["age", "city"],
    ///     vec![vec!["25", "A"], vec!["30", "B"]],
    /// ).unwrap();
    /// assert_eq!(ds.row_count(), 2);
    /// assert_eq!(ds.value(1, "city"), Some("B"));
    /// ```
    pub fn from_records<C, S, R, V, T>(columns: C, records: R) -> Result<Self>
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
        R: IntoIterator<Item = V>,
        V: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut ds = Dataset::with_columns(columns)?;
        for record in records {
            ds.push_record(record)?;
        }
        Ok(ds)
    }

    /// 列名をキーとした行を追加
    ///
    /// 宣言されていない列名を含む場合はエラーになります。
    /// 宣言済みの列が行に含まれていない場合、その値は欠落として扱われます。
    pub fn add_row(&mut self, row: Row) -> Result<()> {
        if let Some(unknown) = row.keys().find(|k| !self.contains_column(k)) {
            return Err(Error::ColumnNotFound(unknown.clone()));
        }
        self.rows.push(row);
        Ok(())
    }

    /// 列の宣言順に並んだ値で行を追加
    ///
    /// 値が列数より少ない場合、残りの列は欠落になります。
    pub fn push_record<V, T>(&mut self, values: V) -> Result<()>
    where
        V: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.len() > self.columns.len() {
            return Err(Error::DimensionMismatch(format!(
                "レコードの値の数 ({}) が列数 ({}) を超えています",
                values.len(),
                self.columns.len()
            )));
        }

        let row: Row = self.columns.iter().cloned().zip(values).collect();
        self.rows.push(row);
        Ok(())
    }

    /// 列名の一覧を取得
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// 列数を取得
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// 行数を取得
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 行が1つもないかどうか
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 列が存在するかどうか
    pub fn contains_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// すべての行を取得
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// 指定位置の値を取得（欠落している場合はNone）
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
    }

    /// 列の値を行順に取得
    pub fn column_values(&self, column: &str) -> Result<Vec<Option<&str>>> {
        if !self.contains_column(column) {
            return Err(Error::ColumnNotFound(column.to_string()));
        }

        Ok(self
            .rows
            .iter()
            .map(|r| r.get(column).map(String::as_str))
            .collect())
    }

    /// 先頭のn行だけを持つデータセットを作成（プレビュー用）
    pub fn head(&self, n: usize) -> Dataset {
        Dataset {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}
