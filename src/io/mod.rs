pub mod csv;
pub mod json;

// Re-export commonly used functions
pub use self::csv::{read_csv, read_csv_from_reader, CsvOptions};
pub use self::json::{read_json, read_json_from_reader};
