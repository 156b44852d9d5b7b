//! # edars
//!
//! Exploratory data analysis engine for tabular data.
//!
//! A [`Dataset`] of raw string cells goes in; the engine classifies columns as
//! numeric or categorical and computes descriptive statistics, a Pearson
//! correlation matrix, IQR outlier counts and missing-value counts. Every
//! analysis is a pure function of the dataset.
//!
//! ```
//! use edars::{stats, Dataset};
//!
//! let ds = Dataset::from_records(
//!     ["age", "city"],
//!     vec![vec!["25", "A"], vec!["30", "B"], vec!["", "A"]],
//! ).unwrap();
//!
//! let types = stats::classify_columns(&ds);
//! assert!(types.numeric.is_empty());
//! assert_eq!(stats::missing_count(&ds, "age").unwrap(), 1);
//! ```

pub mod config;
pub mod dataframe;
pub mod error;
pub mod groupby;
pub mod io;
pub mod parallel;
pub mod report;
pub mod stats;

// Re-export commonly used types
pub use config::AnalysisConfig;
pub use dataframe::{Dataset, Row};
pub use error::{EdaError, Error, Result};
pub use groupby::GroupedRows;
pub use parallel::ParallelUtils;
pub use report::{Analysis, AnalysisReport, Outcome};
pub use stats::{ColumnResults, ColumnTypes, CorrelationMatrix, DescriptiveStats, Strength};

// Export version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
