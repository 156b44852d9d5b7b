// データセット実装モジュール
pub mod base;

// Re-exports for convenience
pub use base::{Dataset, Row};
