//! diary-eval-rust
//!
//! 食事日誌のOCR/LLM抽出結果（予測JSON）を手動アノテーション（正解JSON）と
//! 比較し、エントリ・フィールド・項目の3粒度で精度指標を算出するライブラリ。
//!
//! 評価コアは2つのメモリ上ドキュメントの純粋関数であり、ファイルI/OとCLIは
//! 薄いアダプタ（scanner / batch / report）に分離している。

pub mod batch;
pub mod cli;
pub mod error;
pub mod evaluator;
pub mod matcher;
pub mod metrics;
pub mod normalizer;
pub mod report;
pub mod scanner;
pub mod types;

pub use error::{DiaryEvalError, Result};
pub use evaluator::{evaluate, evaluate_with_aliases, Evaluation};
pub use metrics::MetricsReport;
pub use normalizer::{MealAliasConfig, MealType};
pub use types::{DiaryDocument, DiaryEntry, FoodItem, RawDocument};
