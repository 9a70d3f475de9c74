//! 複数ペアの一括評価
//!
//! 各ペアの評価は完全に独立した副作用なしの計算のため、
//! rayonでペア単位に並列実行する。

use crate::error::Result;
use crate::evaluator::{self, Evaluation};
use crate::normalizer::MealAliasConfig;
use crate::scanner::{self, PairInfo};
use indicatif::ProgressBar;
use rayon::prelude::*;
use serde::Serialize;
use std::path::Path;

/// 1ペア分の評価結果（成功または失敗メッセージ）
#[derive(Debug)]
pub struct PairOutcome {
    pub stem: String,
    pub result: Result<Evaluation>,
}

/// バッチサマリの1行
#[derive(Debug, Clone, Serialize)]
pub struct BatchRow {
    pub stem: String,
    pub entries_f1: f64,
    pub items_f1: f64,
    pub warnings: usize,
}

/// バッチ全体のサマリ
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub pairs: usize,
    pub failed: usize,
    pub rows: Vec<BatchRow>,
}

/// ファイルパスのペアを1件評価する
pub fn evaluate_pair_files(
    predicted: &Path,
    ground_truth: &Path,
    aliases: &MealAliasConfig,
) -> Result<Evaluation> {
    let pred_doc = scanner::load_document(predicted)?;
    let gt_doc = scanner::load_document(ground_truth)?;
    evaluator::evaluate_with_aliases(&pred_doc, &gt_doc, aliases)
}

/// 発見済みのペアを並列評価する
///
/// 結果は入力と同じ順序（stem昇順）で返す。
pub fn evaluate_pairs(
    pairs: &[PairInfo],
    aliases: &MealAliasConfig,
    progress: &ProgressBar,
) -> Vec<PairOutcome> {
    pairs
        .par_iter()
        .map(|pair| {
            let result = evaluate_pair_files(&pair.predicted, &pair.ground_truth, aliases);
            progress.inc(1);
            PairOutcome {
                stem: pair.stem.clone(),
                result,
            }
        })
        .collect()
}

/// 評価結果からサマリを組み立てる
pub fn summarize(outcomes: &[PairOutcome]) -> BatchSummary {
    let rows: Vec<BatchRow> = outcomes
        .iter()
        .filter_map(|outcome| {
            outcome.result.as_ref().ok().map(|evaluation| BatchRow {
                stem: outcome.stem.clone(),
                entries_f1: evaluation.metrics.entries.f1,
                items_f1: evaluation.metrics.items.f1,
                warnings: evaluation.warnings.len(),
            })
        })
        .collect();

    BatchSummary {
        pairs: outcomes.len(),
        failed: outcomes.len() - rows.len(),
        rows,
    }
}
