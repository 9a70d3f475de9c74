//! レポート整形（コンソール表示とJSON出力）
//!
//! 評価コアの成果物は `Evaluation` のJSONそのもの。ここは表示用の薄い層。

use crate::batch::BatchSummary;
use crate::error::Result;
use crate::evaluator::Evaluation;
use crate::types::EvalWarning;
use serde::Serialize;
use std::path::Path;

/// 評価サマリをコンソールに表示する
///
/// 警告の明細は `verbose` のときのみ表示する（件数は常に出す）
pub fn print_summary(evaluation: &Evaluation, verbose: bool) {
    let m = &evaluation.metrics;

    println!("📊 評価サマリ");
    println!(
        "  入力: 予測 {}件 (除外{}) / 正解 {}件 (除外{})",
        evaluation.predicted.entries,
        evaluation.predicted.skipped,
        evaluation.ground_truth.entries,
        evaluation.ground_truth.skipped,
    );
    println!(
        "  エントリ: P {} / R {} / F1 {}  (対応{} 過剰{} 取りこぼし{})",
        pct(m.entries.precision),
        pct(m.entries.recall),
        pct(m.entries.f1),
        m.entries.matched,
        m.entries.unmatched_predicted,
        m.entries.unmatched_ground_truth,
    );
    println!(
        "  フィールド: 日付 {} / 時刻 {} / 食事区分 {}",
        pct(m.fields.date_accuracy),
        pct(m.fields.time_accuracy),
        pct(m.fields.meal_type_accuracy),
    );
    println!(
        "  項目: P {} / R {} / F1 {}  (対応{} 過剰{} 取りこぼし{})",
        pct(m.items.precision),
        pct(m.items.recall),
        pct(m.items.f1),
        m.items.matched,
        m.items.unmatched_predicted,
        m.items.unmatched_ground_truth,
    );
    println!(
        "  数量一致 {} / 単位一致 {} (品名対応ペア上)",
        pct(m.items.quantity_accuracy_on_matched_names),
        pct(m.items.unit_accuracy_on_matched_names),
    );

    if !m.diagnostics.missing_entry_keys.is_empty() {
        println!("  取りこぼしキー: {}", m.diagnostics.missing_entry_keys.join(", "));
    }
    if !m.diagnostics.extra_entry_keys.is_empty() {
        println!("  過剰検出キー: {}", m.diagnostics.extra_entry_keys.join(", "));
    }

    if !evaluation.warnings.is_empty() {
        if verbose {
            println!("  ⚠ 警告 {}件:", evaluation.warnings.len());
            for warning in &evaluation.warnings {
                println!("    - {}", format_warning(warning));
            }
        } else {
            println!("  ⚠ 警告 {}件 (明細は -v で表示)", evaluation.warnings.len());
        }
    }
}

/// 警告1件分の表示行
fn format_warning(warning: &EvalWarning) -> String {
    format!(
        "[{}側 #{}] {}",
        warning.document, warning.entry_index, warning.message
    )
}

/// バッチサマリをコンソールに表示する
pub fn print_batch_summary(summary: &BatchSummary) {
    println!("📊 バッチ評価サマリ: {}ペア (失敗{})", summary.pairs, summary.failed);
    for row in &summary.rows {
        println!(
            "  {}: エントリF1 {} / 項目F1 {} / 警告{}件",
            row.stem,
            pct(row.entries_f1),
            pct(row.items_f1),
            row.warnings,
        );
    }
}

/// 任意のシリアライズ可能な値を整形JSONでファイルに書き出す
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json)?;
    Ok(())
}

fn pct(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}
