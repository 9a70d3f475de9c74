//! メトリクス集計モジュール
//!
//! 照合結果から最終レポートを組み立てる。定義は標準的な情報検索指標:
//!
//! - precision = 対応数 / (対応数 + 予測側未対応数)
//! - recall    = 対応数 / (対応数 + 正解側未対応数)
//! - f1        = 2PR / (P + R)
//!
//! 分母が0になるケースはすべて 0.0 とする（NaNや例外にしない）。
//! 空のドキュメントでも常に整形式で比較可能なレポートを返すため。

use crate::matcher::{ItemMatchResult, MatchResult};
use crate::types::DiaryDocument;
use serde::Serialize;

/// 評価レポート（本コアが外部に公開する唯一の成果物、生成後は変更しない）
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
    pub entries: EntryMetrics,
    pub fields: FieldAccuracy,
    pub items: ItemMetrics,
    pub diagnostics: Diagnostics,
}

/// エントリ単位の検索指標と生カウント
#[derive(Debug, Clone, Serialize)]
pub struct EntryMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub matched: usize,
    pub unmatched_predicted: usize,
    pub unmatched_ground_truth: usize,
}

/// 対応済みエントリペア上のフィールド一致率
///
/// 日付と食事区分は照合キーそのものなので、正規化に欠陥がない限り1.0になる。
/// 正規化のリグレッション検出用に残している。
#[derive(Debug, Clone, Serialize)]
pub struct FieldAccuracy {
    pub date_accuracy: f64,
    pub time_accuracy: f64,
    pub meal_type_accuracy: f64,
}

/// 項目単位の検索指標と生カウント
///
/// 全エントリペアの対応数・未対応数を合算してから比率を取る
/// （エントリごとの比率の平均にすると項目数の少ないエントリに偏るため）。
#[derive(Debug, Clone, Serialize)]
pub struct ItemMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub matched: usize,
    pub unmatched_predicted: usize,
    pub unmatched_ground_truth: usize,
    /// 品名が対応した項目ペアのうち数量が一致した割合
    pub quantity_accuracy_on_matched_names: f64,
    /// 品名が対応した項目ペアのうち単位が一致した割合
    pub unit_accuracy_on_matched_names: f64,
}

/// 診断情報: スコアを下げたキーの一覧（ソート済み）
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostics {
    /// 正解側にあって対応が付かなかったキー（取りこぼし）
    pub missing_entry_keys: Vec<String>,
    /// 予測側にあって対応が付かなかったキー（過剰検出）
    pub extra_entry_keys: Vec<String>,
}

/// 照合結果からレポートを集計する
///
/// `item_results[i]` は `matches.pairs[i]` のエントリペアに対応する。
/// 副作用なし・I/Oなし。
pub fn aggregate(
    predicted: &DiaryDocument,
    ground_truth: &DiaryDocument,
    matches: &MatchResult,
    item_results: &[ItemMatchResult],
) -> MetricsReport {
    let entry_matched = matches.pairs.len();
    let entry_extra = matches.unmatched_predicted.len();
    let entry_missing = matches.unmatched_ground_truth.len();

    let entry_precision = ratio(entry_matched, entry_matched + entry_extra);
    let entry_recall = ratio(entry_matched, entry_matched + entry_missing);

    // フィールド一致率（対応済みペアのみ）
    let mut date_equal = 0usize;
    let mut time_equal = 0usize;
    let mut meal_equal = 0usize;
    for &(pred_index, gt_index) in &matches.pairs {
        let pred = &predicted.entries[pred_index];
        let gt = &ground_truth.entries[gt_index];
        if pred.date == gt.date {
            date_equal += 1;
        }
        if pred.time == gt.time {
            time_equal += 1;
        }
        if pred.meal_type == gt.meal_type {
            meal_equal += 1;
        }
    }

    // 項目指標（全ペアの合算カウント）
    let mut item_matched = 0usize;
    let mut item_extra = 0usize;
    let mut item_missing = 0usize;
    let mut quantity_equal = 0usize;
    let mut unit_equal = 0usize;
    for item_result in item_results {
        item_matched += item_result.pairs.len();
        item_extra += item_result.unmatched_predicted.len();
        item_missing += item_result.unmatched_ground_truth.len();
        quantity_equal += item_result.pairs.iter().filter(|p| p.quantity_match).count();
        unit_equal += item_result.pairs.iter().filter(|p| p.unit_match).count();
    }

    let item_precision = ratio(item_matched, item_matched + item_extra);
    let item_recall = ratio(item_matched, item_matched + item_missing);

    MetricsReport {
        entries: EntryMetrics {
            precision: entry_precision,
            recall: entry_recall,
            f1: f1(entry_precision, entry_recall),
            matched: entry_matched,
            unmatched_predicted: entry_extra,
            unmatched_ground_truth: entry_missing,
        },
        fields: FieldAccuracy {
            date_accuracy: ratio(date_equal, entry_matched),
            time_accuracy: ratio(time_equal, entry_matched),
            meal_type_accuracy: ratio(meal_equal, entry_matched),
        },
        items: ItemMetrics {
            precision: item_precision,
            recall: item_recall,
            f1: f1(item_precision, item_recall),
            matched: item_matched,
            unmatched_predicted: item_extra,
            unmatched_ground_truth: item_missing,
            quantity_accuracy_on_matched_names: ratio(quantity_equal, item_matched),
            unit_accuracy_on_matched_names: ratio(unit_equal, item_matched),
        },
        diagnostics: Diagnostics {
            missing_entry_keys: matches
                .unmatched_ground_truth
                .iter()
                .map(|k| k.to_string())
                .collect(),
            extra_entry_keys: matches
                .unmatched_predicted
                .iter()
                .map(|k| k.to_string())
                .collect(),
        },
    }
}

/// ゼロ分母を0.0に畳む比率
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// 調和平均（P + R = 0 のとき0.0）
fn f1(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}
