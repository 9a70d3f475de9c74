//! 評価パイプライン
//!
//! パース済みの2ドキュメント（予測・正解）から評価レポートを計算する純粋関数。
//! ファイルI/OやCLIはここに持ち込まない（呼び出し側の薄いアダプタが担う）。
//!
//! 処理は一方向: 正規化 → エントリ照合 → 項目照合 → 集計。
//! 各ステージは不変の入力を消費して新しい不変の結果を返す。

use crate::matcher;
use crate::metrics::{self, MetricsReport};
use crate::normalizer::MealAliasConfig;
use crate::types::{DiaryDocument, DocumentRole, EvalWarning, RawDocument};
use crate::error::Result;
use serde::Serialize;

/// 1ドキュメント側の取り込みサマリ
#[derive(Debug, Clone, Serialize)]
pub struct SideSummary {
    /// 入力元の識別子（抽出JSONの `source_pdf` など）
    pub source: String,
    /// 検証を通過したエントリ数
    pub entries: usize,
    /// 検証で除外されたエントリ数
    pub skipped: usize,
}

/// 評価結果（レポート + 取り込み時の警告）
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub predicted: SideSummary,
    pub ground_truth: SideSummary,
    pub metrics: MetricsReport,
    pub warnings: Vec<EvalWarning>,
}

/// 組み込みエイリアステーブルで評価する
pub fn evaluate(predicted: &RawDocument, ground_truth: &RawDocument) -> Result<Evaluation> {
    evaluate_with_aliases(predicted, ground_truth, &MealAliasConfig::builtin())
}

/// エイリアステーブルを指定して評価する
pub fn evaluate_with_aliases(
    predicted: &RawDocument,
    ground_truth: &RawDocument,
    aliases: &MealAliasConfig,
) -> Result<Evaluation> {
    let (pred_doc, mut warnings) =
        DiaryDocument::from_raw(predicted, DocumentRole::Predicted, aliases)?;
    let (gt_doc, gt_warnings) =
        DiaryDocument::from_raw(ground_truth, DocumentRole::GroundTruth, aliases)?;
    warnings.extend(gt_warnings);

    let matches = matcher::match_entries(&pred_doc.entries, &gt_doc.entries);

    let item_results: Vec<_> = matches
        .pairs
        .iter()
        .map(|&(pred_index, gt_index)| {
            matcher::match_items(
                &pred_doc.entries[pred_index].items,
                &gt_doc.entries[gt_index].items,
            )
        })
        .collect();

    let metrics = metrics::aggregate(&pred_doc, &gt_doc, &matches, &item_results);

    Ok(Evaluation {
        predicted: summarize(&pred_doc),
        ground_truth: summarize(&gt_doc),
        metrics,
        warnings,
    })
}

fn summarize(document: &DiaryDocument) -> SideSummary {
    SideSummary {
        source: document.source.clone(),
        entries: document.entries.len(),
        skipped: document.skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiaryEvalError;

    fn raw(json: &str) -> RawDocument {
        serde_json::from_str(json).expect("デシリアライズ失敗")
    }

    #[test]
    fn test_evaluate_reflexive() {
        let doc = raw(
            r#"{
                "entries": [
                    {
                        "date": "2024-07-25",
                        "time": "08:00",
                        "meal_type": "breakfast",
                        "items": [
                            { "name": "oatmeal", "quantity": "1", "unit": "bowl" },
                            { "name": "banana", "quantity": "1", "unit": "pc" }
                        ]
                    },
                    {
                        "date": "2024-07-25",
                        "meal_type": "lunch",
                        "items": [ { "name": "rice", "quantity": "1", "unit": "cup" } ]
                    }
                ]
            }"#,
        );

        let evaluation = evaluate(&doc, &doc).unwrap();
        let m = &evaluation.metrics;

        assert_eq!(m.entries.precision, 1.0);
        assert_eq!(m.entries.recall, 1.0);
        assert_eq!(m.entries.f1, 1.0);
        assert_eq!(m.items.precision, 1.0);
        assert_eq!(m.items.recall, 1.0);
        assert_eq!(m.items.f1, 1.0);
        assert_eq!(m.fields.date_accuracy, 1.0);
        assert_eq!(m.fields.time_accuracy, 1.0);
        assert_eq!(m.fields.meal_type_accuracy, 1.0);
        assert!(evaluation.warnings.is_empty());
    }

    #[test]
    fn test_evaluate_empty_prediction_floor() {
        let predicted = raw(r#"{ "entries": [] }"#);
        let ground_truth = raw(
            r#"{
                "entries": [
                    { "date": "2024-07-25", "meal_type": "breakfast", "items": [] },
                    { "date": "2024-07-26", "meal_type": "dinner", "items": [] }
                ]
            }"#,
        );

        let evaluation = evaluate(&predicted, &ground_truth).unwrap();
        let m = &evaluation.metrics;

        assert_eq!(m.entries.precision, 0.0);
        assert_eq!(m.entries.recall, 0.0);
        assert_eq!(m.entries.f1, 0.0);
        assert_eq!(
            m.diagnostics.missing_entry_keys,
            vec!["2024-07-25/breakfast", "2024-07-26/dinner"]
        );
    }

    #[test]
    fn test_evaluate_missing_entries_key_fatal() {
        let predicted = raw(r#"{ "source_pdf": "x.pdf" }"#);
        let ground_truth = raw(r#"{ "entries": [] }"#);

        let result = evaluate(&predicted, &ground_truth);
        match result {
            Err(DiaryEvalError::Schema { document, .. }) => {
                assert_eq!(document, "予測");
            }
            other => panic!("スキーマエラーになるはず: {:?}", other),
        }
    }

    #[test]
    fn test_evaluate_scenario_partial_items() {
        // 正解: oatmeal + banana、予測: oatmealのみ
        let predicted = raw(
            r#"{
                "entries": [
                    {
                        "date": "2024-07-25",
                        "meal_type": "breakfast",
                        "items": [ { "name": "oatmeal", "quantity": "1", "unit": "bowl" } ]
                    }
                ]
            }"#,
        );
        let ground_truth = raw(
            r#"{
                "entries": [
                    {
                        "date": "2024-07-25",
                        "meal_type": "breakfast",
                        "items": [
                            { "name": "oatmeal", "quantity": "1", "unit": "bowl" },
                            { "name": "banana", "quantity": "1", "unit": "pc" }
                        ]
                    }
                ]
            }"#,
        );

        let evaluation = evaluate(&predicted, &ground_truth).unwrap();
        let m = &evaluation.metrics;

        assert_eq!(m.entries.precision, 1.0);
        assert_eq!(m.entries.recall, 1.0);
        assert_eq!(m.entries.f1, 1.0);
        assert_eq!(m.items.precision, 1.0);
        assert_eq!(m.items.recall, 0.5);
        assert!((m.items.f1 - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(m.items.quantity_accuracy_on_matched_names, 1.0);
        assert_eq!(m.items.unit_accuracy_on_matched_names, 1.0);
    }

    #[test]
    fn test_evaluate_meal_type_alias_matches_english_literal() {
        // 予測側が日本語表記でも正規化後に英語表記の正解と対応する
        let predicted = raw(
            r#"{
                "entries": [
                    { "date": "2024-07-25", "meal_type": "朝食", "items": [] }
                ]
            }"#,
        );
        let ground_truth = raw(
            r#"{
                "entries": [
                    { "date": "2024-07-25", "meal_type": "breakfast", "items": [] }
                ]
            }"#,
        );

        let evaluation = evaluate(&predicted, &ground_truth).unwrap();
        assert_eq!(evaluation.metrics.entries.f1, 1.0);
        assert_eq!(evaluation.metrics.fields.meal_type_accuracy, 1.0);
    }

    #[test]
    fn test_evaluate_bad_date_excluded_rest_proceeds() {
        let predicted = raw(
            r#"{
                "entries": [
                    { "date": "bad-date", "meal_type": "breakfast", "items": [] },
                    { "date": "2024-07-25", "meal_type": "lunch", "items": [] }
                ]
            }"#,
        );
        let ground_truth = raw(
            r#"{
                "entries": [
                    { "date": "2024-07-25", "meal_type": "lunch", "items": [] }
                ]
            }"#,
        );

        let evaluation = evaluate(&predicted, &ground_truth).unwrap();

        assert_eq!(evaluation.predicted.entries, 1);
        assert_eq!(evaluation.predicted.skipped, 1);
        assert_eq!(evaluation.warnings.len(), 1);
        assert_eq!(evaluation.metrics.entries.f1, 1.0);
    }

    #[test]
    fn test_evaluate_order_invariance() {
        let forward = raw(
            r#"{
                "entries": [
                    { "date": "2024-07-25", "meal_type": "breakfast",
                      "items": [ { "name": "a" }, { "name": "b" } ] },
                    { "date": "2024-07-26", "meal_type": "lunch",
                      "items": [ { "name": "c" } ] }
                ]
            }"#,
        );
        let reversed = raw(
            r#"{
                "entries": [
                    { "date": "2024-07-26", "meal_type": "lunch",
                      "items": [ { "name": "c" } ] },
                    { "date": "2024-07-25", "meal_type": "breakfast",
                      "items": [ { "name": "b" }, { "name": "a" } ] }
                ]
            }"#,
        );
        let ground_truth = raw(
            r#"{
                "entries": [
                    { "date": "2024-07-25", "meal_type": "breakfast",
                      "items": [ { "name": "a" } ] },
                    { "date": "2024-07-26", "meal_type": "lunch",
                      "items": [ { "name": "c" }, { "name": "d" } ] }
                ]
            }"#,
        );

        let m1 = evaluate(&forward, &ground_truth).unwrap().metrics;
        let m2 = evaluate(&reversed, &ground_truth).unwrap().metrics;

        assert_eq!(m1.entries.f1, m2.entries.f1);
        assert_eq!(m1.items.precision, m2.items.precision);
        assert_eq!(m1.items.recall, m2.items.recall);
        assert_eq!(m1.diagnostics.missing_entry_keys, m2.diagnostics.missing_entry_keys);
    }
}
