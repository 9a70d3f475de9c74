//! 食品項目の照合
//!
//! 対応済みエントリペアの内部で、品名（正規化済み）をキーに項目を対応付ける。
//! 同名の重複はエントリ照合と同じ規則（文書順で `min` 件まで対にする）で扱う。

use crate::types::FoodItem;
use std::collections::BTreeMap;

/// 対応が付いた項目ペア
///
/// `quantity_match` / `unit_match` は照合成立後の付帯情報であり、
/// 品名の照合自体には影響しない。
#[derive(Debug, Clone)]
pub struct MatchedItemPair {
    pub name: String,
    pub quantity_match: bool,
    pub unit_match: bool,
}

/// 1エントリペア内の項目照合結果（生成後は変更しない）
#[derive(Debug, Clone, Default)]
pub struct ItemMatchResult {
    pub pairs: Vec<MatchedItemPair>,
    /// 対応が付かなかった予測側の品名
    pub unmatched_predicted: Vec<String>,
    /// 対応が付かなかった正解側の品名
    pub unmatched_ground_truth: Vec<String>,
}

/// 予測側と正解側の項目を照合する
pub fn match_items(pred_items: &[FoodItem], gt_items: &[FoodItem]) -> ItemMatchResult {
    let mut buckets: BTreeMap<&str, (Vec<usize>, Vec<usize>)> = BTreeMap::new();

    for (index, item) in pred_items.iter().enumerate() {
        buckets.entry(item.name.as_str()).or_default().0.push(index);
    }
    for (index, item) in gt_items.iter().enumerate() {
        buckets.entry(item.name.as_str()).or_default().1.push(index);
    }

    let mut result = ItemMatchResult::default();

    for (name, (pred_indices, gt_indices)) in &buckets {
        let paired = pred_indices.len().min(gt_indices.len());

        for i in 0..paired {
            let pred = &pred_items[pred_indices[i]];
            let gt = &gt_items[gt_indices[i]];
            result.pairs.push(MatchedItemPair {
                name: name.to_string(),
                // トリム済み文字列の完全一致（数値としての同値は見ない）
                quantity_match: pred.quantity == gt.quantity,
                unit_match: pred.unit == gt.unit,
            });
        }
        for _ in &pred_indices[paired..] {
            result.unmatched_predicted.push(name.to_string());
        }
        for _ in &gt_indices[paired..] {
            result.unmatched_ground_truth.push(name.to_string());
        }
    }

    result
}
