//! エントリ照合モジュール
//!
//! 予測側と正解側の日誌エントリを `(日付, 食事区分)` の複合キーで対応付ける。
//!
//! ## 照合ポリシー
//! 1. 両側のエントリをキーでバケツ分けする
//! 2. 同一キー内では文書順で i 番目同士を対にする（`min(予測数, 正解数)` まで）
//! 3. あふれた側は未対応として記録する
//!
//! キー衝突時に大域最適の割り当ては探索しない。決定性と再現性を優先する。

pub mod items;

pub use items::{match_items, ItemMatchResult, MatchedItemPair};

use crate::normalizer::MealType;
use crate::types::DiaryEntry;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// エントリの照合キー
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryKey {
    pub date: NaiveDate,
    pub meal_type: MealType,
}

impl EntryKey {
    pub fn of(entry: &DiaryEntry) -> Self {
        Self {
            date: entry.date,
            meal_type: entry.meal_type,
        }
    }
}

impl std::fmt::Display for EntryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.date.format("%Y-%m-%d"), self.meal_type)
    }
}

/// エントリ照合の結果（生成後は変更しない）
#[derive(Debug, Clone, Default)]
pub struct MatchResult {
    /// (予測側インデックス, 正解側インデックス) の対応ペア
    pub pairs: Vec<(usize, usize)>,
    /// 対応が付かなかった予測側エントリのキー（ソート済み）
    pub unmatched_predicted: Vec<EntryKey>,
    /// 対応が付かなかった正解側エントリのキー（ソート済み）
    pub unmatched_ground_truth: Vec<EntryKey>,
}

/// 予測側と正解側のエントリを照合する
pub fn match_entries(predicted: &[DiaryEntry], ground_truth: &[DiaryEntry]) -> MatchResult {
    // BTreeMapでキー順に処理する（診断リストがソート済みになる）
    let mut buckets: BTreeMap<EntryKey, (Vec<usize>, Vec<usize>)> = BTreeMap::new();

    for (index, entry) in predicted.iter().enumerate() {
        buckets.entry(EntryKey::of(entry)).or_default().0.push(index);
    }
    for (index, entry) in ground_truth.iter().enumerate() {
        buckets.entry(EntryKey::of(entry)).or_default().1.push(index);
    }

    let mut result = MatchResult::default();

    for (key, (pred_indices, gt_indices)) in &buckets {
        let paired = pred_indices.len().min(gt_indices.len());

        for i in 0..paired {
            result.pairs.push((pred_indices[i], gt_indices[i]));
        }
        for _ in &pred_indices[paired..] {
            result.unmatched_predicted.push(*key);
        }
        for _ in &gt_indices[paired..] {
            result.unmatched_ground_truth.push(*key);
        }
    }

    result
}
