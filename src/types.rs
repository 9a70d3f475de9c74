//! 日誌ドキュメントの型定義
//!
//! - RawDocument: 抽出パイプラインが出力するJSONをそのまま受けるワイヤ型
//! - DiaryDocument: 正規化・検証済みの不変モデル（以降のステージは読み取り専用）

use crate::error::{DiaryEvalError, Result};
use crate::normalizer::{self, MealAliasConfig, MealType};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// 抽出結果JSONのトップレベル
///
/// 評価で読むのは `entries` のみ。他のトップレベルフィールドは無視する。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDocument {
    #[serde(default)]
    pub source_pdf: Option<String>,
    pub entries: Option<Vec<RawEntry>>,
}

/// 1件の日誌エントリ（ワイヤ形式）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEntry {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub meal_type: Option<String>,
    #[serde(default)]
    pub items: Vec<RawItem>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// 1件の食品項目（ワイヤ形式）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawItem {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub quantity: Option<QuantityToken>,
    #[serde(default)]
    pub unit: Option<String>,
}

/// 数量トークン（文字列または数値）
///
/// 数値は `serde_json::Number` 経由で字句形式を保持する（`2` と `2.0` を
/// 区別したまま文字列比較する）。
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum QuantityToken {
    Text(String),
    Number(serde_json::Number),
}

impl QuantityToken {
    /// 比較用の正規化文字列（前後トリムのみ、数値変換はしない）
    pub fn as_normalized(&self) -> String {
        match self {
            QuantityToken::Text(s) => s.trim().to_string(),
            QuantityToken::Number(n) => n.to_string(),
        }
    }
}

/// ドキュメントの側（予測 / 正解）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentRole {
    Predicted,
    GroundTruth,
}

impl std::fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentRole::Predicted => write!(f, "予測"),
            DocumentRole::GroundTruth => write!(f, "正解"),
        }
    }
}

/// 取り込み時の警告（該当エントリの除外・時刻の切り捨て等）
#[derive(Debug, Clone, Serialize)]
pub struct EvalWarning {
    pub document: DocumentRole,
    pub entry_index: usize,
    pub message: String,
}

/// 検証・正規化済みの日誌ドキュメント
#[derive(Debug, Clone)]
pub struct DiaryDocument {
    /// 入力元の識別子（ファイル名など）
    pub source: String,
    pub entries: Vec<DiaryEntry>,
    /// 検証で除外されたエントリ数
    pub skipped: usize,
}

/// 検証・正規化済みの日誌エントリ
#[derive(Debug, Clone)]
pub struct DiaryEntry {
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub meal_type: MealType,
    pub items: Vec<FoodItem>,
    /// 自由記述。スコアリングには使わない
    pub notes: Option<String>,
}

/// 検証・正規化済みの食品項目
///
/// 照合キーは `name` のみ。`quantity`/`unit` は照合成立後に比較される
/// ペイロードであり、キーには含めない。
#[derive(Debug, Clone)]
pub struct FoodItem {
    /// 正規化済みの品名（非空）
    pub name: String,
    pub quantity: Option<String>,
    pub unit: Option<String>,
}

impl DiaryDocument {
    /// ワイヤ形式から検証・正規化済みドキュメントを構築する
    ///
    /// - `entries` 欠落は致命的（スキーマエラー）
    /// - 日付が不正なエントリは除外して警告を記録
    /// - 時刻が不正な場合はnullに落として警告を記録
    /// - 品名が正規化後に空になる項目は除外して警告を記録
    pub fn from_raw(
        raw: &RawDocument,
        role: DocumentRole,
        aliases: &MealAliasConfig,
    ) -> Result<(Self, Vec<EvalWarning>)> {
        let raw_entries = raw.entries.as_ref().ok_or_else(|| DiaryEvalError::Schema {
            document: role.to_string(),
            message: "`entries` 配列がありません".to_string(),
        })?;

        let mut entries = Vec::with_capacity(raw_entries.len());
        let mut warnings = Vec::new();
        let mut skipped = 0usize;

        for (index, raw_entry) in raw_entries.iter().enumerate() {
            let date_str = raw_entry.date.as_deref().unwrap_or("");
            let date = match normalizer::normalize_date(date_str) {
                Some(date) => date,
                None => {
                    skipped += 1;
                    warnings.push(EvalWarning {
                        document: role,
                        entry_index: index,
                        message: format!("日付が不正なため除外: {:?}", date_str),
                    });
                    continue;
                }
            };

            let time = match raw_entry.time.as_deref() {
                None => None,
                Some(raw_time) => match normalizer::normalize_time(raw_time) {
                    Some(time) => Some(time),
                    None => {
                        warnings.push(EvalWarning {
                            document: role,
                            entry_index: index,
                            message: format!("時刻を解釈できないためnull扱い: {:?}", raw_time),
                        });
                        None
                    }
                },
            };

            let meal_type = aliases.normalize(raw_entry.meal_type.as_deref().unwrap_or(""));

            let mut items = Vec::with_capacity(raw_entry.items.len());
            for raw_item in &raw_entry.items {
                let name = normalizer::normalize_name(raw_item.name.as_deref().unwrap_or(""));
                if name.is_empty() {
                    warnings.push(EvalWarning {
                        document: role,
                        entry_index: index,
                        message: "品名が空の項目を除外".to_string(),
                    });
                    continue;
                }
                items.push(FoodItem {
                    name,
                    quantity: raw_item.quantity.as_ref().map(|q| q.as_normalized()),
                    unit: raw_item
                        .unit
                        .as_deref()
                        .map(normalizer::normalize_name)
                        .filter(|u| !u.is_empty()),
                });
            }

            entries.push(DiaryEntry {
                date,
                time,
                meal_type,
                items,
                notes: raw_entry.notes.clone(),
            });
        }

        let document = DiaryDocument {
            source: raw.source_pdf.clone().unwrap_or_default(),
            entries,
            skipped,
        };
        Ok((document, warnings))
    }
}
