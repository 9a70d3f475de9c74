//! 食事区分（MealType）の正規化
//!
//! 抽出結果の食事区分は言語・表記が揺れるため、閉じた5値の列挙に写像する。
//! 未知の表記はエラーにせず `Other` に落とす（全域関数）。

use super::normalize_name;
use crate::error::{DiaryEvalError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 食事区分（閉じた列挙）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Other,
}

impl std::fmt::Display for MealType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MealType::Breakfast => write!(f, "breakfast"),
            MealType::Lunch => write!(f, "lunch"),
            MealType::Dinner => write!(f, "dinner"),
            MealType::Snack => write!(f, "snack"),
            MealType::Other => write!(f, "other"),
        }
    }
}

/// 食事区分エイリアス定義
///
/// 組み込みテーブルに加えてJSONファイルから追加定義を読み込める。
/// 後からマージした定義が優先される。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MealAliasConfig {
    /// 表記 → 食事区分のエイリアス
    #[serde(default)]
    pub meal_type: HashMap<String, MealType>,
}

impl MealAliasConfig {
    /// 組み込みエイリアステーブル
    pub fn builtin() -> Self {
        let mut config = Self::default();

        // 英語（直接表記）
        config.insert("breakfast", MealType::Breakfast);
        config.insert("lunch", MealType::Lunch);
        config.insert("dinner", MealType::Dinner);
        config.insert("snack", MealType::Snack);
        config.insert("other", MealType::Other);

        // 英語（言い換え）
        config.insert("morning meal", MealType::Breakfast);
        config.insert("noon meal", MealType::Lunch);
        config.insert("midday meal", MealType::Lunch);
        config.insert("evening meal", MealType::Dinner);
        config.insert("supper", MealType::Dinner);
        config.insert("extra meal", MealType::Snack);

        // 日本語
        config.insert("朝食", MealType::Breakfast);
        config.insert("朝ごはん", MealType::Breakfast);
        config.insert("朝御飯", MealType::Breakfast);
        config.insert("昼食", MealType::Lunch);
        config.insert("昼ごはん", MealType::Lunch);
        config.insert("昼御飯", MealType::Lunch);
        config.insert("夕食", MealType::Dinner);
        config.insert("夕飯", MealType::Dinner);
        config.insert("晩ごはん", MealType::Dinner);
        config.insert("晩御飯", MealType::Dinner);
        config.insert("間食", MealType::Snack);
        config.insert("おやつ", MealType::Snack);
        config.insert("夜食", MealType::Snack);

        // 中国語
        config.insert("早餐", MealType::Breakfast);
        config.insert("早饭", MealType::Breakfast);
        config.insert("午餐", MealType::Lunch);
        config.insert("午饭", MealType::Lunch);
        config.insert("中餐", MealType::Lunch);
        config.insert("晚餐", MealType::Dinner);
        config.insert("晚饭", MealType::Dinner);
        config.insert("加餐", MealType::Snack);
        config.insert("零食", MealType::Snack);
        config.insert("点心", MealType::Snack);

        config
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Err(DiaryEvalError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// JSON文字列から読み込み
    ///
    /// キーは正規化形式で保持する（マージを経由しない参照でも同じ挙動にする）
    pub fn from_json(json: &str) -> Result<Self> {
        let parsed: Self = serde_json::from_str(json)
            .map_err(|e| DiaryEvalError::InvalidAlias(e.to_string()))?;
        let mut config = Self::default();
        for (raw, meal) in &parsed.meal_type {
            config.meal_type.insert(normalize_name(raw), *meal);
        }
        Ok(config)
    }

    /// 定義をマージ（後から追加した定義が優先）
    pub fn merge(&mut self, other: &MealAliasConfig) {
        for (raw, meal) in &other.meal_type {
            self.meal_type.insert(normalize_name(raw), *meal);
        }
    }

    /// 表記を食事区分に写像する（未知の表記は `Other`）
    pub fn normalize(&self, raw: &str) -> MealType {
        self.meal_type
            .get(normalize_name(raw).as_str())
            .copied()
            .unwrap_or(MealType::Other)
    }

    fn insert(&mut self, raw: &str, meal: MealType) {
        self.meal_type.insert(raw.to_string(), meal);
    }
}

/// 組み込みテーブルで食事区分を正規化する
pub fn normalize_meal_type(raw: &str) -> MealType {
    lazy_static::lazy_static! {
        static ref BUILTIN: MealAliasConfig = MealAliasConfig::builtin();
    }
    BUILTIN.normalize(raw)
}
