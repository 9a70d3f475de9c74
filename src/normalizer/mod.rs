//! 正規化モジュール
//!
//! 比較前に生のフィールド値を決定的に正準化する。
//!
//! - 食事区分: 多言語エイリアスを閉じた列挙へ写像
//! - 日付: 厳密な `YYYY-MM-DD` のみ受理
//! - 時刻: `HH:MM`（24時間制）のみ受理、それ以外はnull扱い
//! - 品名: 小文字化・前後トリム・連続空白の圧縮のみ（曖昧マッチはしない）

pub mod meal_type;

pub use meal_type::{normalize_meal_type, MealAliasConfig, MealType};

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;

/// 品名を正規化する
///
/// 小文字化・前後の空白除去・内部の連続空白を単一スペースに圧縮する。
/// 語幹処理や複数形の吸収は行わない。大小・空白以外が異なる品名は別物。
pub fn normalize_name(raw: &str) -> String {
    lazy_static::lazy_static! {
        static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
    }
    WHITESPACE_RE
        .replace_all(raw.trim(), " ")
        .to_lowercase()
}

/// 日付を正規化する
///
/// ゼロ埋めされた `YYYY-MM-DD` のみ受理し、暦として妥当か検証する。
/// 不正な日付は `None`（呼び出し側が該当エントリを除外して警告を記録する）。
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    lazy_static::lazy_static! {
        // chronoの%mは1桁も受理するため、形式は正規表現で先に縛る
        static ref DATE_RE: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    }
    let trimmed = raw.trim();
    if !DATE_RE.is_match(trimmed) {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

/// 時刻を正規化する
///
/// `HH:MM`（24時間制）のみ受理。それ以外は `None` に落とす。
/// 時刻は任意フィールドのため、不正値で評価全体を止めることはない。
pub fn normalize_time(raw: &str) -> Option<NaiveTime> {
    lazy_static::lazy_static! {
        static ref TIME_RE: Regex = Regex::new(r"^\d{2}:\d{2}$").unwrap();
    }
    let trimmed = raw.trim();
    if !TIME_RE.is_match(trimmed) {
        return None;
    }
    NaiveTime::parse_from_str(trimmed, "%H:%M").ok()
}
