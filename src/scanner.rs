//! 入力ファイルの走査と読み込み
//!
//! 評価コアはファイルシステムに依存しないため、JSONの読み込みと
//! 予測/正解ペアの探索はこの薄いアダプタ層が担う。

use crate::error::{DiaryEvalError, Result};
use crate::types::RawDocument;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 発見された予測/正解のファイルペア
#[derive(Debug, Clone)]
pub struct PairInfo {
    /// ペアの識別子（サフィックスを除いたファイル名）
    pub stem: String,
    pub predicted: PathBuf,
    pub ground_truth: PathBuf,
}

/// 抽出結果JSONを読み込む
pub fn load_document(path: &Path) -> Result<RawDocument> {
    if !path.exists() {
        return Err(DiaryEvalError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let document: RawDocument = serde_json::from_str(&content)?;
    Ok(document)
}

/// フォルダ直下から予測/正解ペアを探索する
///
/// `<stem><pred_suffix>` に対して `<stem><truth_suffix>` が存在するものを
/// ペアとして採用する。正解側が欠けた予測ファイルは無視する。
pub fn scan_pairs(folder: &Path, pred_suffix: &str, truth_suffix: &str) -> Result<Vec<PairInfo>> {
    if !folder.exists() {
        return Err(DiaryEvalError::FolderNotFound(folder.display().to_string()));
    }

    let mut pairs = Vec::new();

    for entry in WalkDir::new(folder)
        .max_depth(1) // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => continue,
        };

        if let Some(stem) = file_name.strip_suffix(pred_suffix) {
            let truth_path = folder.join(format!("{}{}", stem, truth_suffix));
            if truth_path.exists() {
                pairs.push(PairInfo {
                    stem: stem.to_string(),
                    predicted: path.to_path_buf(),
                    ground_truth: truth_path,
                });
            }
        }
    }

    // 識別子でソート
    pairs.sort_by(|a, b| a.stem.cmp(&b.stem));

    Ok(pairs)
}
