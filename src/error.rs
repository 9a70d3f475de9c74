use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiaryEvalError {
    #[error("スキーマエラー ({document}): {message}")]
    Schema { document: String, message: String },

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("評価対象のファイルペアが見つかりません: {0}")]
    NoPairsFound(String),

    #[error("エイリアス定義が不正: {0}")]
    InvalidAlias(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DiaryEvalError>;
