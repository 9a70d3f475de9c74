use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "diary-eval")]
#[command(about = "食事日誌抽出結果の精度評価ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 予測JSONと正解JSONを比較して精度レポートを出力
    Evaluate {
        /// 予測（抽出結果）JSONファイル
        #[arg(required = true)]
        predicted: PathBuf,

        /// 正解（手動アノテーション）JSONファイル
        #[arg(required = true)]
        ground_truth: PathBuf,

        /// レポート出力先（省略時はコンソール表示のみ）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 食事区分の追加エイリアスファイル（JSON）
        #[arg(long)]
        alias: Option<PathBuf>,
    },

    /// フォルダ内の予測/正解ペアを一括評価
    Batch {
        /// 対象フォルダ
        #[arg(required = true)]
        folder: PathBuf,

        /// レポート出力先ディレクトリ（デフォルト: 対象フォルダ）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 予測ファイルのサフィックス
        #[arg(long, default_value = ".pred.json")]
        pred_suffix: String,

        /// 正解ファイルのサフィックス
        #[arg(long, default_value = ".truth.json")]
        truth_suffix: String,

        /// 食事区分の追加エイリアスファイル（JSON）
        #[arg(long)]
        alias: Option<PathBuf>,
    },

    /// 組み込みの食事区分エイリアステーブルを表示
    Aliases,
}
