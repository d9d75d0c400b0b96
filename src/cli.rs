use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mineral-catalog")]
#[command(about = "Utilidades para el catálogo de la colección de minerales", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 台帳Excelをカタログ JSON に変換
    Convert {
        /// 入力Excel（省略時は設定値）
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// 出力JSON（省略時は設定値）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 既存JSONのバックアップを作らない
        #[arg(long)]
        no_backup: bool,
    },

    /// アプリ用アイコン一式を生成
    Icons {
        /// 元画像（正方形推奨）
        #[arg(short, long, required = true)]
        source: PathBuf,

        /// 出力フォルダ（省略時は設定値）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// カタログの集計を表示
    Stats {
        /// カタログJSON（省略時は設定値）
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// 国別上位の件数
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// 画像フォルダを点検（表紙なし・未登録フォルダ）
    Check {
        /// カタログJSON（省略時は設定値）
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// 画像ルート（省略時は設定値）
        #[arg(long)]
        images: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// カタログJSONのパスを設定
        #[arg(long)]
        set_dataset: Option<PathBuf>,

        /// 台帳Excelのパスを設定
        #[arg(long)]
        set_workbook: Option<PathBuf>,

        /// 画像ルートを設定
        #[arg(long)]
        set_images: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
