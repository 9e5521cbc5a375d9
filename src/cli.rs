use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "maize-dashboard")]
#[command(about = "水耕栽培トウモロコシ農場ダッシュボード", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ダッシュボードサーバーを起動
    Serve {
        /// 待ち受けアドレス（省略時は設定値）
        #[arg(long)]
        bind: Option<String>,

        /// ポート番号（省略時は設定値）
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// 葉の画像を1枚判定してJSONを出力
    Classify {
        /// 画像ファイルのパス
        #[arg(required = true)]
        image: PathBuf,
    },

    /// チャット応答を表示
    Ask {
        /// 質問文
        #[arg(required = true)]
        message: String,
    },

    /// 設定を表示/編集
    Config {
        /// 画像認識APIのエンドポイントを設定
        #[arg(long)]
        set_endpoint: Option<String>,

        /// 画像認識APIのキーを設定
        #[arg(long)]
        set_key: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
