use clap::{Parser, Subcommand};
use reunify_common::DEFAULT_PROMPT;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reunify")]
#[command(about = "子供の頃の写真と今の写真から「then and now」画像を生成", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 2枚の写真から画像を生成
    Generate {
        /// 子供の頃の写真
        #[arg(long, value_name = "PATH")]
        child: PathBuf,

        /// 最近の写真
        #[arg(long, value_name = "PATH")]
        adult: PathBuf,

        /// 生成内容の説明
        #[arg(short, long, default_value = DEFAULT_PROMPT)]
        prompt: String,

        /// 出力ファイル（デフォルト: ./reunify-<日時>.<拡張子>）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// モデルID（設定ファイルの値を上書き）
        #[arg(short, long)]
        model: Option<String>,

        /// タイムアウト秒数（0で無効）
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// 設定を表示/編集
    Config {
        /// APIキーを設定
        #[arg(long)]
        set_api_key: Option<String>,

        /// モデルIDを設定
        #[arg(long)]
        set_model: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_defaults() {
        let cli = Cli::parse_from(["reunify", "generate", "--child", "a.jpg", "--adult", "b.png"]);
        match cli.command {
            Commands::Generate { child, adult, prompt, output, model, timeout } => {
                assert_eq!(child, PathBuf::from("a.jpg"));
                assert_eq!(adult, PathBuf::from("b.png"));
                assert_eq!(prompt, DEFAULT_PROMPT);
                assert!(output.is_none());
                assert!(model.is_none());
                assert!(timeout.is_none());
            }
            _ => panic!("generate expected"),
        }
        assert!(!cli.verbose);
    }

    #[test]
    fn test_generate_requires_both_photos() {
        let result = Cli::try_parse_from(["reunify", "generate", "--child", "a.jpg"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_verbose() {
        let cli = Cli::parse_from(["reunify", "config", "--show", "-v"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Config { show: true, .. }));
    }
}
