//! プロンプト定義
//!
//! CLIとWeb(WASM)で共有される既定プロンプト

/// プロンプト欄の初期値
pub const DEFAULT_PROMPT: &str = "Create a nostalgic, artistic photo that merges the person from the first image (child) with the person from the second image (adult), showing a beautiful 'then and now' effect. The style should be slightly faded and dreamlike.";

/// 送信条件を満たさないときのメッセージ
pub const MISSING_INPUT_MESSAGE: &str = "Please upload both photos and provide a prompt.";

/// 結果欄のプレースホルダ
pub const RESULT_PLACEHOLDER: &str = "Your generated image will appear here.";
