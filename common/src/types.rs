//! フォームの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - EncodedImage: アップロード画像（Base64 + MIME + プレビューURL）
//! - ImageRole: 画像スロットの役割（子供の頃 / 現在）
//! - FormState: 送信前のフォーム全体

use serde::{Deserialize, Serialize};

/// Base64化済みの画像
///
/// 一度作ったら変更しない。別ファイルを選んだら丸ごと差し替える。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodedImage {
    /// ヘッダなしのBase64データ
    pub base64_data: String,
    pub mime_type: String,
    /// `data:<mime>;base64,<data>` 形式（プレビュー表示用）
    pub preview_url: String,
}

/// 画像スロットの役割
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageRole {
    /// 子供の頃の写真
    Child,
    /// 最近の写真
    Adult,
}

impl ImageRole {
    pub const ALL: [ImageRole; 2] = [ImageRole::Child, ImageRole::Adult];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageRole::Child => "child",
            ImageRole::Adult => "adult",
        }
    }

    /// 画面表示用ラベル
    pub fn label(&self) -> &'static str {
        match self {
            ImageRole::Child => "1. Childhood Photo",
            ImageRole::Adult => "2. Recent Photo",
        }
    }
}

impl std::fmt::Display for ImageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// フォームの状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub child_image: Option<EncodedImage>,
    pub adult_image: Option<EncodedImage>,
    pub prompt_text: String,
}

impl FormState {
    pub fn image(&self, role: ImageRole) -> Option<&EncodedImage> {
        match role {
            ImageRole::Child => self.child_image.as_ref(),
            ImageRole::Adult => self.adult_image.as_ref(),
        }
    }

    pub fn set_image(&mut self, role: ImageRole, image: Option<EncodedImage>) {
        match role {
            ImageRole::Child => self.child_image = image,
            ImageRole::Adult => self.adult_image = image,
        }
    }

    /// 送信条件: 画像2枚 + 空でないプロンプト
    pub fn is_complete(&self) -> bool {
        self.child_image.is_some()
            && self.adult_image.is_some()
            && !self.prompt_text.trim().is_empty()
    }
}
