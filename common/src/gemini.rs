//! Gemini 画像生成APIのワイヤ形式（CLI/WASM共通）
//!
//! - build_generation_request: 画像2枚 + プロンプトからリクエストを組み立てる
//! - parse_generation_response / extract_generated_image: レスポンスから画像のData URLを取り出す
//!
//! HTTP送信そのものは各フロントエンド側（reqwest / web-sys fetch）で行う。

use serde::{Deserialize, Serialize};

use crate::encoder::to_data_url;
use crate::error::{Error, Result};
use crate::types::EncodedImage;

pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image-preview";
/// APIキーを載せるヘッダ名
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// generateContent エンドポイントURL
pub fn endpoint_url(base_url: &str, model: &str) -> String {
    format!(
        "{}/v1beta/models/{}:generateContent",
        base_url.trim_end_matches('/'),
        model
    )
}

/// Gemini APIリクエスト
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

/// テキスト / インライン画像のどちらか
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_modalities: Vec<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            response_modalities: vec!["IMAGE".to_string(), "TEXT".to_string()],
        }
    }
}

/// Gemini APIレスポンス
///
/// 失敗時は `error` だけが入ってくる。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateContentResponse {
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
    pub error: Option<ApiError>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Candidate {
    pub content: Option<ResponseContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResponseContent {
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ResponsePart {
    pub text: Option<String>,
    #[serde(rename = "inlineData", alias = "inline_data")]
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

/// `{"error": {"code": 429, "message": "...", "status": "..."}}`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ApiError {
    pub code: Option<u16>,
    pub message: String,
    pub status: Option<String>,
}

impl ApiError {
    fn describe(&self) -> String {
        if !self.message.is_empty() {
            return self.message.clone();
        }
        match (&self.status, self.code) {
            (Some(status), _) => status.clone(),
            (None, Some(code)) => format!("API error: {}", code),
            (None, None) => "API error".to_string(),
        }
    }
}

impl From<&EncodedImage> for Part {
    fn from(image: &EncodedImage) -> Self {
        Part::InlineData {
            inline_data: InlineData {
                mime_type: image.mime_type.clone(),
                data: image.base64_data.clone(),
            },
        }
    }
}

/// 画像生成リクエストを組み立てる
///
/// パーツの順序: 子供の頃の写真 → 最近の写真 → プロンプト。
/// プロンプト中の "first image" / "second image" はこの順序に対応する。
pub fn build_generation_request(
    child: &EncodedImage,
    adult: &EncodedImage,
    prompt: &str,
) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            parts: vec![
                Part::from(child),
                Part::from(adult),
                Part::Text {
                    text: prompt.to_string(),
                },
            ],
        }],
        generation_config: GenerationConfig::default(),
    }
}

/// レスポンス本文（JSON文字列）から生成画像のData URLを取り出す
pub fn parse_generation_response(body: &str) -> Result<String> {
    let response: GenerateContentResponse = serde_json::from_str(body)
        .map_err(|e| Error::Generation(format!("Failed to parse response: {}", e)))?;
    extract_generated_image(&response)
}

/// 最初に見つかった画像パーツをData URLにして返す
///
/// 画像が無い場合、モデルが返したテキストがあればメッセージに含める。
pub fn extract_generated_image(response: &GenerateContentResponse) -> Result<String> {
    if let Some(error) = &response.error {
        return Err(Error::Generation(error.describe()));
    }

    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_deref())
    {
        return Err(Error::Generation(format!("Request blocked: {}", reason)));
    }

    let parts = response
        .candidates
        .iter()
        .filter_map(|c| c.content.as_ref())
        .flat_map(|c| c.parts.iter());

    let mut texts = Vec::new();
    for part in parts {
        if let Some(inline) = &part.inline_data {
            if !inline.data.is_empty() {
                return Ok(to_data_url(&inline.mime_type, &inline.data));
            }
        }
        if let Some(text) = part.text.as_deref().map(str::trim) {
            if !text.is_empty() {
                texts.push(text);
            }
        }
    }

    if !texts.is_empty() {
        return Err(Error::Generation(format!(
            "No image in response: {}",
            texts.join(" ")
        )));
    }

    let finish_reason = response
        .candidates
        .iter()
        .find_map(|c| c.finish_reason.as_deref());
    match finish_reason {
        Some(reason) if reason != "STOP" => Err(Error::Generation(format!(
            "No image in response (finish reason: {})",
            reason
        ))),
        _ => Err(Error::Generation("No image in response".to_string())),
    }
}

/// エラーレスポンス本文からメッセージを取り出す（HTTPエラー時用）
///
/// 本文がGemini形式でなければ None。
pub fn extract_error_message(body: &str) -> Option<String> {
    let response: GenerateContentResponse = serde_json::from_str(body).ok()?;
    response.error.map(|e| e.describe())
}
