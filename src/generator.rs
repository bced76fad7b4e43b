//! Gemini API連携（reqwest）
//!
//! リクエスト組み立てとレスポンス解析は reunify_common::gemini を使う。
//! 1回だけ送信し、リトライもキャッシュもしない。

use crate::config::Config;
use crate::error::{ReunifyError, Result};
use reunify_common::{
    build_generation_request, endpoint_url, extract_error_message, parse_generation_response,
    EncodedImage, ImageGenerator, API_KEY_HEADER,
};
use std::time::Duration;

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
    timeout: Option<Duration>,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: &str,
        model: &str,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        // ローカルのエンドポイントはプロキシを通さない
        if is_loopback(base_url) {
            builder = builder.no_proxy();
        }

        Ok(Self {
            http: builder.build()?,
            api_key: api_key.into(),
            endpoint: endpoint_url(base_url, model),
            timeout,
        })
    }

    /// 設定ファイル + コマンドライン指定から作成
    pub fn from_config(
        config: &Config,
        model: Option<&str>,
        timeout_seconds: Option<u64>,
    ) -> Result<Self> {
        let timeout = match timeout_seconds {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => config.timeout(),
        };
        Self::new(
            config.get_api_key()?,
            &config.api_base_url,
            model.unwrap_or(&config.model),
            timeout,
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 画像を生成してData URLを返す
    pub async fn generate_image(
        &self,
        child: &EncodedImage,
        adult: &EncodedImage,
        prompt: &str,
    ) -> Result<String> {
        let request = build_generation_request(child, adult, prompt);
        log::debug!("POST {}", self.endpoint);

        let response = self
            .http
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.describe_send_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ReunifyError::ApiParse(e.to_string()))?;
        log::debug!("response {} ({} bytes)", status, body.len());

        if !status.is_success() {
            let message = extract_error_message(&body)
                .unwrap_or_else(|| format!("API error: {}", status));
            return Err(ReunifyError::ApiCall(message));
        }

        Ok(parse_generation_response(&body)?)
    }

    fn describe_send_error(&self, e: reqwest::Error) -> ReunifyError {
        match self.timeout {
            Some(timeout) if e.is_timeout() => ReunifyError::ApiCall(format!(
                "Request timed out after {}s",
                timeout.as_secs()
            )),
            _ => ReunifyError::ApiCall(format!("Request failed: {}", e)),
        }
    }
}

fn is_loopback(base_url: &str) -> bool {
    let rest = base_url
        .strip_prefix("http://")
        .or_else(|| base_url.strip_prefix("https://"))
        .unwrap_or(base_url);
    rest.starts_with("127.0.0.1") || rest.starts_with("localhost") || rest.starts_with("[::1]")
}

/// 画面に出す1行メッセージへ正規化
pub fn user_message(error: &ReunifyError) -> String {
    match error {
        ReunifyError::ApiCall(message) | ReunifyError::ApiParse(message) => message.clone(),
        other => other.to_string(),
    }
}

impl ImageGenerator for GeminiClient {
    async fn generate(
        &self,
        child: &EncodedImage,
        adult: &EncodedImage,
        prompt: &str,
    ) -> reunify_common::Result<String> {
        self.generate_image(child, adult, prompt)
            .await
            .map_err(|e| reunify_common::Error::Generation(user_message(&e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_from_config() {
        let config = Config {
            api_key: Some("key".into()),
            api_base_url: "http://127.0.0.1:9".into(),
            model: "m".into(),
            ..Default::default()
        };
        let client = GeminiClient::from_config(&config, Some("override"), None).unwrap();
        assert_eq!(
            client.endpoint(),
            "http://127.0.0.1:9/v1beta/models/override:generateContent"
        );
    }

    #[test]
    fn test_timeout_override() {
        let config = Config {
            api_key: Some("key".into()),
            ..Default::default()
        };
        let client = GeminiClient::from_config(&config, None, Some(0)).unwrap();
        assert!(client.timeout.is_none());

        let client = GeminiClient::from_config(&config, None, Some(5)).unwrap();
        assert_eq!(client.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_is_loopback() {
        assert!(is_loopback("http://127.0.0.1:8080"));
        assert!(is_loopback("http://localhost"));
        assert!(!is_loopback("https://generativelanguage.googleapis.com"));
    }

    #[test]
    fn test_user_message_is_unwrapped() {
        let err = ReunifyError::ApiCall("quota exceeded".into());
        assert_eq!(user_message(&err), "quota exceeded");

        let err = ReunifyError::Common(reunify_common::Error::Generation("No image in response".into()));
        assert_eq!(user_message(&err), "No image in response");
    }
}
