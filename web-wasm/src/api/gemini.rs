//! Gemini API連携（fetch）
//!
//! リクエスト組み立てとレスポンス解析は reunify_common::gemini を使う。
//! タイムアウトもキャンセルもしない。

use reunify_common::{
    build_generation_request, endpoint_url, extract_error_message, parse_generation_response,
    EncodedImage, API_KEY_HEADER, DEFAULT_IMAGE_MODEL, GEMINI_API_BASE_URL,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// JSONをPOSTして (ステータス, 本文) を返す
async fn post_json(api_key: &str, url: &str, body: &str) -> Result<(u16, String), JsValue> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(url, &opts)?;
    request.headers().set("Content-Type", "application/json")?;
    request.headers().set(API_KEY_HEADER, api_key)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("window is not available"))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let resp: Response = resp_value.dyn_into()?;

    let text = JsFuture::from(resp.text()?).await?;
    Ok((resp.status(), text.as_string().unwrap_or_default()))
}

/// ステータスと本文から結果を判定
pub fn interpret_response(status: u16, body: &str) -> Result<String, String> {
    if !(200..300).contains(&status) {
        return Err(extract_error_message(body).unwrap_or_else(|| format!("API error: {}", status)));
    }
    parse_generation_response(body).map_err(|e| e.to_string())
}

/// JSの例外を1行メッセージにする
fn describe_js_error(value: &JsValue) -> String {
    if let Some(message) = value.as_string() {
        return message;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return format!("Request failed: {}", String::from(error.message()));
    }
    format!("Request failed: {:?}", value)
}

/// 画像を生成してData URLを返す
///
/// 失敗時は画面にそのまま出すメッセージを返す。
pub async fn generate_image(
    api_key: &str,
    child: &EncodedImage,
    adult: &EncodedImage,
    prompt: &str,
) -> Result<String, String> {
    let request = build_generation_request(child, adult, prompt);
    let body = serde_json::to_string(&request).map_err(|e| e.to_string())?;
    let url = endpoint_url(GEMINI_API_BASE_URL, DEFAULT_IMAGE_MODEL);

    log::info!(
        "requesting generation ({} + {} bytes)",
        child.approx_size(),
        adult.approx_size()
    );
    let (status, text) = post_json(api_key, &url, &body)
        .await
        .map_err(|e| describe_js_error(&e))?;
    log::info!("response status {}", status);

    interpret_response(status, &text)
}
