//! 結果表示コンポーネント
//!
//! 送信状態ごとにスピナー / エラー / 生成画像 / プレースホルダのどれか一つを出す。

use leptos::prelude::*;
use reunify_common::{extract_mime_type_from_data_url, RequestOutcome, RESULT_PLACEHOLDER};

#[component]
pub fn ResultPanel(outcome: Signal<RequestOutcome>) -> impl IntoView {
    view! {
        <div class="result-panel">
            {move || match outcome.get() {
                RequestOutcome::InFlight => view! {
                    <div class="spinner" />
                    <p class="text-muted">"Generating your image..."</p>
                }
                .into_any(),
                RequestOutcome::Failed(message) => view! { <ErrorDisplay message=message /> }.into_any(),
                RequestOutcome::Succeeded(url) => view! { <GeneratedImage src=url /> }.into_any(),
                RequestOutcome::Idle => view! { <p class="text-muted">{RESULT_PLACEHOLDER}</p> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn ErrorDisplay(message: String) -> impl IntoView {
    view! {
        <div class="error-display">
            <strong>"Error: "</strong>
            <span>{message}</span>
        </div>
    }
}

#[component]
fn GeneratedImage(src: String) -> impl IntoView {
    let file_name = download_file_name(&src);
    view! {
        <div class="generated-image">
            <img src=src.clone() alt="Generated then and now" />
            <a class="btn btn-secondary" href=src download=file_name>
                "Download"
            </a>
        </div>
    }
}

/// 保存ファイル名（拡張子は画像のMIMEタイプに合わせる）
fn download_file_name(data_url: &str) -> String {
    let mime = extract_mime_type_from_data_url(data_url);
    let subtype = mime.rsplit('/').next().unwrap_or(mime);
    let ext = match subtype {
        "jpeg" => "jpg",
        "svg+xml" => "svg",
        other => other,
    };
    format!("reunify.{}", ext)
}
