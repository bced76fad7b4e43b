//! メインアプリケーションコンポーネント
//!
//! フォームと送信状態は reunify_common::Workflow 1つにまとめてシグナルで持つ。
//! 送信中もスロットとプロンプトは編集できる（次回の送信にだけ効く）。

use leptos::prelude::*;
use leptos::task::spawn_local;
use reunify_common::{EncodedImage, ImageRole, Workflow};
use crate::api::gemini;
use crate::components::{
    header::Header,
    settings_panel::SettingsPanel,
    upload_slot::UploadSlot,
    prompt_field::PromptField,
    generate_button::GenerateButton,
    result_panel::ResultPanel,
};

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    // アプリケーション状態
    let workflow = RwSignal::new(Workflow::new());
    let (api_key, set_api_key) = signal(String::new());

    let prompt = Signal::derive(move || workflow.with(|w| w.prompt().to_string()));
    let outcome = Signal::derive(move || workflow.with(|w| w.outcome().clone()));
    let label = Signal::derive(move || workflow.with(|w| w.status_label()));
    let can_submit = Signal::derive(move || {
        workflow.with(|w| w.can_submit()) && !api_key.get().trim().is_empty()
    });

    // 画像スロット更新ハンドラ
    let on_image = move |role: ImageRole| {
        move |image: Option<EncodedImage>| {
            workflow.update(|w| w.set_image(role, image));
        }
    };

    // プロンプト更新ハンドラ
    let on_prompt = move |text: String| {
        workflow.update(|w| w.set_prompt(text));
    };

    // 生成開始ハンドラ
    let on_generate = move |_: ()| {
        let key = api_key.get_untracked();
        match workflow.try_update(|w| w.begin_submit()) {
            Some(Ok(submission)) => {
                spawn_local(async move {
                    let result = gemini::generate_image(
                        &key,
                        &submission.child_image,
                        &submission.adult_image,
                        &submission.prompt_text,
                    )
                    .await;
                    workflow.update(|w| {
                        w.finish(submission.attempt, result);
                    });
                });
            }
            // ボタンは can_submit で無効化済み。ここに来るのは二重クリック程度
            Some(Err(e)) => log::warn!("submission rejected: {}", e),
            None => {}
        }
    };

    view! {
        <div class="container">
            <Header />

            <SettingsPanel api_key=api_key set_api_key=set_api_key />

            <Show when=move || api_key.get().trim().is_empty()>
                <p class="text-muted">"Enter your Gemini API key above to enable generation."</p>
            </Show>

            <div class="upload-grid">
                <UploadSlot role=ImageRole::Child on_change=on_image(ImageRole::Child) />
                <UploadSlot role=ImageRole::Adult on_change=on_image(ImageRole::Adult) />
            </div>

            <PromptField prompt=prompt on_input=on_prompt />

            <GenerateButton enabled=can_submit label=label on_generate=on_generate />

            <ResultPanel outcome=outcome />
        </div>
    }
}
