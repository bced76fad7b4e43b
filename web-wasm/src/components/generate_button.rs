//! 生成ボタンコンポーネント

use leptos::prelude::*;

#[component]
pub fn GenerateButton<F>(
    enabled: Signal<bool>,
    label: Signal<&'static str>,
    on_generate: F,
) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send,
{
    view! {
        <div class="generate-button">
            <button
                class="btn btn-primary"
                disabled=move || !enabled.get()
                on:click={
                    let on_generate = on_generate.clone();
                    move |_| on_generate(())
                }
            >
                {move || label.get()}
            </button>
        </div>
    }
}
