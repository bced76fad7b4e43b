//! プロンプト入力欄

use leptos::prelude::*;

#[component]
pub fn PromptField<F>(
    prompt: Signal<String>,
    on_input: F,
) -> impl IntoView
where
    F: Fn(String) + 'static + Clone + Send,
{
    view! {
        <div class="form-group prompt-field">
            <label for="prompt">"3. Describe the image you want to create"</label>
            <textarea
                id="prompt"
                rows="3"
                prop:value=move || prompt.get()
                on:input=move |ev| on_input(event_target_value(&ev))
            />
        </div>
    }
}
