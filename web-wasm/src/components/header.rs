//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Reunify"</h1>
            <p class="text-muted">
                "Reconnect with your past. Upload a childhood and a recent photo to create a unique, AI-generated \"then and now\" image."
            </p>
        </header>
    }
}
