//! 画像スロットコンポーネント
//!
//! 1スロット = 1役割（子供の頃 / 最近）。
//! 選択した画像の親への通知とプレビュー更新は同じハンドラで行う。
//! 読み込み中にクリアや選び直しがあった場合、古い読み込み結果は捨てる。

use leptos::prelude::*;
use reunify_common::{EncodedImage, ImageRole};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use wasm_bindgen::prelude::*;
use web_sys::{File, FileReader, HtmlInputElement};

/// スロットの選択世代
///
/// 選択・クリアのたびに進める。読み込み完了時に世代が変わっていれば結果を捨てる。
#[derive(Clone, Default)]
struct SelectionGuard(Arc<AtomicU64>);

impl SelectionGuard {
    /// 世代を進めて新しい世代番号を返す
    fn next(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.0.load(Ordering::Relaxed) == ticket
    }
}

#[component]
pub fn UploadSlot<F>(
    role: ImageRole,
    on_change: F,
) -> impl IntoView
where
    F: Fn(Option<EncodedImage>) + 'static + Clone + Send,
{
    let (preview_url, set_preview_url) = signal(None::<String>);
    let input_ref = NodeRef::<leptos::html::Input>::new();
    let input_id = format!("{}-photo", role.as_str());
    let guard = SelectionGuard::default();

    let report = move |image: Option<EncodedImage>| {
        set_preview_url.set(image.as_ref().map(|i| i.preview_url.clone()));
        on_change(image);
    };

    let on_file_change = {
        let report = report.clone();
        let guard = guard.clone();
        move |ev: leptos::ev::Event| {
            let input: HtmlInputElement = event_target(&ev);
            match input.files().and_then(|files| files.get(0)) {
                Some(file) => load_selection(file, &guard, report.clone()),
                None => clear_selection(&guard, &report),
            }
        }
    };

    let on_clear = {
        let report = report.clone();
        let guard = guard.clone();
        move |_: leptos::ev::MouseEvent| {
            // 同じファイルを選び直せるように入力値も消す
            if let Some(input) = input_ref.get() {
                input.set_value("");
            }
            clear_selection(&guard, &report);
        }
    };

    view! {
        <div class="upload-slot">
            <label class="slot-label" for=input_id.clone()>{role.label()}</label>
            <div class="upload-area" class:has-preview=move || preview_url.get().is_some()>
                <Show
                    when=move || preview_url.get().is_some()
                    fallback=|| view! {
                        <div class="upload-icon">"📷"</div>
                        <p>"Click to upload"</p>
                    }
                >
                    <img
                        class="slot-preview"
                        src=move || preview_url.get().unwrap_or_default()
                        alt="Preview"
                    />
                </Show>
                <input
                    id=input_id
                    class="slot-input"
                    type="file"
                    accept="image/*"
                    node_ref=input_ref
                    on:change=on_file_change
                />
            </div>
            <button
                class="btn btn-small btn-tertiary"
                disabled=move || preview_url.get().is_none()
                on:click=on_clear
            >
                "Clear"
            </button>
        </div>
    }
}

/// 新しい選択として読み込む（後から別の操作があれば結果は通知しない）
fn load_selection<F>(file: File, guard: &SelectionGuard, report: F)
where
    F: Fn(Option<EncodedImage>) + 'static,
{
    let ticket = guard.next();
    let guard = guard.clone();
    read_file(file, move |image| {
        if guard.is_current(ticket) {
            report(image);
        } else {
            log::debug!("discarding stale selection #{}", ticket);
        }
    });
}

/// 選択を解除する（読み込み中のファイルも無効になる）
fn clear_selection<F>(guard: &SelectionGuard, report: &F)
where
    F: Fn(Option<EncodedImage>),
{
    guard.next();
    report(None);
}

/// FileReaderでData URLとして読み込む
///
/// 読めなかった場合は None を通知する。
fn read_file<F>(file: File, on_loaded: F)
where
    F: Fn(Option<EncodedImage>) + 'static,
{
    let file_name = file.name();
    let reader = match FileReader::new() {
        Ok(reader) => reader,
        Err(e) => {
            log::warn!("FileReader unavailable: {:?}", e);
            on_loaded(None);
            return;
        }
    };

    let reader_clone = reader.clone();
    let closure = Closure::wrap(Box::new(move |_: web_sys::ProgressEvent| {
        let image = reader_clone
            .result()
            .ok()
            .and_then(|result| result.as_string())
            .and_then(|data_url| EncodedImage::from_data_url(&data_url));
        match &image {
            Some(image) => log::info!("loaded {} ({})", file_name, image.mime_type),
            None => log::warn!("could not read {}", file_name),
        }
        on_loaded(image);
    }) as Box<dyn FnMut(_)>);

    // 失敗時も loadend は発火する（result は null）
    reader.set_onloadend(Some(closure.as_ref().unchecked_ref()));
    closure.forget();

    if let Err(e) = reader.read_as_data_url(&file) {
        log::warn!("readAsDataURL failed: {:?}", e);
    }
}


/// ブラウザ上でのテスト（wasm-pack test --headless --firefox web-wasm）
#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use futures::channel::oneshot;
    use gloo::timers::future::TimeoutFuture;
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;
    use web_sys::FilePropertyBag;

    wasm_bindgen_test_configure!(run_in_browser);

    fn make_file(bytes: &[u8], name: &str, mime: &str) -> File {
        let parts = js_sys::Array::of1(&js_sys::Uint8Array::from(bytes));
        let options = FilePropertyBag::new();
        options.set_type(mime);
        File::new_with_u8_array_sequence_and_options(&parts, name, &options)
            .expect("File作成失敗")
    }

    /// 通知内容を記録するコールバック
    fn recorder() -> (
        Rc<RefCell<Vec<Option<EncodedImage>>>>,
        impl Fn(Option<EncodedImage>) + 'static,
    ) {
        let reports = Rc::new(RefCell::new(Vec::new()));
        let sink = reports.clone();
        (reports, move |image: Option<EncodedImage>| sink.borrow_mut().push(image))
    }

    #[wasm_bindgen_test]
    async fn read_file_reports_encoded_image() {
        let bytes = b"\x89PNG\r\n\x1a\nfake-png";
        let (tx, rx) = oneshot::channel();
        let tx = RefCell::new(Some(tx));

        read_file(make_file(bytes, "child.png", "image/png"), move |image| {
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(image);
            }
        });

        let image = rx.await.expect("通知なし").expect("画像なし");
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.decode().unwrap(), bytes);
        assert!(image.preview_url.starts_with("data:image/png;base64,"));
    }

    #[wasm_bindgen_test]
    async fn load_selection_reports_current_file() {
        let guard = SelectionGuard::default();
        let (reports, report) = recorder();

        load_selection(make_file(b"jpeg", "a.jpg", "image/jpeg"), &guard, report);
        TimeoutFuture::new(100).await;

        let reports = reports.borrow();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].as_ref().unwrap().mime_type, "image/jpeg");
    }

    #[wasm_bindgen_test]
    async fn clear_before_load_discards_result() {
        let guard = SelectionGuard::default();
        let (reports, report) = recorder();
        let report = Rc::new(report);

        let loading = report.clone();
        load_selection(
            make_file(b"old photo", "a.png", "image/png"),
            &guard,
            move |image| loading(image),
        );
        clear_selection(&guard, &*report);
        TimeoutFuture::new(100).await;

        // クリアの None だけが残り、後から届いた画像は捨てられる
        assert_eq!(*reports.borrow(), vec![None]);
    }

    #[wasm_bindgen_test]
    async fn newer_selection_wins_over_older_load() {
        let guard = SelectionGuard::default();
        let (reports, report) = recorder();
        let report = Rc::new(report);

        let first = report.clone();
        load_selection(make_file(b"first", "a.png", "image/png"), &guard, move |i| first(i));
        let second = report.clone();
        load_selection(make_file(b"second", "b.webp", "image/webp"), &guard, move |i| second(i));
        TimeoutFuture::new(100).await;

        let reports = reports.borrow();
        assert_eq!(reports.len(), 1);
        let image = reports[0].as_ref().unwrap();
        assert_eq!(image.mime_type, "image/webp");
        assert_eq!(image.decode().unwrap(), b"second");
    }
}
