//! Topic body editors and the markdown preview.
//!
//! Both editors share one contract: every change is reported through
//! `on_change` with the full new content. The markdown editor additionally
//! hands pasted/dropped files to `on_files` for upload.

use base64::Engine;
use leptos::html;
use leptos::prelude::*;
use pulldown_cmark::{Options, Parser};
use tw_merge::tw_merge;

const FALLBACK_MIME: &str = "application/octet-stream";

pub(crate) fn render_markdown(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(source, options);
    let mut out = String::with_capacity(source.len() + source.len() / 2);
    pulldown_cmark::html::push_html(&mut out, parser);
    out
}

/// `data:<mime>;base64,<payload>`, the shape the upload endpoint expects.
pub(crate) fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    let mime = if mime.trim().is_empty() {
        FALLBACK_MIME
    } else {
        mime
    };
    format!(
        "data:{mime};base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

/// A file picked up from the editor, read into memory.
#[derive(Clone, Debug)]
pub(crate) struct PendingUpload {
    pub name: String,
    pub mime: String,
    pub data_url: String,
}

pub(crate) async fn read_upload(file: web_sys::File) -> Result<PendingUpload, String> {
    let buf = wasm_bindgen_futures::JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Failed to read {}: {:?}", file.name(), e))?;
    let bytes = js_sys::Uint8Array::new(&buf).to_vec();
    let mime = file.type_();

    Ok(PendingUpload {
        name: file.name(),
        data_url: to_data_url(&mime, &bytes),
        mime: if mime.trim().is_empty() {
            FALLBACK_MIME.to_string()
        } else {
            mime
        },
    })
}

fn collect_files(list: Option<web_sys::FileList>) -> Vec<web_sys::File> {
    let Some(list) = list else {
        return vec![];
    };
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

#[component]
pub fn MarkdownEditor(
    value: Signal<String>,
    on_change: Callback<String>,
    on_files: Callback<Vec<web_sys::File>>,
    #[prop(optional, into)] class: String,
    #[prop(optional, into)] placeholder: String,
    #[prop(default = 8)] rows: u32,
) -> impl IntoView {
    let merged_class = tw_merge!(
        "w-full min-h-24 resize-y rounded-md border border-input bg-transparent px-3 py-2 font-mono text-sm shadow-xs outline-none placeholder:text-muted-foreground focus-visible:border-ring focus-visible:ring-2 focus-visible:ring-ring/50",
        class
    );

    let on_input = move |ev: web_sys::Event| {
        let el = event_target::<web_sys::HtmlTextAreaElement>(&ev);
        on_change.run(el.value());
    };

    // Only swallow the event when it actually carries files; plain text paste
    // and text drops go through the textarea as usual.
    let on_paste = move |ev: web_sys::ClipboardEvent| {
        let files = collect_files(ev.clipboard_data().and_then(|d| d.files()));
        if !files.is_empty() {
            ev.prevent_default();
            on_files.run(files);
        }
    };

    let on_drop = move |ev: web_sys::DragEvent| {
        let files = collect_files(ev.data_transfer().and_then(|d| d.files()));
        if !files.is_empty() {
            ev.prevent_default();
            on_files.run(files);
        }
    };

    view! {
        <textarea
            data-name="MarkdownEditor"
            id="topic_content"
            class=merged_class
            rows=rows.to_string()
            placeholder=placeholder
            prop:value=move || value.get()
            on:input=on_input
            on:paste=on_paste
            on:drop=on_drop
            on:dragover=|ev: web_sys::DragEvent| ev.prevent_default()
        ></textarea>
    }
}

#[component]
pub fn RichTextEditor(
    /// Seeds the surface once; later edits flow out through `on_change` only.
    initial: String,
    on_change: Callback<String>,
    #[prop(optional, into)] class: String,
) -> impl IntoView {
    let node_ref: NodeRef<html::Div> = NodeRef::new();

    let merged_class = tw_merge!(
        "w-full min-h-72 overflow-auto rounded-md border border-input bg-transparent px-3 py-2 text-sm shadow-xs outline-none focus-visible:border-ring focus-visible:ring-2 focus-visible:ring-ring/50 [&_p]:my-1",
        class
    );

    // Rewriting innerHTML on every keystroke would reset the caret.
    Effect::new(move |_| {
        if let Some(el) = node_ref.get() {
            el.set_inner_html(&initial);
        }
    });

    let on_input = move |ev: web_sys::Event| {
        let el = event_target::<web_sys::HtmlElement>(&ev);
        on_change.run(el.inner_html());
    };

    view! {
        <div
            data-name="RichTextEditor"
            id="topic_content"
            class=merged_class
            contenteditable="true"
            node_ref=node_ref
            on:input=on_input
        ></div>
    }
}

#[component]
pub fn MarkdownPreview(source: Signal<String>, #[prop(optional, into)] class: String) -> impl IntoView {
    let merged_class = tw_merge!(
        "markdown_body prose prose-sm max-w-none break-words text-sm",
        class
    );

    view! {
        <div
            data-name="MarkdownPreview"
            id="topic_preview"
            class=merged_class
            inner_html=move || render_markdown(&source.get())
        ></div>
    }
}
