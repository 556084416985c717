use leptos::html;
use leptos::prelude::*;
use tw_merge::tw_merge;

/// Plain-text area used for topic titles.
///
/// Not bound through `bind:value`; the value flows in through `value` and
/// every edit goes out through `on_input`, so the owner decides what is stored
/// (e.g. clamping to a maximum length).
#[component]
pub fn Textarea(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] name: String,
    #[prop(into, optional)] id: String,
    #[prop(default = 1)] rows: u32,
    #[prop(optional)] max_length: Option<usize>,
    #[prop(optional)] autofocus: bool,

    value: Signal<String>,
    on_input: Callback<String>,

    #[prop(optional)] node_ref: NodeRef<html::Textarea>,
) -> impl IntoView {
    let merged_class = tw_merge!(
        "placeholder:text-muted-foreground selection:bg-primary selection:text-primary-foreground dark:bg-input/30 border-input w-full min-w-0 resize-none rounded-md border bg-transparent px-3 py-2 text-base shadow-xs transition-[color,box-shadow] outline-none md:text-sm",
        "focus-visible:border-ring focus-visible:ring-ring/50 focus-visible:ring-2",
        class
    );

    let handle_input = move |ev: web_sys::Event| {
        let el = event_target::<web_sys::HtmlTextAreaElement>(&ev);
        on_input.run(el.value());
    };

    view! {
        <textarea
            data-name="Textarea"
            class=merged_class
            placeholder=placeholder
            name=name
            id=id
            rows=rows.to_string()
            maxlength=max_length.map(|n| n.to_string())
            autofocus=autofocus
            prop:value=move || value.get()
            on:input=handle_input
            node_ref=node_ref
        ></textarea>
    }
}
