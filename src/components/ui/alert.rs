use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Alert, div, "relative w-full rounded-md border px-4 py-3 text-sm"}
    clx! {AlertTitle, div, "mb-1 font-medium leading-none"}
}

pub use components::*;

/// Lists `messages` under `title`; clicking anywhere on the panel dismisses it.
/// Renders nothing while `messages` is empty.
#[component]
pub fn ProblemPanel(
    #[prop(into)] title: String,
    messages: Signal<Vec<String>>,
    on_dismiss: Callback<()>,
) -> impl IntoView {
    let title = StoredValue::new(title);

    view! {
        <Show when=move || !messages.get().is_empty() fallback=|| ().into_view()>
            <div
                data-name="ProblemPanel"
                class="cursor-pointer px-4 pt-3"
                role="alert"
                on:click=move |_| on_dismiss.run(())
            >
                <Alert class="border-destructive/30 bg-destructive/5 text-destructive">
                    <AlertTitle>{move || title.get_value()}</AlertTitle>
                    <ul class="list-disc pl-5 text-sm">
                        {move || {
                            messages
                                .get()
                                .into_iter()
                                .map(|m| view! { <li>{m}</li> })
                                .collect_view()
                        }}
                    </ul>
                </Alert>
            </div>
        </Show>
    }
}
