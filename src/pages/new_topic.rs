use crate::api::{ApiClient, ApiError};
use crate::components::ui::{
    BoxCell, BoxHeader, BoxInner, Button, ButtonSize, ButtonVariant, Chevron, ForumBox,
    ProblemPanel, Spinner, Textarea,
};
use crate::composer::{ComposerAction, ComposerCommand, ComposerState, DraftField};
use crate::editor::{read_upload, MarkdownEditor, MarkdownPreview, RichTextEditor};
use crate::layout::{viewport_width, LayoutSize};
use crate::models::{EditorKind, TITLE_MAX_CHARS};
use crate::state::AppContext;
use icons::{Eye, Send as SendIcon};
use leptos::ev;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dom::helpers::window_event_listener;
use leptos_router::hooks::use_navigate;

/// Runs `action` through the reducer stored in `state`.
///
/// Requests may finish after the page is gone; a disposed signal makes
/// `try_update` return `None` and the action is dropped.
fn reduce_into(state: RwSignal<ComposerState>, action: ComposerAction) -> Option<ComposerCommand> {
    state
        .try_update(|s| {
            let (next, cmd) = std::mem::take(s).apply(action);
            *s = next;
            cmd
        })
        .flatten()
}

/// Everything an async completion needs to feed its result back into the
/// composer. All fields are signals, so the handle is `Copy` and can be moved
/// into every event handler and spawned task.
#[derive(Clone, Copy)]
struct ComposerHandle {
    state: RwSignal<ComposerState>,
    api_client: RwSignal<ApiClient>,
    pending_nav: RwSignal<Option<String>>,
}

impl ComposerHandle {
    fn dispatch(self, action: ComposerAction) {
        if let Some(command) = reduce_into(self.state, action) {
            self.run(command);
        }
    }

    fn run(self, command: ComposerCommand) {
        match command {
            ComposerCommand::CreateTopic(req) => {
                let Some(api) = self.api_client.try_get_untracked() else {
                    return;
                };
                spawn_local(async move {
                    let result = api.add_topic(&req).await;
                    self.dispatch(ComposerAction::CreateFinished(result));
                });
            }
            ComposerCommand::Navigate(path) => {
                let _ = self.pending_nav.try_set(Some(path));
            }
        }
    }

    fn load_node(self, node_id: String) {
        if node_id.trim().is_empty() {
            return;
        }
        let api = self.api_client.get_untracked();
        spawn_local(async move {
            let result = api.get_node(&node_id).await;
            self.dispatch(ComposerAction::NodeLoaded(result));
        });
    }
}

/// The new-topic form. One state machine, two renderings (large / small).
///
/// `size` is the layout hint (`"small"` or anything else); when absent the
/// viewport width picks the layout and follows window resizes.
#[component]
pub fn TopicComposer(node_id: String, #[prop(default = None)] size: Option<String>) -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;
    let t = move |key: &str| app_state.t(key);

    let state = RwSignal::new(ComposerState::new(&node_id));
    let handle = ComposerHandle {
        state,
        api_client: app_state.api_client,
        pending_nav: RwSignal::new(None),
    };

    handle.load_node(node_id.clone());

    let navigate = use_navigate();
    Effect::new(move |_| {
        if let Some(path) = handle.pending_nav.get() {
            navigate(&path, Default::default());
        }
    });

    // Layout: explicit hint, or viewport width (re-evaluated on resize).
    let viewport = RwSignal::new(viewport_width());
    let resize_handle = window_event_listener(ev::resize, move |_| {
        viewport.set(viewport_width());
    });
    on_cleanup(move || resize_handle.remove());
    let layout = Memo::new(move |_| LayoutSize::select(size.as_deref(), viewport.get()));

    // Views read the state through these.
    let title = Signal::derive(move || state.with(|s| s.draft.title.clone()));
    let body = Signal::derive(move || state.with(|s| s.draft.body.content().to_string()));
    let editor_kind = Memo::new(move |_| state.with(|s| s.draft.editor_kind()));
    let submitting = Memo::new(move |_| state.with(|s| s.is_submitting()));
    let show_preview = Memo::new(move |_| {
        state.with(|s| s.preview_enabled && s.draft.editor_kind() == EditorKind::Markdown)
    });
    let node_name = Memo::new(move |_| state.with(|s| s.node_name().map(str::to_string)));
    let messages = Signal::derive(move || {
        state.with(|s| s.visible_messages(&app_state.i18n))
    });
    let uploading: RwSignal<usize> = RwSignal::new(0);

    let on_title = Callback::new(move |v: String| {
        handle.dispatch(ComposerAction::UpdateField(DraftField::Title(v)));
    });
    let on_body = Callback::new(move |v: String| {
        handle.dispatch(ComposerAction::UpdateField(DraftField::Body(v)));
    });
    let on_dismiss = Callback::new(move |_: ()| handle.dispatch(ComposerAction::ClearMessage));

    let on_files = Callback::new(move |files: Vec<web_sys::File>| {
        for file in files {
            let api = handle.api_client.get_untracked();
            uploading.update(|n| *n += 1);
            spawn_local(async move {
                let result = match read_upload(file).await {
                    Ok(up) => api.upload_file(&up.name, &up.mime, &up.data_url).await,
                    Err(e) => Err(ApiError::parse(e)),
                };
                let _ = uploading.try_update(|n| *n = n.saturating_sub(1));
                handle.dispatch(ComposerAction::UploadFinished(result));
            });
        }
    });

    let publish = move |_: ev::MouseEvent| handle.dispatch(ComposerAction::Submit);

    let problem_panel = move || {
        view! {
            <ProblemPanel
                title=t("error:Please resolve the following issues before creating a new topic")
                messages=messages
                on_dismiss=on_dismiss
            />
        }
    };

    // Editor for the current variant; only rebuilt when the variant changes.
    let editor_region = move |rows: u32| {
        move || match editor_kind.get() {
            EditorKind::Markdown => view! {
                <MarkdownEditor
                    value=body
                    on_change=on_body
                    on_files=on_files
                    rows=rows
                    placeholder=t(EditorKind::Markdown.label_key())
                />
            }
            .into_any(),
            EditorKind::RichText => view! {
                <RichTextEditor initial=body.get_untracked() on_change=on_body />
            }
            .into_any(),
        }
    };

    let editor_switch = move || {
        view! {
            <div class="flex items-center gap-2 text-xs text-muted-foreground">
                <span>{move || t("new:Switch editor")}</span>
                <div class="inline-flex gap-1" role="group">
                    {EditorKind::ALL
                        .into_iter()
                        .map(|kind| {
                            view! {
                                <Button
                                    variant=ButtonVariant::Toggle
                                    size=ButtonSize::Xs
                                    attr:aria-pressed=move || (editor_kind.get() == kind).to_string()
                                    on:click=move |_| handle.dispatch(ComposerAction::SwitchEditor(kind))
                                >
                                    {move || t(kind.label_key())}
                                </Button>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        }
    };

    let upload_status = move || {
        view! {
            <Show when=move || { uploading.get() > 0 } fallback=|| ().into_view()>
                <span class="inline-flex items-center gap-1 text-xs text-muted-foreground">
                    <Spinner class="size-3" />
                    {move || t("new:Uploading")}
                </span>
            </Show>
        }
    };

    let publish_label = move || {
        if submitting.get() {
            t("newNodeTopic:Publishing")
        } else {
            t("newNodeTopic:Publish")
        }
    };

    let title_placeholder = StoredValue::new(t(
        "new:Please input the topic title. The body can be empty if the title expresses the full idea",
    ));
    let node_id_sv = StoredValue::new(node_id);

    let large = move || {
        let title_ref: NodeRef<html::Textarea> = NodeRef::new();

        // One-time width measurement, used to line the preview up with the form.
        Effect::new(move |_| {
            if let Some(el) = title_ref.get() {
                handle.dispatch(ComposerAction::TitleWidthMeasured(el.client_width()));
            }
        });

        let preview_style = move || {
            state
                .with(|s| s.layout_width)
                .map(|w| format!("max-width: {w}px"))
                .unwrap_or_default()
        };

        view! {
            <ForumBox>
                <BoxHeader>
                    <a href="/" class="text-primary hover:underline">{move || app_state.forum_name.get()}</a>
                    <Chevron>"›"</Chevron>
                    <a
                        href=move || format!("/go/{}", urlencoding::encode(&node_id_sv.get_value()))
                        class="text-primary hover:underline"
                    >
                        {move || node_name.get().unwrap_or_default()}
                    </a>
                    <Chevron>"›"</Chevron>
                    <span>{move || t("new:New Topic")}</span>
                </BoxHeader>

                {problem_panel}

                <BoxCell>
                    <Textarea
                        id="topic_title"
                        name="title"
                        rows=4
                        max_length=TITLE_MAX_CHARS
                        autofocus=true
                        placeholder=title_placeholder.get_value()
                        value=title
                        on_input=on_title
                        node_ref=title_ref
                    />

                    {editor_region(8)}

                    <div class="flex flex-wrap items-center justify-between gap-2">
                        <div class="flex items-center gap-2">
                            <Button variant=ButtonVariant::Outline size=ButtonSize::Sm on:click=move |_| handle.dispatch(ComposerAction::TogglePreview)>
                                <Eye />
                                {move || t("newNodeTopic:Preview")}
                            </Button>
                            <Button size=ButtonSize::Sm attr:disabled=move || submitting.get() on:click=publish>
                                <Show when=move || submitting.get() fallback=|| view! { <SendIcon /> }>
                                    <Spinner />
                                </Show>
                                {publish_label}
                            </Button>
                            {upload_status}
                        </div>
                        {editor_switch}
                    </div>
                </BoxCell>

                <Show when=move || show_preview.get() fallback=|| ().into_view()>
                    <BoxInner class="flex items-center justify-between border-b">
                        <span>{move || t("new:Content Preview")}</span>
                        <span>{move || t("new:Already enabled Markdown")}</span>
                    </BoxInner>
                    <div class="px-4 py-3" style=preview_style>
                        <MarkdownPreview source=body />
                    </div>
                </Show>
            </ForumBox>
        }
    };

    let small = move || {
        view! {
            <ForumBox>
                {problem_panel}

                <BoxCell>
                    <Textarea
                        id="topic_title"
                        name="title"
                        rows=1
                        max_length=TITLE_MAX_CHARS
                        placeholder=title_placeholder.get_value()
                        value=title
                        on_input=on_title
                    />

                    {editor_region(4)}

                    <div class="flex flex-wrap items-center justify-between gap-2">
                        <div class="flex items-center gap-2">
                            <Button size=ButtonSize::Sm attr:disabled=move || submitting.get() on:click=publish>
                                <Show when=move || submitting.get() fallback=|| ().into_view()>
                                    <Spinner />
                                </Show>
                                {publish_label}
                            </Button>
                            {upload_status}
                        </div>
                        {editor_switch}
                    </div>
                </BoxCell>

                <BoxInner class="flex flex-wrap items-center justify-end gap-1">
                    <a
                        href=move || format!("/settings/ignore/node/{}", urlencoding::encode(&node_id_sv.get_value()))
                        class="text-primary hover:underline"
                    >
                        {move || t("node:Ignore this node")}
                    </a>
                    <span>{move || t("node:Topics in the ignored nodes will not appear on the homepage.")}</span>
                </BoxInner>
            </ForumBox>
        }
    };

    view! {
        <div data-name="TopicComposer" class="mx-auto w-full max-w-[960px] px-4 py-6">
            {move || match layout.get() {
                LayoutSize::Large => large().into_any(),
                LayoutSize::Small => small().into_any(),
            }}
        </div>
    }
}
