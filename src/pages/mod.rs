mod new_topic;

pub use new_topic::TopicComposer;

use crate::components::ui::{BoxCell, BoxHeader, ForumBox};
use crate::state::AppContext;
use leptos::prelude::*;
use leptos_router::hooks::{use_params, use_query_map};
use leptos_router::params::Params;

#[derive(Params, PartialEq, Clone, Debug)]
pub struct NewTopicRouteParams {
    pub node_id: Option<String>,
}

#[derive(Params, PartialEq, Clone, Debug)]
pub struct TopicReviewRouteParams {
    pub topic_id: Option<String>,
}

/// `/new/:node_id[?size=small|large]`
#[component]
pub fn NewTopicPage() -> impl IntoView {
    let params = use_params::<NewTopicRouteParams>();
    let query = use_query_map();

    let node_id = move || params.get().ok().and_then(|p| p.node_id).unwrap_or_default();

    // Keyed on the node: moving to another node remounts the composer, which
    // is the only way its draft gets reset.
    move || {
        let size = query.get_untracked().get("size");
        view! { <TopicComposer node_id=node_id() size=size /> }
    }
}

/// `/t/:topic_id/review`, where a freshly published topic lands.
#[component]
pub fn TopicReviewPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;
    let params = use_params::<TopicReviewRouteParams>();

    let topic_id = move || params.get().ok().and_then(|p| p.topic_id).unwrap_or_default();

    view! {
        <div class="mx-auto w-full max-w-[960px] px-4 py-6">
            <ForumBox>
                <BoxHeader>
                    <a href="/" class="text-primary hover:underline">{move || app_state.forum_name.get()}</a>
                </BoxHeader>
                <BoxCell>
                    <div class="text-sm font-medium">{move || app_state.t("review:Topic submitted")}</div>
                    <div class="text-xs text-muted-foreground">
                        {move || app_state.t("review:Your topic has been published")}
                    </div>
                    <a
                        href=move || format!("/t/{}", urlencoding::encode(&topic_id()))
                        class="mt-2 inline-flex h-8 items-center rounded-md bg-primary px-3 text-sm font-medium text-primary-foreground hover:bg-primary/90"
                    >
                        {move || app_state.t("review:View topic")}
                    </a>
                </BoxCell>
            </ForumBox>
        </div>
    }
}

#[component]
pub fn NotFoundPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>().0;

    view! {
        <div class="px-4 py-8 text-xs text-muted-foreground">
            {move || app_state.t("general:Not found")}
        </div>
    }
}
