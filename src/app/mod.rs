use crate::pages::{NewTopicPage, NotFoundPage, TopicReviewPage};
use crate::state::{AppContext, AppState};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppContext(AppState::new()));

    view! {
        <Router>
            <Routes fallback=NotFoundPage>
                <Route path=path!("new/:node_id") view=NewTopicPage />
                <Route path=path!("t/:topic_id/review") view=TopicReviewPage />
            </Routes>
        </Router>
    }
}
