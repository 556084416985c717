use crate::api::{ApiClient, EnvConfig};
use crate::i18n::{I18n, Locale};
use leptos::prelude::*;

/// App-wide state, provided once by `App` and read through [`AppContext`].
#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub api_client: RwSignal<ApiClient>,
    pub i18n: I18n,

    /// Shown as the first breadcrumb (`window.ENV.FORUM_NAME`).
    pub forum_name: RwSignal<String>,
}

impl AppState {
    pub fn new() -> Self {
        let env = EnvConfig::new();
        let locale = Locale::detect();
        log::debug!("api {} locale {:?}", env.api_url, locale);

        Self {
            api_client: RwSignal::new(ApiClient::load_from_storage()),
            i18n: I18n::new(locale),
            forum_name: RwSignal::new(env.forum_name),
        }
    }

    /// Translate `key` in the detected locale.
    pub fn t(&self, key: &str) -> String {
        self.i18n.t(key)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);
