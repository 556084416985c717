mod api;
mod app;
mod components;
mod composer;
mod editor;
mod i18n;
mod layout;
mod models;
mod pages;
mod state;
mod storage;

use app::App;
use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use crate::api::{ApiClient, EnvConfig};
    use crate::i18n::Locale;
    use crate::storage::{local_storage, LANGUAGE_KEY, TOKEN_KEY};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_env_config_defaults_without_window_env() {
        let cfg = EnvConfig::new();
        assert!(!cfg.api_url.is_empty());
        assert!(!cfg.forum_name.is_empty());
    }

    #[wasm_bindgen_test]
    fn test_api_client_picks_up_stored_token() {
        let storage = local_storage().expect("browser should expose localStorage");
        let _ = storage.set_item(TOKEN_KEY, "jwt");
        assert_eq!(ApiClient::load_from_storage().token.as_deref(), Some("jwt"));

        let _ = storage.remove_item(TOKEN_KEY);
        assert!(ApiClient::load_from_storage().token.is_none());
    }

    #[wasm_bindgen_test]
    fn test_stored_language_wins_over_browser() {
        let storage = local_storage().expect("browser should expose localStorage");
        let _ = storage.set_item(LANGUAGE_KEY, "zh");
        assert_eq!(Locale::detect(), Locale::Zh);
        let _ = storage.remove_item(LANGUAGE_KEY);
    }
}

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    mount_to_body(App);
}
