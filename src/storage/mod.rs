pub(crate) const TOKEN_KEY: &str = "casnode_token";

/// i18next persists the chosen language under this key; we honor it so the
/// Rust frontend and the legacy pages agree on the locale.
pub(crate) const LANGUAGE_KEY: &str = "i18nextLng";

pub(crate) fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub(crate) fn load_string_from_storage(key: &str) -> Option<String> {
    local_storage()?
        .get_item(key)
        .ok()
        .flatten()
        .filter(|v| !v.trim().is_empty())
}

pub(crate) fn load_token() -> Option<String> {
    load_string_from_storage(TOKEN_KEY)
}

pub(crate) fn load_language() -> Option<String> {
    load_string_from_storage(LANGUAGE_KEY)
}
