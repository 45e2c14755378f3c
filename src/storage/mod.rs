/// Bearer token written by the dashboard's sign-in flow.
pub(crate) const TOKEN_KEY: &str = "brevet_token";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Current session token, if one is stored and non-blank.
pub(crate) fn load_token() -> Option<String> {
    local_storage()
        .and_then(|s| s.get_item(TOKEN_KEY).ok().flatten())
        .filter(|t| !t.trim().is_empty())
}
