use crate::api::ApiClient;
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub(crate) struct AppState {
    /// Base URL plus the current session token. Pages track this signal to
    /// reload when the credential changes.
    pub api_client: RwSignal<ApiClient>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            api_client: RwSignal::new(ApiClient::load_from_storage()),
        }
    }

    /// Adopt a token changed by another tab. No-op when unchanged.
    pub fn sync_token(&self, token: Option<String>) {
        if self.api_client.with_untracked(|c| c.token != token) {
            self.api_client.update(|c| c.token = token);
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);
