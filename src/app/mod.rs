use crate::notify::{ToastQueue, Toaster};
use crate::pages::{PatentEditPage, PatentListPage};
use crate::patent::LISTING_ROUTE;
use crate::state::{AppContext, AppState};
use crate::storage::TOKEN_KEY;
use leptos::ev;
use leptos::prelude::*;
use leptos_dom::helpers::window_event_listener;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    let app_state = AppState::new();
    provide_context(AppContext(app_state));
    provide_context(ToastQueue::new());

    // The session token is written by the dashboard's sign-in flow, possibly in
    // another tab. Pages track `api_client`, so adopting it here re-runs their loads.
    let storage_listener = window_event_listener(ev::storage, move |e| {
        if e.key().as_deref() == Some(TOKEN_KEY) {
            app_state.sync_token(e.new_value().filter(|t| !t.trim().is_empty()));
        }
    });
    on_cleanup(move || storage_listener.remove());

    // IMPORTANT:
    // - Leptos CSR requires the `csr` feature on `leptos`.
    // - router hooks require a <Router> context.
    view! {
        <Router>
            <Toaster />
            <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"Page introuvable"</div> }>
                <Route path=path!("dashboard/patent") view=PatentListPage />
                <Route path=path!("dashboard/patent/edit/:id") view=PatentEditPage />
                <Route path=path!("") view=|| view! { <Redirect path=LISTING_ROUTE /> } />
            </Routes>
        </Router>
    }
}
