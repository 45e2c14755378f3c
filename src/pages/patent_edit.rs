use crate::api::ApiClient;
use crate::authors::selection_from_options;
use crate::components::ui::{
    Alert, AlertDescription, AlertTone, Button, Card, CardContent, CardHeader, CardTitle,
    FieldHint, Input, Label, MultiSelect, Spinner,
};
use crate::models::Member;
use crate::notify::{RouterNavigator, ToastQueue};
use crate::patent::{EditSession, PatentEditor};
use crate::state::AppContext;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_params};
use leptos_router::params::Params;
use std::rc::Rc;

#[derive(Params, PartialEq, Clone, Debug)]
pub struct PatentRouteParams {
    pub id: Option<String>,
}

/// Row key for the author picker. `id` alone may be blank for several members.
fn roster_key(m: &Member) -> (String, String) {
    (m.id.clone(), m.user_id.clone())
}

#[component]
pub fn PatentEditPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let toasts = expect_context::<ToastQueue>();
    let params = use_params::<PatentRouteParams>();
    let navigate = StoredValue::new(use_navigate());

    let session: RwSignal<EditSession> = RwSignal::new(EditSession::default());

    // Params are reactive; read tracked in effects, untracked in event handlers.
    let brevet_id = move || params.get().ok().and_then(|p| p.id).unwrap_or_default();
    let brevet_id_untracked = move || {
        params
            .get_untracked()
            .ok()
            .and_then(|p| p.id)
            .unwrap_or_default()
    };

    let make_editor = move |api_client: ApiClient| {
        PatentEditor::new(
            api_client,
            session,
            Rc::new(toasts),
            Rc::new(RouterNavigator::new(navigate)),
        )
    };

    // Runs on mount and again whenever the token or the route id changes.
    Effect::new(move |_| {
        let api_client = app_state.0.api_client.get();
        let id = brevet_id();
        let editor = make_editor(api_client);
        spawn_local(async move {
            editor.load(&id).await;
        });
    });

    on_cleanup(move || {
        session.try_update(EditSession::teardown);
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let editor = make_editor(app_state.0.api_client.get_untracked());
        let id = brevet_id_untracked();
        spawn_local(async move {
            editor.submit(&id).await;
        });
    };

    let title = Signal::derive(move || session.with(|s| s.title().to_string()));
    let doi = Signal::derive(move || session.with(|s| s.doi().to_string()));
    let on_title = Callback::new(move |v: String| session.update(|s| s.set_title(v)));
    let on_doi = Callback::new(move |v: String| session.update(|s| s.set_doi(v)));
    let on_authors = Callback::new(move |picked: Vec<(String, Option<String>)>| {
        session.update(|s| s.select_authors(selection_from_options(picked)));
    });

    let submitting = move || session.with(|s| s.is_submitting());
    let error = move || session.with(|s| s.error().map(str::to_string));
    let selected_line = move || session.with(|s| s.selected_authors().join(", "));

    view! {
        <div class="mx-auto w-full max-w-2xl px-4 py-8">
            <Card>
                <CardHeader>
                    <CardTitle>"Modifier un Brevet"</CardTitle>
                </CardHeader>

                <CardContent class="space-y-4">
                    <Show when=move || error().is_some() fallback=|| ().into_view()>
                        <Alert tone=AlertTone::Destructive>
                            <AlertDescription>{move || error().unwrap_or_default()}</AlertDescription>
                        </Alert>
                    </Show>

                    <Show when=move || session.with(|s| s.is_loading()) fallback=|| ().into_view()>
                        <div class="flex items-center gap-2 text-sm text-muted-foreground">
                            <Spinner />
                            "Chargement…"
                        </div>
                    </Show>

                    <Show when=move || !selected_line().is_empty() fallback=|| ().into_view()>
                        <div class="text-sm">
                            <strong>"Auteurs sélectionnés : "</strong>
                            {selected_line}
                        </div>
                    </Show>

                    <form class="space-y-4" on:submit=on_submit>
                        <div>
                            <Label html_for="brevet-title">"Titre"</Label>
                            <Input id="brevet-title" value=title on_value=on_title required=true />
                        </div>

                        <div>
                            <Label html_for="brevet-authors">"Auteur(s)"</Label>
                            <MultiSelect id="brevet-authors" on_change=on_authors>
                                <For
                                    each=move || session.with(|s| s.roster().to_vec())
                                    key=roster_key
                                    children=move |m: Member| {
                                        let Member { user_id, name, .. } = m;
                                        let data_id = user_id.clone();
                                        let value = name.clone();
                                        view! {
                                            <option
                                                value=value
                                                data-id=data_id
                                                prop:selected=move || session.with(|s| s.is_selected(&user_id))
                                            >
                                                {name}
                                            </option>
                                        }
                                    }
                                />
                            </MultiSelect>
                            <FieldHint>
                                "Pour sélectionner plusieurs auteurs, maintenez la touche "
                                <strong>"Ctrl"</strong>
                                " (ou "
                                <strong>"Cmd"</strong>
                                " sur Mac) enfoncée tout en cliquant sur les noms souhaités."
                            </FieldHint>
                        </div>

                        <div>
                            <Label html_for="brevet-doi">"DOI"</Label>
                            <Input id="brevet-doi" value=doi on_value=on_doi />
                        </div>

                        <Button class="w-full" attr:disabled=submitting>
                            <Show when=submitting fallback=|| ().into_view()>
                                <Spinner label="Enregistrement" />
                            </Show>
                            {move || if submitting() { "Enregistrement…" } else { "Mettre à jour" }}
                        </Button>
                    </form>
                </CardContent>
            </Card>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(id: &str, user_id: &str) -> Member {
        Member {
            id: id.to_string(),
            user_id: user_id.to_string(),
            name: "N".to_string(),
        }
    }

    #[test]
    fn test_roster_key_distinguishes_members_without_id() {
        assert_ne!(roster_key(&member("", "u1")), roster_key(&member("", "u2")));
        assert_eq!(roster_key(&member("3", "u1")), ("3".to_string(), "u1".to_string()));
    }
}
