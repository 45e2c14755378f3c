use crate::components::ui::{
    Alert, AlertDescription, AlertTone, Card, CardContent, CardDescription, CardHeader, CardItem,
    CardList, CardTitle, Spinner,
};
use crate::models::Brevet;
use crate::state::AppContext;
use leptos::logging::error;
use leptos::prelude::*;
use leptos::task::spawn_local;

pub(crate) fn edit_href(id: &str) -> String {
    format!("/dashboard/patent/edit/{}", urlencoding::encode(id))
}

#[component]
pub fn PatentListPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();

    let brevets: RwSignal<Vec<Brevet>> = RwSignal::new(vec![]);
    let loading: RwSignal<bool> = RwSignal::new(false);
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let request_id: RwSignal<u64> = RwSignal::new(0);

    Effect::new(move |_| {
        let api_client = app_state.0.api_client.get();

        let req_id = request_id.get_untracked().saturating_add(1);
        request_id.set(req_id);
        loading.set(true);
        error.set(None);

        spawn_local(async move {
            let result = api_client.list_brevets().await;

            // Ignore stale responses (and responses after unmount).
            if request_id.try_get_untracked() != Some(req_id) {
                return;
            }

            match result {
                Ok(list) => brevets.set(list),
                Err(e) => {
                    error!("Erreur lors de la récupération des brevets: {e}");
                    error.set(Some("Erreur lors de la récupération des brevets".to_string()));
                }
            }
            loading.set(false);
        });
    });

    view! {
        <div class="mx-auto w-full max-w-3xl px-4 py-8">
            <Card>
                <CardHeader>
                    <CardTitle>"Brevets"</CardTitle>
                    <CardDescription>
                        {move || format!("{} au total", brevets.get().len())}
                    </CardDescription>
                </CardHeader>

                <CardContent class="space-y-4">
                    <Show when=move || error.get().is_some() fallback=|| ().into_view()>
                        <Alert tone=AlertTone::Destructive>
                            <AlertDescription>{move || error.get().unwrap_or_default()}</AlertDescription>
                        </Alert>
                    </Show>

                    <Show
                        when=move || !brevets.get().is_empty()
                        fallback=move || view! {
                            <div class="flex items-center gap-2 text-sm text-muted-foreground">
                                <Show when=move || loading.get() fallback=|| view! { "Aucun brevet." }>
                                    <Spinner />
                                    "Chargement…"
                                </Show>
                            </div>
                        }
                    >
                        <CardList>
                            <For
                                each=move || brevets.get()
                                key=|b| b.id.clone()
                                children=move |b: Brevet| {
                                    let href = edit_href(&b.id);
                                    view! {
                                        <CardItem>
                                            <div class="flex items-start justify-between gap-4">
                                                <div class="min-w-0 space-y-1">
                                                    <div class="truncate text-sm font-medium">{b.title}</div>
                                                    <div class="text-xs text-muted-foreground">{b.author}</div>
                                                    <div class="text-xs text-muted-foreground">{b.doi}</div>
                                                </div>
                                                <a
                                                    href=href
                                                    class="inline-flex h-8 shrink-0 items-center rounded-md border px-3 text-sm font-medium hover:bg-accent hover:text-accent-foreground"
                                                >
                                                    "Modifier"
                                                </a>
                                            </div>
                                        </CardItem>
                                    }
                                }
                            />
                        </CardList>
                    </Show>
                </CardContent>
            </Card>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_href_encodes_id() {
        assert_eq!(edit_href("12"), "/dashboard/patent/edit/12");
        assert_eq!(edit_href("a b"), "/dashboard/patent/edit/a%20b");
    }
}
