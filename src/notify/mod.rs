use crate::components::ui::{Alert, AlertDescription, AlertTone};
use icons::{Check, X};
use leptos::prelude::*;
use leptos_dom::helpers::set_timeout;
use leptos_router::NavigateOptions;
use std::time::Duration;
use strum::{AsRefStr, Display};

const TOAST_LIMIT: usize = 4;
const TOAST_TTL: Duration = Duration::from_millis(4_000);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, AsRefStr)]
pub(crate) enum NoticeLevel {
    Success,
    Error,
}

/// One user-facing message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Fire-and-forget message surface.
pub(crate) trait Notifier {
    fn notify(&self, notice: Notice);
}

/// Imperative route change.
pub(crate) trait Navigator {
    fn navigate(&self, path: &str);
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Toast {
    pub id: u64,
    pub notice: Notice,
}

/// Append a toast, dropping the oldest ones past `TOAST_LIMIT`.
pub(crate) fn push_toast(toasts: &mut Vec<Toast>, toast: Toast) {
    toasts.push(toast);
    if toasts.len() > TOAST_LIMIT {
        let overflow = toasts.len() - TOAST_LIMIT;
        toasts.drain(..overflow);
    }
}

/// App-wide toast stack, provided as context by `App`.
#[derive(Clone, Copy)]
pub(crate) struct ToastQueue {
    toasts: RwSignal<Vec<Toast>>,
    next_id: RwSignal<u64>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(vec![]),
            next_id: RwSignal::new(0),
        }
    }

    pub fn dismiss(&self, id: u64) {
        self.toasts.update(|ts| ts.retain(|t| t.id != id));
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, notice: Notice) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id.wrapping_add(1));
        self.toasts.update(|ts| push_toast(ts, Toast { id, notice }));

        let queue = *self;
        set_timeout(move || queue.dismiss(id), TOAST_TTL);
    }
}

/// [`Navigator`] backed by `leptos_router`'s `use_navigate`.
pub(crate) struct RouterNavigator<F: 'static> {
    navigate: StoredValue<F>,
}

impl<F> RouterNavigator<F>
where
    F: Fn(&str, NavigateOptions) + Send + Sync + 'static,
{
    pub fn new(navigate: StoredValue<F>) -> Self {
        Self { navigate }
    }
}

impl<F> Navigator for RouterNavigator<F>
where
    F: Fn(&str, NavigateOptions) + Send + Sync + 'static,
{
    fn navigate(&self, path: &str) {
        // Disposed when the owning page is gone; nothing to navigate from then.
        let _ = self
            .navigate
            .try_with_value(|nav| nav(path, NavigateOptions::default()));
    }
}

#[component]
pub fn Toaster() -> impl IntoView {
    let queue = expect_context::<ToastQueue>();

    view! {
        <div
            data-name="Toaster"
            class="pointer-events-none fixed right-4 top-4 z-50 flex w-full max-w-sm flex-col gap-2"
            aria-live="polite"
        >
            <For
                each=move || queue.toasts.get()
                key=|t| t.id
                children=move |t| {
                    let id = t.id;
                    let level = t.notice.level;
                    let tone = match level {
                        NoticeLevel::Success => AlertTone::Success,
                        NoticeLevel::Error => AlertTone::Destructive,
                    };
                    view! {
                        <Alert tone=tone class="pointer-events-auto flex items-start gap-2 shadow-md">
                            <Show when=move || level == NoticeLevel::Success fallback=|| ().into_view()>
                                <Check class="size-4 shrink-0" />
                            </Show>
                            <AlertDescription class="flex-1">{t.notice.message}</AlertDescription>
                            <button
                                type="button"
                                class="text-muted-foreground hover:text-foreground"
                                aria-label="Fermer"
                                on:click=move |_| queue.dismiss(id)
                            >
                                <X class="size-4" />
                            </button>
                        </Alert>
                    }
                }
            />
        </div>
    }
}
