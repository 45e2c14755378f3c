use leptos::prelude::*;
use tw_merge::*;

#[component]
pub fn Label(
    #[prop(optional, into)] class: String,
    #[prop(optional, into)] html_for: String,
    children: Children,
) -> impl IntoView {
    let class = tw_merge!(
        "mb-1 block text-sm font-medium leading-none select-none",
        class
    );

    view! {
        <label class=class r#for=html_for>
            {children()}
        </label>
    }
}

/// Muted helper text under a field.
#[component]
pub fn FieldHint(#[prop(optional, into)] class: String, children: Children) -> impl IntoView {
    let class = tw_merge!("mt-2 text-sm text-muted-foreground", class);

    view! { <p class=class>{children()}</p> }
}
