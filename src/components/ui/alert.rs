use leptos::prelude::*;
use leptos_ui::clx;
use strum::AsRefStr;
use tw_merge::tw_merge;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr)]
pub enum AlertTone {
    #[default]
    Neutral,
    Success,
    Destructive,
}

impl AlertTone {
    fn class(self) -> &'static str {
        match self {
            Self::Neutral => "bg-card text-card-foreground",
            Self::Success => "border-success/30 bg-card text-success",
            Self::Destructive => "border-destructive/30 bg-card text-destructive",
        }
    }
}

#[component]
pub fn Alert(
    children: Children,
    #[prop(optional, into)] class: String,
    #[prop(optional)] tone: AlertTone,
) -> impl IntoView {
    let merged_class = tw_merge!(
        "relative w-full rounded-lg border px-4 py-3 text-sm [&>svg]:text-current",
        tone.class(),
        class
    );

    view! {
        <div data-name="Alert" data-tone=tone.as_ref().to_string() role="alert" class=merged_class>
            {children()}
        </div>
    }
}

mod components {
    use super::*;
    clx! {AlertDescription, p, "text-sm leading-relaxed"}
}

pub use components::*;
