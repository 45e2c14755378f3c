use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Card, div, "bg-card text-card-foreground flex flex-col gap-6 rounded-xl border py-6 shadow-sm"}
    clx! {CardHeader, div, "flex flex-col gap-1.5 px-6"}
    clx! {CardTitle, h1, "text-xl font-semibold leading-none"}
    clx! {CardDescription, p, "text-muted-foreground text-sm"}
    clx! {CardContent, div, "px-6"}
    clx! {CardList, ul, "flex flex-col divide-y"}
    clx! {CardItem, li, "flex flex-col gap-1 py-3"}
}

pub use components::*;
