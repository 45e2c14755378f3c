use leptos::prelude::*;
use tw_merge::tw_merge;
use wasm_bindgen::JsCast;

/// Attribute carrying an option's id alongside its display text.
const DATA_ID_ATTR: &str = "data-id";

/// Selected `(text, data-id)` pairs of a `<select multiple>`, in DOM order.
fn selected_pairs(select: &web_sys::HtmlSelectElement) -> Vec<(String, Option<String>)> {
    let options = select.selected_options();
    (0..options.length())
        .filter_map(|i| options.item(i))
        .map(|el| {
            let text = el.text_content().unwrap_or_default();
            let id = el.get_attribute(DATA_ID_ATTR);
            (text, id)
        })
        .collect()
}

/// Native multi-select. Children are `<option>` elements; each change reports
/// the full selection.
#[component]
pub fn MultiSelect(
    children: Children,
    #[prop(optional, into)] class: String,
    #[prop(optional, into)] id: String,
    on_change: Callback<Vec<(String, Option<String>)>>,
) -> impl IntoView {
    let merged_class = tw_merge!(
        "border-input w-full min-h-32 rounded-md border bg-transparent p-2 text-sm shadow-xs outline-none focus-visible:border-ring focus-visible:ring-2 focus-visible:ring-ring/50",
        class
    );

    let on_select = move |ev: web_sys::Event| {
        if let Some(select) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlSelectElement>().ok())
        {
            on_change.run(selected_pairs(&select));
        }
    };

    view! {
        <select data-name="MultiSelect" multiple=true id=id class=merged_class on:change=on_select>
            {children()}
        </select>
    }
}
