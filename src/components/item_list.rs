//! Item List Component
//!
//! Renders the search-filtered items.

use leptos::prelude::*;

use crate::components::ItemRow;
use crate::context::AppContext;

#[component]
pub fn ItemList() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let state = ctx.state;

    let visible = Memo::new(move |_| state.with(|s| s.visible_items()));

    view! {
        <main class="list-container">
            <Show
                when=move || visible.with(|items| !items.is_empty())
                fallback=|| view! { <p class="empty-list">"Your list is empty."</p> }
            >
                <ul class="item-list">
                    // Keyed on the whole record so toggles re-render the row
                    <For
                        each=move || visible.get()
                        key=|item| (item.id, item.title.clone(), item.checked, item.favourite)
                        children=move |item| view! { <ItemRow item=item /> }
                    />
                </ul>
            </Show>
        </main>
    }
}
