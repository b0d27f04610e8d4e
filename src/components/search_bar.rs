//! Search Bar Component

use leptos::prelude::*;

use crate::context::AppContext;

/// Filters the visible items by title; never hits the network
#[component]
pub fn SearchBar() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let state = ctx.state;

    view! {
        <form class="search-form" on:submit=|ev: web_sys::SubmitEvent| ev.prevent_default()>
            <input
                type="search"
                class="search-input"
                role="searchbox"
                placeholder="Search items"
                prop:value=move || state.with(|s| s.search().to_string())
                on:input=move |ev| ctx.controller().set_search(&event_target_value(&ev))
            />
        </form>
    }
}
