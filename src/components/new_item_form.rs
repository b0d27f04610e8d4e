//! New Item Form Component
//!
//! Adds an item and shows how many are still unchecked.

use leptos::prelude::*;

use crate::context::AppContext;

#[component]
pub fn NewItemForm() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let state = ctx.state;

    let (new_title, set_new_title) = signal(String::new());
    let active_count = Memo::new(move |_| state.with(|s| s.active_count()));

    let add_item = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let title = new_title.get_untracked();
        if title.trim().is_empty() {
            return;
        }
        set_new_title.set(String::new());
        ctx.run(move |controller| async move { controller.add_item(&title).await });
    };

    view! {
        <form class="add-form" on:submit=add_item>
            <input
                type="text"
                class="add-input"
                placeholder="Add item"
                autofocus=true
                prop:value=move || new_title.get()
                on:input=move |ev| set_new_title.set(event_target_value(&ev))
            />
            <button type="submit" class="add-button">"Add"</button>
            <span class="active-count">
                {move || format!("{} active", active_count.get())}
            </span>
        </form>
    }
}
