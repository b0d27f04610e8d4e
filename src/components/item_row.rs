//! Item Row Component
//!
//! One to-do entry: check, favourite, inline title edit, delete.

use leptos::prelude::*;
use tasknest_client::Item;

use crate::context::AppContext;

/// A single item row in the list
#[component]
pub fn ItemRow(item: Item) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let id = item.id;
    let checked = item.checked;
    let favourite = item.favourite;
    let title = item.title.clone();

    let (editing, set_editing) = signal(false);
    let (draft, set_draft) = signal(item.title);

    let stored_title = StoredValue::new(title.clone());
    let cancel_edit = move || {
        set_draft.set(stored_title.get_value());
        set_editing.set(false);
    };

    // The box always shows the stored value; a successful toggle re-keys the row
    let toggle_checked = move |ev: web_sys::Event| {
        event_target::<web_sys::HtmlInputElement>(&ev).set_checked(checked);
        ctx.run(move |controller| async move { controller.toggle_checked(id).await });
    };

    let toggle_favourite = move |_| {
        ctx.run(move |controller| async move { controller.toggle_favourite(id).await });
    };

    let delete = move |_| {
        ctx.run(move |controller| async move { controller.delete_item(id).await });
    };

    let save_edit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        set_editing.set(false);
        let text = draft.get_untracked();
        ctx.run(move |controller| async move { controller.edit_item(id, &text).await });
    };

    view! {
        <li class=if checked { "item checked" } else { "item" }>
            <input type="checkbox" prop:checked=checked on:change=toggle_checked />

            <Show
                when=move || editing.get()
                fallback=move || {
                    let title = title.clone();
                    view! {
                        <label
                            class="item-title"
                            title="Double-click to edit"
                            on:dblclick=move |_| set_editing.set(true)
                        >
                            {title}
                        </label>
                    }
                }
            >
                <form class="item-edit-form" on:submit=save_edit>
                    <input
                        type="text"
                        class="item-edit-input"
                        autofocus=true
                        prop:value=move || draft.get()
                        on:input=move |ev| set_draft.set(event_target_value(&ev))
                        on:keydown=move |ev: web_sys::KeyboardEvent| {
                            if ev.key() == "Escape" {
                                cancel_edit();
                            }
                        }
                    />
                </form>
            </Show>

            <button
                class=if favourite { "favourite-button active" } else { "favourite-button" }
                title=if favourite { "Remove from favourites" } else { "Add to favourites" }
                on:click=toggle_favourite
            >
                {if favourite { "★" } else { "☆" }}
            </button>
            <button class="delete-button" title="Delete" on:click=delete>"×"</button>
        </li>
    }
}
