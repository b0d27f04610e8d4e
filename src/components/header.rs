//! Header Component
//!
//! Editable list title, signed-in username and logout.

use leptos::prelude::*;

use crate::context::AppContext;

#[component]
pub fn Header() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let state = ctx.state;

    let title = Memo::new(move |_| state.with(|s| s.title().to_string()));
    let editing = Memo::new(move |_| state.with(|s| s.is_editing_title()));
    let username = Memo::new(move |_| state.with(|s| s.session().username().to_string()));
    let (draft, set_draft) = signal(String::new());
    let (saving, set_saving) = signal(false);

    let start_edit = move |_| {
        set_draft.set(title.get_untracked());
        set_saving.set(false);
        ctx.controller().begin_title_edit();
    };

    let cancel_edit = move || {
        set_draft.set(title.get_untracked());
        ctx.controller().cancel_title_edit();
    };

    // Enter and focus loss both save; one rename in flight at a time
    let save = move || {
        if !editing.get_untracked() || saving.get_untracked() {
            return;
        }
        set_saving.set(true);
        let text = draft.get_untracked();
        ctx.run(move |controller| async move {
            controller.rename_list(&text).await;
            set_saving.try_set(false);
        });
    };

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        save();
    };

    // Keeps focus in the input so the buttons don't trigger a blur save
    let keep_focus = |ev: web_sys::MouseEvent| ev.prevent_default();

    view! {
        <header class="header">
            <div class="header-content">
                <Show
                    when=move || editing.get()
                    fallback=move || view! {
                        <div class="title-container">
                            <h1 class="heading">{move || title.get()}</h1>
                            <button
                                class="title-edit-button"
                                title="Edit title"
                                on:click=start_edit
                            >
                                "✎"
                            </button>
                        </div>
                    }
                >
                    <form class="title-edit-form" on:submit=submit>
                        <input
                            type="text"
                            class="title-edit-input"
                            autofocus=true
                            prop:value=move || draft.get()
                            on:input=move |ev| set_draft.set(event_target_value(&ev))
                            on:blur=move |_| save()
                            on:keydown=move |ev: web_sys::KeyboardEvent| {
                                if ev.key() == "Escape" {
                                    cancel_edit();
                                }
                            }
                        />
                        <div class="title-edit-buttons">
                            <button
                                type="submit"
                                class="title-confirm-button"
                                on:mousedown=keep_focus
                            >
                                "✓"
                            </button>
                            <button
                                type="button"
                                class="title-cancel-button"
                                on:mousedown=keep_focus
                                on:click=move |_| cancel_edit()
                            >
                                "✕"
                            </button>
                        </div>
                    </form>
                </Show>

                <div class="user-info">
                    <div class="username-display">
                        <span class="username-text">{move || username.get()}</span>
                    </div>
                    <button
                        class="logout-button"
                        title="Logout"
                        on:click=move |_| ctx.controller().logout()
                    >
                        "Logout"
                    </button>
                </div>
            </div>
        </header>
    }
}
