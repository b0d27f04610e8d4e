//! Login Screen Component
//!
//! Username/password form with a switch to registration.

use leptos::prelude::*;
use tasknest_client::LoginForm;

use crate::context::AppContext;

#[component]
pub fn LoginScreen() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let state = ctx.state;

    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());

    let loading = Memo::new(move |_| state.with(|s| s.auth_form().loading));
    let error = Memo::new(move |_| state.with(|s| s.auth_form().error.clone()));

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = LoginForm::new(username.get_untracked(), password.get_untracked());
        ctx.run(move |controller| async move { controller.login(form).await });
    };

    view! {
        <div class="auth-container">
            <div class="auth-box">
                <div class="auth-header">
                    <h1 class="auth-title">"TaskNest"</h1>
                    <p class="auth-subtitle">"Sign in to your account"</p>
                </div>

                <form class="auth-form" on:submit=submit>
                    {move || {
                        error.get().map(|message| view! { <div class="auth-error">{message}</div> })
                    }}

                    <div class="auth-input-group">
                        <label for="username" class="auth-label">"Username"</label>
                        <input
                            id="username"
                            type="text"
                            class="auth-input"
                            placeholder="Enter your username"
                            autofocus=true
                            prop:value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            disabled=move || loading.get()
                        />
                    </div>

                    <div class="auth-input-group">
                        <label for="password" class="auth-label">"Password"</label>
                        <input
                            id="password"
                            type="password"
                            class="auth-input"
                            placeholder="Enter your password"
                            prop:value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            disabled=move || loading.get()
                        />
                    </div>

                    <button type="submit" class="auth-button" disabled=move || loading.get()>
                        {move || if loading.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>

                <div class="auth-footer">
                    <p class="auth-switch-text">
                        "Don't have an account? "
                        <button
                            class="auth-switch-button"
                            disabled=move || loading.get()
                            on:click=move |_| ctx.controller().show_register(true)
                        >
                            "Sign Up"
                        </button>
                    </p>
                </div>
            </div>
        </div>
    }
}
