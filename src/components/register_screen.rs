//! Register Screen Component
//!
//! Account creation form. Field rules are checked by the core before any
//! request is sent.

use leptos::prelude::*;
use tasknest_client::RegistrationForm;

use crate::context::AppContext;

/// Labelled text input bound to a signal
#[component]
fn Field(
    id: &'static str,
    label: &'static str,
    input_type: &'static str,
    placeholder: &'static str,
    value: RwSignal<String>,
    disabled: Memo<bool>,
    #[prop(optional)] autofocus: bool,
) -> impl IntoView {
    view! {
        <div class="auth-input-group">
            <label for=id class="auth-label">{label}</label>
            <input
                id=id
                type=input_type
                class="auth-input"
                placeholder=placeholder
                autofocus=autofocus
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
                disabled=move || disabled.get()
            />
        </div>
    }
}

#[component]
pub fn RegisterScreen() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let state = ctx.state;

    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm_password = RwSignal::new(String::new());

    let loading = Memo::new(move |_| state.with(|s| s.auth_form().loading));
    let error = Memo::new(move |_| state.with(|s| s.auth_form().error.clone()));

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let form = RegistrationForm {
            username: username.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
        };
        ctx.run(move |controller| async move { controller.register(form).await });
    };

    view! {
        <div class="auth-container">
            <div class="auth-box">
                <div class="auth-header">
                    <h1 class="auth-title">"TaskNest"</h1>
                    <p class="auth-subtitle">"Create your account"</p>
                </div>

                <form class="auth-form" on:submit=submit>
                    {move || {
                        error.get().map(|message| view! { <div class="auth-error">{message}</div> })
                    }}

                    <Field
                        id="username"
                        label="Username"
                        input_type="text"
                        placeholder="Choose a username"
                        value=username
                        disabled=loading
                        autofocus=true
                    />
                    <Field
                        id="email"
                        label="Email"
                        input_type="email"
                        placeholder="Enter your email"
                        value=email
                        disabled=loading
                    />
                    <Field
                        id="password"
                        label="Password"
                        input_type="password"
                        placeholder="Choose a password (min 6 characters)"
                        value=password
                        disabled=loading
                    />
                    <Field
                        id="confirmPassword"
                        label="Confirm Password"
                        input_type="password"
                        placeholder="Re-enter your password"
                        value=confirm_password
                        disabled=loading
                    />

                    <button type="submit" class="auth-button" disabled=move || loading.get()>
                        {move || if loading.get() { "Creating account..." } else { "Sign Up" }}
                    </button>
                </form>

                <div class="auth-footer">
                    <p class="auth-switch-text">
                        "Already have an account? "
                        <button
                            class="auth-switch-button"
                            disabled=move || loading.get()
                            on:click=move |_| ctx.controller().show_register(false)
                        >
                            "Sign In"
                        </button>
                    </p>
                </div>
            </div>
        </div>
    }
}
