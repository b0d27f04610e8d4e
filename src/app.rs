//! TaskNest Frontend App
//!
//! Root component: picks the screen from the view state.

use leptos::prelude::*;
use tasknest_client::{ClientConfig, ReqwestTransport, Screen, ViewController, ViewState};

use crate::components::{ListScreen, LoginScreen, RegisterScreen};
use crate::context::AppContext;
use crate::storage::SignalState;

#[component]
pub fn App(config: ClientConfig) -> impl IntoView {
    let state = RwSignal::new(ViewState::new());
    let controller = ViewController::new(ReqwestTransport::new(&config), SignalState::new(state));

    // Provide context to all children
    let ctx = AppContext::new(state, controller);
    provide_context(ctx);

    // Resume a stored session, if any
    ctx.run(|controller| async move { controller.start().await });

    // Only re-render the screen when the variant changes
    let screen = Memo::new(move |_| state.with(|s| s.screen()));

    view! {
        {move || match screen.get() {
            Screen::Validating => view! {
                <div class="auth-container">
                    <p class="auth-subtitle">"Checking session..."</p>
                </div>
            }.into_any(),
            Screen::Unauthenticated { show_register: false } => {
                view! { <LoginScreen /> }.into_any()
            }
            Screen::Unauthenticated { show_register: true } => {
                view! { <RegisterScreen /> }.into_any()
            }
            Screen::Authenticated => view! { <ListScreen /> }.into_any(),
        }}
    }
}
