//! Footer Component

use leptos::prelude::*;

use crate::context::AppContext;

#[component]
pub fn Footer() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");
    let state = ctx.state;
    let item_count = Memo::new(move |_| state.with(|s| s.item_count()));

    view! {
        <footer class="footer">
            <p>
                {move || {
                    let count = item_count.get();
                    format!("{} List {}", count, if count == 1 { "item" } else { "items" })
                }}
            </p>
        </footer>
    }
}
