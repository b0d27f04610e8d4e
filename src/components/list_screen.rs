//! List Screen Component
//!
//! Authenticated layout: header, add/search row, items, footer.

use leptos::prelude::*;

use crate::components::{Footer, Header, ItemList, NewItemForm, SearchBar};

#[component]
pub fn ListScreen() -> impl IntoView {
    view! {
        <div class="container">
            <Header />
            <div class="add-search-container">
                <NewItemForm />
                <SearchBar />
            </div>
            <ItemList />
            <Footer />
        </div>
    }
}
