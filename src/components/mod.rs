//! UI Components
//!
//! Screens and list widgets.

mod login_screen;
mod register_screen;
mod list_screen;
mod header;
mod new_item_form;
mod search_bar;
mod item_list;
mod item_row;
mod footer;

pub use login_screen::LoginScreen;
pub use register_screen::RegisterScreen;
pub use list_screen::ListScreen;
pub use header::Header;
pub use new_item_form::NewItemForm;
pub use search_bar::SearchBar;
pub use item_list::ItemList;
pub use item_row::ItemRow;
pub use footer::Footer;
