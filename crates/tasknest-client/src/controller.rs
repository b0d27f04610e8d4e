//! View Controller
//!
//! Drives user actions through the auth gateway and list repository and
//! applies the results to the view state. State is reached through a
//! [`StateHandle`] and never borrowed across an `.await`, so the same flows
//! run against a `RefCell` natively and against a reactive signal in the UI.

use std::cell::RefCell;

use crate::auth::{AuthGateway, LoginForm, RegistrationForm};
use crate::models::{Item, ItemId, NewItem};
use crate::repository::ListRepository;
use crate::session::{KeyValueStore, SessionStore};
use crate::state::{RequestTicket, ViewState};
use crate::transport::Transport;

/// Access to the view state and the durable session mirror.
///
/// Both methods return `None` once the state has been torn down; results
/// still in flight at that point are dropped.
pub trait StateHandle {
    type Storage: KeyValueStore;

    fn read<R>(&self, f: impl FnOnce(&ViewState) -> R) -> Option<R>;

    fn write<R>(
        &self,
        f: impl FnOnce(&mut ViewState, &SessionStore<Self::Storage>) -> R,
    ) -> Option<R>;
}

/// `RefCell`-backed handle for native use and tests
#[derive(Debug)]
pub struct LocalState<S> {
    state: RefCell<ViewState>,
    store: SessionStore<S>,
}

impl<S: KeyValueStore> LocalState<S> {
    pub fn new(storage: S) -> Self {
        Self { state: RefCell::new(ViewState::new()), store: SessionStore::new(storage) }
    }

    pub fn snapshot(&self) -> ViewState {
        self.state.borrow().clone()
    }
}

impl<S: KeyValueStore> StateHandle for LocalState<S> {
    type Storage = S;

    fn read<R>(&self, f: impl FnOnce(&ViewState) -> R) -> Option<R> {
        Some(f(&self.state.borrow()))
    }

    fn write<R>(&self, f: impl FnOnce(&mut ViewState, &SessionStore<S>) -> R) -> Option<R> {
        Some(f(&mut self.state.borrow_mut(), &self.store))
    }
}

#[derive(Debug, Clone)]
pub struct ViewController<T, H> {
    auth: AuthGateway<T>,
    repo: ListRepository<T>,
    state: H,
}

impl<T: Transport + Clone, H: StateHandle> ViewController<T, H> {
    pub fn new(transport: T, state: H) -> Self {
        Self {
            auth: AuthGateway::new(transport.clone()),
            repo: ListRepository::new(transport),
            state,
        }
    }

    pub fn state(&self) -> &H {
        &self.state
    }

    // ========================
    // Session lifecycle
    // ========================

    /// Resume a stored session: validate its token, then load the list
    pub async fn start(&self) {
        let restored = self.state.write(|state, store| state.restore(store.load()));
        let Some(ticket) = restored.flatten() else { return };
        let outcome = self.auth.validate(ticket.token()).await;
        let valid =
            self.state.write(|state, store| state.apply_validation(store, &ticket, outcome));
        if valid.unwrap_or(false) {
            self.refresh().await;
        }
    }

    pub async fn login(&self, form: LoginForm) {
        let Some(attempt) = self.state.write(|state, _| state.begin_auth()).flatten() else {
            return;
        };
        let outcome = self.auth.login(&form).await;
        let ticket = self.state.write(|state, store| state.finish_auth(store, attempt, outcome));
        if ticket.flatten().is_some() {
            self.refresh().await;
        }
    }

    pub async fn register(&self, form: RegistrationForm) {
        let Some(attempt) = self.state.write(|state, _| state.begin_auth()).flatten() else {
            return;
        };
        let outcome = self.auth.register(&form).await;
        let ticket = self.state.write(|state, store| state.finish_auth(store, attempt, outcome));
        if ticket.flatten().is_some() {
            self.refresh().await;
        }
    }

    pub fn logout(&self) {
        self.state.write(|state, store| state.logout(store));
    }

    pub fn show_register(&self, show: bool) {
        self.state.write(|state, _| state.show_register(show));
    }

    // ========================
    // List operations
    // ========================

    /// Items and profile, as after every sign-in
    pub async fn refresh(&self) {
        let Some(ticket) = self.ticket() else { return };
        self.reload_items(&ticket).await;
        if !self.state.read(|state| state.is_current(&ticket)).unwrap_or(false) {
            return;
        }
        let profile = self.repo.fetch_profile(ticket.token()).await;
        self.state.write(|state, store| state.apply_profile(store, &ticket, profile));
    }

    pub async fn add_item(&self, title: &str) {
        if title.trim().is_empty() {
            return;
        }
        let Some(ticket) = self.ticket() else { return };
        let result = self.repo.create_item(ticket.token(), &NewItem::titled(title)).await;
        self.state.write(|state, store| state.apply_created(store, &ticket, result));
    }

    pub async fn toggle_checked(&self, id: ItemId) {
        self.toggle(id, Item::with_checked_toggled).await;
    }

    pub async fn toggle_favourite(&self, id: ItemId) {
        self.toggle(id, Item::with_favourite_toggled).await;
    }

    pub async fn edit_item(&self, id: ItemId, title: &str) {
        let title = title.trim();
        if title.is_empty() {
            return;
        }
        let Some((ticket, item)) = self.ticket_for(id) else { return };
        let updated = item.with_title(title);
        let result = self.repo.update_item(ticket.token(), &updated).await;
        self.state.write(|state, store| state.apply_edited(store, &ticket, updated, result));
    }

    pub async fn delete_item(&self, id: ItemId) {
        let Some((ticket, _)) = self.ticket_for(id) else { return };
        let result = self.repo.delete_item(ticket.token(), id).await;
        self.state.write(|state, store| state.apply_deleted(store, &ticket, id, result));
    }

    /// Blank titles just leave edit mode
    pub async fn rename_list(&self, title: &str) {
        let title = title.trim().to_string();
        if title.is_empty() {
            self.cancel_title_edit();
            return;
        }
        let Some(ticket) = self.ticket() else { return };
        let result = self.repo.rename_list(ticket.token(), &title).await;
        self.state.write(|state, store| state.apply_renamed(store, &ticket, title, result));
    }

    pub fn begin_title_edit(&self) {
        self.state.write(|state, _| state.begin_title_edit());
    }

    pub fn cancel_title_edit(&self) {
        self.state.write(|state, _| state.cancel_title_edit());
    }

    pub fn set_search(&self, search: &str) {
        self.state.write(|state, _| state.set_search(search));
    }

    // ========================
    // Helpers
    // ========================

    fn ticket(&self) -> Option<RequestTicket> {
        self.state.read(|state| state.ticket()).flatten()
    }

    fn ticket_for(&self, id: ItemId) -> Option<(RequestTicket, Item)> {
        let found = self
            .state
            .read(|state| Some((state.ticket()?, state.find_item(id)?.clone())))
            .flatten();
        if found.is_none() {
            log::warn!("item {} not in local list", id);
        }
        found
    }

    async fn toggle(&self, id: ItemId, flip: fn(&Item) -> Item) {
        let Some((ticket, item)) = self.ticket_for(id) else { return };
        let result = self.repo.update_item(ticket.token(), &flip(&item)).await;
        let refetch = self.state.write(|state, store| state.apply_toggled(store, &ticket, result));
        if refetch.unwrap_or(false) {
            self.reload_items(&ticket).await;
        }
    }

    async fn reload_items(&self, ticket: &RequestTicket) {
        let items = self.repo.fetch_items(ticket.token()).await;
        self.state.write(|state, store| state.apply_items(store, ticket, items));
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::session::MemoryStore;
    use crate::state::Screen;
    use crate::test_support::FakeApi;

    type TestController = ViewController<Rc<FakeApi>, LocalState<MemoryStore>>;

    fn controller(api: &Rc<FakeApi>, storage: MemoryStore) -> TestController {
        ViewController::new(api.clone(), LocalState::new(storage))
    }

    async fn signed_in(api: &Rc<FakeApi>) -> (TestController, MemoryStore) {
        let storage = MemoryStore::new();
        let controller = controller(api, storage.clone());
        controller.login(LoginForm::new("alice", "secret1")).await;
        assert_eq!(controller.state().snapshot().screen(), Screen::Authenticated);
        (controller, storage)
    }

    fn titles(controller: &TestController) -> Vec<String> {
        controller.state().snapshot().items().iter().map(|i| i.title.clone()).collect()
    }

    #[tokio::test]
    async fn test_start_without_stored_token_stays_on_login() {
        let api = FakeApi::new();
        let controller = controller(&api, MemoryStore::new());
        controller.start().await;
        assert_eq!(
            controller.state().snapshot().screen(),
            Screen::Unauthenticated { show_register: false }
        );
        assert_eq!(api.request_count(), 0);
    }

    #[tokio::test]
    async fn test_start_with_rejected_token_clears_storage() {
        let api = FakeApi::new();
        let storage = MemoryStore::with_session("expired", "alice");
        let controller = controller(&api, storage.clone());
        controller.start().await;

        let state = controller.state().snapshot();
        assert_eq!(state.screen(), Screen::Unauthenticated { show_register: false });
        assert!(!state.session().is_authenticated());
        assert!(storage.is_empty());
        assert_eq!(api.request_count(), 1);
    }

    #[tokio::test]
    async fn test_start_with_valid_token_loads_list() {
        let api = FakeApi::new();
        let token = api.issue_token("alice");
        api.seed_items(&["Buy milk", "Walk dog"]);
        api.set_list_title("Weekend");
        let controller = controller(&api, MemoryStore::with_session(&token, "alice"));
        controller.start().await;

        let state = controller.state().snapshot();
        assert_eq!(state.screen(), Screen::Authenticated);
        assert_eq!(state.session().username(), "alice");
        assert_eq!(state.item_count(), 2);
        assert_eq!(state.title(), "Weekend");
    }

    #[tokio::test]
    async fn test_login_persists_session_and_fetches() {
        let api = FakeApi::new();
        api.seed_items(&["Buy milk"]);
        let (controller, storage) = signed_in(&api).await;

        let state = controller.state().snapshot();
        assert_eq!(state.session().username(), "alice");
        assert_eq!(storage.get("username").as_deref(), Some("alice"));
        assert_eq!(storage.get("token").as_deref(), Some(state.session().token()));
        assert_eq!(titles(&controller), vec!["Buy milk"]);
        assert_eq!(state.title(), "list");
    }

    #[tokio::test]
    async fn test_failed_login_shows_error() {
        let api = FakeApi::new();
        let controller = controller(&api, MemoryStore::new());
        controller.login(LoginForm::new("alice", "wrong")).await;

        let state = controller.state().snapshot();
        assert_eq!(state.screen(), Screen::Unauthenticated { show_register: false });
        assert_eq!(state.auth_form().error.as_deref(), Some("Invalid username or password"));
        assert!(!state.auth_form().loading);
    }

    #[tokio::test]
    async fn test_login_without_token_stays_signed_out() {
        let api = FakeApi::new();
        let storage = MemoryStore::new();
        let controller = controller(&api, storage.clone());
        api.respond_next(200, r#"{"token":"","username":"alice"}"#);
        controller.login(LoginForm::new("alice", "secret1")).await;

        let state = controller.state().snapshot();
        assert_eq!(state.screen(), Screen::Unauthenticated { show_register: false });
        assert!(!state.session().is_authenticated());
        assert_eq!(state.auth_form().error.as_deref(), Some("Login failed"));
        assert!(!state.auth_form().loading);
        assert!(storage.is_empty());
        assert_eq!(api.request_count(), 1);
    }

    #[tokio::test]
    async fn test_blank_login_never_hits_network() {
        let api = FakeApi::new();
        let controller = controller(&api, MemoryStore::new());
        controller.login(LoginForm::new("  ", "secret1")).await;
        assert_eq!(
            controller.state().snapshot().auth_form().error.as_deref(),
            Some("Please fill in all fields")
        );
        assert_eq!(api.request_count(), 0);
    }

    #[tokio::test]
    async fn test_register_signs_in() {
        let api = FakeApi::new();
        let storage = MemoryStore::new();
        let controller = controller(&api, storage.clone());
        controller.show_register(true);
        controller
            .register(RegistrationForm {
                username: "dave".into(),
                email: "dave@example.com".into(),
                password: "hunter22".into(),
                confirm_password: "hunter22".into(),
            })
            .await;

        let state = controller.state().snapshot();
        assert_eq!(state.screen(), Screen::Authenticated);
        assert_eq!(storage.get("username").as_deref(), Some("dave"));
    }

    #[tokio::test]
    async fn test_add_item_appends_one() {
        let api = FakeApi::new();
        api.seed_items(&["Walk dog"]);
        let (controller, _) = signed_in(&api).await;

        controller.add_item("Buy milk").await;
        let state = controller.state().snapshot();
        assert_eq!(state.item_count(), 2);
        let added = state.items().iter().find(|i| i.title == "Buy milk").unwrap();
        assert!(!added.checked);
        assert!(!added.favourite);
    }

    #[tokio::test]
    async fn test_add_blank_item_is_noop() {
        let api = FakeApi::new();
        let (controller, _) = signed_in(&api).await;
        let before = api.request_count();
        controller.add_item("   ").await;
        assert_eq!(api.request_count(), before);
    }

    #[tokio::test]
    async fn test_toggle_checked_refetches_with_other_fields_unchanged() {
        let api = FakeApi::new();
        api.seed_items(&["Buy milk"]);
        let (controller, _) = signed_in(&api).await;
        let original = controller.state().snapshot().items()[0].clone();

        controller.toggle_checked(original.id).await;

        let after = controller.state().snapshot().items()[0].clone();
        assert_eq!(after.checked, !original.checked);
        assert_eq!(after.favourite, original.favourite);
        assert_eq!(after.title, original.title);
        assert_eq!(after.id, original.id);
        assert_eq!(api.last_request().unwrap().path, "/api/items");
    }

    #[tokio::test]
    async fn test_toggle_favourite() {
        let api = FakeApi::new();
        api.seed_items(&["Buy milk"]);
        let (controller, _) = signed_in(&api).await;
        let id = controller.state().snapshot().items()[0].id;

        controller.toggle_favourite(id).await;
        assert!(controller.state().snapshot().items()[0].favourite);
        assert!(api.items()[0].favourite);
    }

    #[tokio::test]
    async fn test_edit_updates_locally_without_refetch() {
        let api = FakeApi::new();
        api.seed_items(&["Buy milk"]);
        let (controller, _) = signed_in(&api).await;
        let id = controller.state().snapshot().items()[0].id;

        controller.edit_item(id, "  Buy oat milk ").await;
        assert_eq!(titles(&controller), vec!["Buy oat milk"]);
        assert_eq!(api.last_request().unwrap().path, format!("/api/items/{}", id));
    }

    #[tokio::test]
    async fn test_unknown_item_is_noop() {
        let api = FakeApi::new();
        let (controller, _) = signed_in(&api).await;
        let before = api.request_count();
        controller.toggle_checked(404).await;
        controller.edit_item(404, "x").await;
        controller.delete_item(404).await;
        assert_eq!(api.request_count(), before);
    }

    #[tokio::test]
    async fn test_delete_removes_locally() {
        let api = FakeApi::new();
        api.seed_items(&["Buy milk", "Walk dog"]);
        let (controller, _) = signed_in(&api).await;
        let id = controller.state().snapshot().items()[0].id;

        controller.delete_item(id).await;
        assert_eq!(titles(&controller), vec!["Walk dog"]);
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_item() {
        let api = FakeApi::new();
        api.seed_items(&["Buy milk"]);
        let (controller, _) = signed_in(&api).await;
        let id = controller.state().snapshot().items()[0].id;

        api.respond_next(500, "Error: boom");
        controller.delete_item(id).await;
        assert_eq!(titles(&controller), vec!["Buy milk"]);
        assert_eq!(controller.state().snapshot().screen(), Screen::Authenticated);
    }

    #[tokio::test]
    async fn test_rename_list() {
        let api = FakeApi::new();
        let (controller, _) = signed_in(&api).await;
        controller.begin_title_edit();
        controller.rename_list(" Groceries ").await;

        let state = controller.state().snapshot();
        assert_eq!(state.title(), "Groceries");
        assert!(!state.is_editing_title());
        assert_eq!(api.list_title().as_deref(), Some("Groceries"));
    }

    #[tokio::test]
    async fn test_blank_rename_leaves_edit_mode_without_request() {
        let api = FakeApi::new();
        let (controller, _) = signed_in(&api).await;
        controller.begin_title_edit();
        let before = api.request_count();
        controller.rename_list("   ").await;

        let state = controller.state().snapshot();
        assert!(!state.is_editing_title());
        assert_eq!(state.title(), "list");
        assert_eq!(api.request_count(), before);
    }

    #[tokio::test]
    async fn test_expired_session_forces_logout() {
        let api = FakeApi::new();
        api.seed_items(&["Buy milk"]);
        api.set_list_title("Chores");
        let (controller, storage) = signed_in(&api).await;
        assert_eq!(controller.state().snapshot().title(), "Chores");

        api.revoke_tokens();
        controller.add_item("Walk dog").await;

        let state = controller.state().snapshot();
        assert_eq!(state.screen(), Screen::Unauthenticated { show_register: false });
        assert!(state.items().is_empty());
        assert_eq!(state.title(), "list");
        assert!(!state.session().is_authenticated());
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_logout() {
        let api = FakeApi::new();
        api.seed_items(&["Buy milk"]);
        let (controller, storage) = signed_in(&api).await;
        controller.logout();

        let state = controller.state().snapshot();
        assert_eq!(state.screen(), Screen::Unauthenticated { show_register: false });
        assert!(state.items().is_empty());
        assert!(storage.is_empty());
        assert!(controller.state().read(|s| s.ticket()).flatten().is_none());
    }

    #[tokio::test]
    async fn test_search_is_local() {
        let api = FakeApi::new();
        api.seed_items(&["Buy milk", "Walk dog"]);
        let (controller, _) = signed_in(&api).await;
        let before = api.request_count();
        controller.set_search("milk");

        let visible: Vec<_> = controller
            .state()
            .read(|s| s.visible_items())
            .unwrap_or_default()
            .into_iter()
            .map(|i| i.title)
            .collect();
        assert_eq!(visible, vec!["Buy milk"]);
        assert_eq!(api.request_count(), before);
    }

    #[tokio::test]
    async fn test_failed_toggle_keeps_local_state() {
        let api = FakeApi::new();
        api.seed_items(&["Buy milk"]);
        let (controller, _) = signed_in(&api).await;
        let before = controller.state().snapshot().items()[0].clone();
        let requests = api.request_count();

        api.respond_next(500, "Error: boom");
        controller.toggle_checked(before.id).await;

        let state = controller.state().snapshot();
        assert_eq!(state.items(), &[before]);
        assert_eq!(state.screen(), Screen::Authenticated);
        // No refetch after a failed update
        assert_eq!(api.request_count(), requests + 1);
    }

    /// Handle whose state is gone, as after the UI root is disposed
    struct Disposed;

    impl StateHandle for Disposed {
        type Storage = MemoryStore;

        fn read<R>(&self, _: impl FnOnce(&ViewState) -> R) -> Option<R> {
            None
        }

        fn write<R>(
            &self,
            _: impl FnOnce(&mut ViewState, &SessionStore<MemoryStore>) -> R,
        ) -> Option<R> {
            None
        }
    }

    #[tokio::test]
    async fn test_disposed_state_drops_every_action() {
        let api = FakeApi::new();
        api.seed_items(&["Buy milk"]);
        let controller = ViewController::new(api.clone(), Disposed);

        controller.start().await;
        controller.login(LoginForm::new("alice", "secret1")).await;
        controller.add_item("Walk dog").await;
        controller.toggle_checked(1).await;
        controller.rename_list("Weekend").await;
        controller.logout();
        controller.set_search("milk");

        assert_eq!(api.request_count(), 0);
        assert_eq!(api.items().len(), 1);
    }
}
