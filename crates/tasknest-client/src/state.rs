//! View State
//!
//! Screen state machine plus the cached list data. Every network result is
//! applied through a ticket carrying the generation it was issued under;
//! session transitions bump the generation so late results are dropped.

use crate::error::{AuthError, RepoError, RepoResult};
use crate::models::{AuthGrant, Item, ItemId, Profile, DEFAULT_LIST_TITLE};
use crate::session::{KeyValueStore, Session, SessionStore};

/// Which top-level screen is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Stored token is being checked; nothing decisive rendered yet
    Validating,
    Unauthenticated { show_register: bool },
    Authenticated,
}

/// Login/register form status
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthForm {
    pub loading: bool,
    pub error: Option<String>,
}

/// Captured before a protected call, checked when its result arrives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
    token: String,
}

impl RequestTicket {
    pub fn token(&self) -> &str {
        &self.token
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    screen: Screen,
    session: Session,
    items: Vec<Item>,
    title: String,
    search: String,
    editing_title: bool,
    auth_form: AuthForm,
    generation: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            screen: Screen::Unauthenticated { show_register: false },
            session: Session::anonymous(),
            items: Vec::new(),
            title: DEFAULT_LIST_TITLE.to_string(),
            search: String::new(),
            editing_title: false,
            auth_form: AuthForm::default(),
            generation: 0,
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Accessors
    // ========================

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn is_editing_title(&self) -> bool {
        self.editing_title
    }

    pub fn auth_form(&self) -> &AuthForm {
        &self.auth_form
    }

    pub fn find_item(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    // ========================
    // Derived values
    // ========================

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Unchecked items
    pub fn active_count(&self) -> usize {
        self.items.iter().filter(|item| !item.checked).count()
    }

    /// Items whose title contains the search text, any case
    pub fn visible_items(&self) -> Vec<Item> {
        self.items.iter().filter(|item| item.matches(&self.search)).cloned().collect()
    }

    // ========================
    // Local transitions
    // ========================

    /// Startup: adopt the stored session. Returns a ticket for validating it.
    pub fn restore(&mut self, session: Session) -> Option<RequestTicket> {
        if !session.is_authenticated() {
            return None;
        }
        self.session = session;
        self.screen = Screen::Validating;
        self.ticket()
    }

    pub fn show_register(&mut self, show: bool) {
        if let Screen::Unauthenticated { .. } = self.screen {
            if !self.auth_form.loading {
                self.screen = Screen::Unauthenticated { show_register: show };
                self.auth_form.error = None;
            }
        }
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    pub fn begin_title_edit(&mut self) {
        if self.screen == Screen::Authenticated {
            self.editing_title = true;
        }
    }

    pub fn cancel_title_edit(&mut self) {
        self.editing_title = false;
    }

    /// Ticket for a protected call, if a session token is held
    pub fn ticket(&self) -> Option<RequestTicket> {
        if !self.session.is_authenticated() {
            return None;
        }
        Some(RequestTicket { generation: self.generation, token: self.session.token().to_string() })
    }

    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        ticket.generation == self.generation && self.session.token() == ticket.token
    }

    /// Explicit or forced logout: session and list data back to defaults
    pub fn logout<S: KeyValueStore>(&mut self, store: &SessionStore<S>) {
        self.session = store.clear();
        self.screen = Screen::Unauthenticated { show_register: false };
        self.items.clear();
        self.title = DEFAULT_LIST_TITLE.to_string();
        self.editing_title = false;
        self.auth_form = AuthForm::default();
        self.generation += 1;
    }

    // ========================
    // Auth results
    // ========================

    /// Mark the auth form busy. `None` while a submission is in flight.
    pub fn begin_auth(&mut self) -> Option<u64> {
        if self.auth_form.loading || !matches!(self.screen, Screen::Unauthenticated { .. }) {
            return None;
        }
        self.auth_form = AuthForm { loading: true, error: None };
        Some(self.generation)
    }

    /// Apply a login/register outcome. Returns a ticket for the initial fetch
    /// when the session was established.
    pub fn finish_auth<S: KeyValueStore>(
        &mut self,
        store: &SessionStore<S>,
        attempt: u64,
        outcome: Result<AuthGrant, AuthError>,
    ) -> Option<RequestTicket> {
        if attempt != self.generation {
            log::debug!("dropping auth result from generation {}", attempt);
            return None;
        }
        match outcome {
            Ok(grant) => {
                self.session = store.save(&grant.token, &grant.username);
                self.screen = Screen::Authenticated;
                self.items.clear();
                self.title = DEFAULT_LIST_TITLE.to_string();
                self.editing_title = false;
                self.auth_form = AuthForm::default();
                self.generation += 1;
                self.ticket()
            }
            Err(e) => {
                self.auth_form = AuthForm { loading: false, error: Some(e.to_string()) };
                None
            }
        }
    }

    /// Apply the startup validation outcome; `true` when authenticated
    pub fn apply_validation<S: KeyValueStore>(
        &mut self,
        store: &SessionStore<S>,
        ticket: &RequestTicket,
        outcome: Result<(), AuthError>,
    ) -> bool {
        if !self.is_current(ticket) || self.screen != Screen::Validating {
            return false;
        }
        match outcome {
            Ok(()) => {
                self.screen = Screen::Authenticated;
                true
            }
            Err(e) => {
                log::info!("stored session rejected: {}", e);
                self.logout(store);
                false
            }
        }
    }

    // ========================
    // List results
    // ========================

    pub fn apply_items<S: KeyValueStore>(
        &mut self,
        store: &SessionStore<S>,
        ticket: &RequestTicket,
        result: RepoResult<Vec<Item>>,
    ) -> bool {
        self.accept(store, ticket, result, "fetching items")
            .map(|items| self.items = items)
            .is_some()
    }

    pub fn apply_profile<S: KeyValueStore>(
        &mut self,
        store: &SessionStore<S>,
        ticket: &RequestTicket,
        result: RepoResult<Profile>,
    ) -> bool {
        self.accept(store, ticket, result, "fetching user profile")
            .map(|profile| self.title = profile.title_or_default())
            .is_some()
    }

    pub fn apply_created<S: KeyValueStore>(
        &mut self,
        store: &SessionStore<S>,
        ticket: &RequestTicket,
        result: RepoResult<Item>,
    ) -> bool {
        self.accept(store, ticket, result, "saving item")
            .map(|item| self.items.push(item))
            .is_some()
    }

    /// Toggle result; `true` means the list should be re-fetched
    pub fn apply_toggled<S: KeyValueStore>(
        &mut self,
        store: &SessionStore<S>,
        ticket: &RequestTicket,
        result: RepoResult<()>,
    ) -> bool {
        self.accept(store, ticket, result, "updating item").is_some()
    }

    /// Title edit: the sent record replaces the local one, no re-fetch
    pub fn apply_edited<S: KeyValueStore>(
        &mut self,
        store: &SessionStore<S>,
        ticket: &RequestTicket,
        updated: Item,
        result: RepoResult<()>,
    ) -> bool {
        if self.accept(store, ticket, result, "editing item").is_none() {
            return false;
        }
        if let Some(slot) = self.items.iter_mut().find(|item| item.id == updated.id) {
            *slot = updated;
        }
        true
    }

    pub fn apply_deleted<S: KeyValueStore>(
        &mut self,
        store: &SessionStore<S>,
        ticket: &RequestTicket,
        id: ItemId,
        result: RepoResult<()>,
    ) -> bool {
        if self.accept(store, ticket, result, "deleting item").is_none() {
            return false;
        }
        self.items.retain(|item| item.id != id);
        true
    }

    pub fn apply_renamed<S: KeyValueStore>(
        &mut self,
        store: &SessionStore<S>,
        ticket: &RequestTicket,
        title: String,
        result: RepoResult<()>,
    ) -> bool {
        if self.accept(store, ticket, result, "updating title").is_none() {
            return false;
        }
        self.title = title;
        self.editing_title = false;
        true
    }

    /// Gatekeeper for protected results: stale tickets are dropped,
    /// `Unauthorized` forces logout, other failures leave state untouched.
    fn accept<S: KeyValueStore, T>(
        &mut self,
        store: &SessionStore<S>,
        ticket: &RequestTicket,
        result: RepoResult<T>,
        action: &str,
    ) -> Option<T> {
        if !self.is_current(ticket) {
            log::debug!("dropping stale result while {}", action);
            return None;
        }
        match result {
            Ok(value) => Some(value),
            Err(RepoError::Unauthorized) => {
                log::warn!("session expired while {}", action);
                self.logout(store);
                None
            }
            Err(RepoError::Api(e)) => {
                log::error!("error {}: {}", action, e);
                None
            }
        }
    }
}
