//! Browser Storage
//!
//! `localStorage` adapter for the session mirror, and the signal-backed
//! state handle the controller drives.

use leptos::prelude::*;
use tasknest_client::{KeyValueStore, SessionStore, StateHandle, StorageError, ViewState};

/// `window.localStorage`, if the browser exposes it
pub struct BrowserStorage {
    storage: Option<web_sys::Storage>,
}

impl BrowserStorage {
    pub fn local() -> Self {
        let storage = web_sys::window().and_then(|window| window.local_storage().ok().flatten());
        Self { storage }
    }

    fn require(&self) -> Result<&web_sys::Storage, StorageError> {
        self.storage
            .as_ref()
            .ok_or_else(|| StorageError("localStorage unavailable".to_string()))
    }
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.require()?
            .set_item(key, value)
            .map_err(|e| StorageError(format!("{:?}", e)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.require()?
            .remove_item(key)
            .map_err(|e| StorageError(format!("{:?}", e)))
    }
}

/// View state held in a signal so components re-render on every transition
#[derive(Clone, Copy)]
pub struct SignalState {
    state: RwSignal<ViewState>,
}

impl SignalState {
    pub fn new(state: RwSignal<ViewState>) -> Self {
        Self { state }
    }
}

impl StateHandle for SignalState {
    type Storage = BrowserStorage;

    fn read<R>(&self, f: impl FnOnce(&ViewState) -> R) -> Option<R> {
        self.state.try_with_untracked(f)
    }

    /// `None` once the owning root is disposed
    fn write<R>(
        &self,
        f: impl FnOnce(&mut ViewState, &SessionStore<BrowserStorage>) -> R,
    ) -> Option<R> {
        let store = SessionStore::new(BrowserStorage::local());
        self.state.try_update(|state| f(state, &store))
    }
}
