//! Session Store
//!
//! Mirrors the token and username to durable key-value storage so a reload
//! can resume the session. Validity is decided by the server only.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::StorageError;

pub const TOKEN_KEY: &str = "token";
pub const USERNAME_KEY: &str = "username";

/// Authenticated identity of this client instance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: String,
    username: String,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self { token: token.into(), username: username.into() }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }
}

/// Durable string storage (browser `localStorage`, memory in tests)
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store; clones share the same entries
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(token: &str, username: &str) -> Self {
        let store = Self::new();
        {
            let mut entries = store.entries.borrow_mut();
            entries.insert(TOKEN_KEY.to_string(), token.to_string());
            entries.insert(USERNAME_KEY.to_string(), username.to_string());
        }
        store
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Session persistence over a [`KeyValueStore`].
///
/// Writes are best-effort: failures are logged and the in-memory transition
/// proceeds regardless.
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Session found in storage, or an anonymous one
    pub fn load(&self) -> Session {
        match self.storage.get(TOKEN_KEY) {
            Some(token) if !token.is_empty() => {
                let username = self.storage.get(USERNAME_KEY).unwrap_or_default();
                Session::authenticated(token, username)
            }
            _ => Session::anonymous(),
        }
    }

    pub fn save(&self, token: &str, username: &str) -> Session {
        for (key, value) in [(TOKEN_KEY, token), (USERNAME_KEY, username)] {
            if let Err(e) = self.storage.set(key, value) {
                log::warn!("failed to persist {}: {}", key, e);
            }
        }
        Session::authenticated(token, username)
    }

    pub fn clear(&self) -> Session {
        for key in [TOKEN_KEY, USERNAME_KEY] {
            if let Err(e) = self.storage.remove(key) {
                log::warn!("failed to remove {}: {}", key, e);
            }
        }
        Session::anonymous()
    }
}
