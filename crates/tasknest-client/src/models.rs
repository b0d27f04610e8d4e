//! API Models
//!
//! Data structures matching the TaskNest HTTP API.

use serde::{Deserialize, Serialize};

/// Title shown when the profile carries none
pub const DEFAULT_LIST_TITLE: &str = "list";

pub type ItemId = i64;

/// To-do entry (matches backend)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(default)]
    pub favourite: bool,
}

impl Item {
    /// Full record with `checked` flipped
    pub fn with_checked_toggled(&self) -> Item {
        Item { checked: !self.checked, ..self.clone() }
    }

    /// Full record with `favourite` flipped
    pub fn with_favourite_toggled(&self) -> Item {
        Item { favourite: !self.favourite, ..self.clone() }
    }

    pub fn with_title(&self, title: impl Into<String>) -> Item {
        Item { title: title.into(), ..self.clone() }
    }

    /// Case-insensitive substring match used by the search box
    pub fn matches(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(&query.to_lowercase())
    }
}

/// Body of `POST /api/items`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewItem {
    pub title: String,
    pub checked: bool,
    pub favourite: bool,
}

impl NewItem {
    pub fn titled(title: impl Into<String>) -> Self {
        Self { title: title.into(), checked: false, favourite: false }
    }
}

/// User profile (matches backend)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub list_title: Option<String>,
}

impl Profile {
    pub fn title_or_default(&self) -> String {
        match self.list_title.as_deref() {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => DEFAULT_LIST_TITLE.to_string(),
        }
    }
}

/// Successful login/register response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthGrant {
    pub token: String,
    pub username: String,
}

// ========================
// Request Bodies
// ========================

#[derive(Debug, Serialize)]
pub(crate) struct LoginBody<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegisterBody<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListTitleBody<'a> {
    pub list_title: &'a str,
}
