//! Client Configuration
//!
//! A browser bundle has no runtime environment, so overrides are baked in at
//! compile time (`TASKNEST_API_URL`, `TASKNEST_LOG`) or parsed from JSON.

use serde::Deserialize;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Where the API lives and how loud the client logs
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClientConfig {
    pub api_base_url: String,
    pub log_level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden by compile-time environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(url) = option_env!("TASKNEST_API_URL") {
            config.api_base_url = url.to_string();
        }
        if let Some(level) = option_env!("TASKNEST_LOG") {
            config.log_level = level.to_string();
        }
        config.normalized()
    }

    /// Parse a JSON override; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::normalized)
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self.normalized()
    }

    /// Parsed log level, falling back to `Info` on unknown names
    pub fn log_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }

    fn normalized(mut self) -> Self {
        let trimmed = self.api_base_url.trim().trim_end_matches('/').to_string();
        self.api_base_url = trimmed;
        self
    }
}
