//! Configuration management for the adoption client.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::search::{DEFAULT_PAGE_SIZE, ROWS_PER_PAGE_OPTIONS};
use gofetch_client::{ClientConfig, DEFAULT_API_URL};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The API URL is not an http(s) URL.
    #[error("Invalid API URL: {0}")]
    InvalidApiUrl(String),

    /// Page size is not one of the offered options.
    #[error("Page size {0} is not one of 25, 50 or 100")]
    InvalidPageSize(u32),

    /// A duration that must be positive is zero.
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Remote service configuration
    pub api: ApiConfig,
    /// Catalog behaviour
    pub catalog: CatalogConfig,
    /// Credentials used by the headless driver
    pub user: UserConfig,
}

/// Remote service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the adoption service
    pub url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

/// Catalog behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Quiet period before a search change is fetched, in milliseconds
    pub debounce_ms: u64,
    /// Initial page length
    pub page_size: u32,
}

/// Credentials used by the headless driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserConfig {
    /// Display name sent to `/auth/login`
    pub name: String,
    /// Email sent to `/auth/login`
    pub email: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `GOFETCH_API_URL` | [`DEFAULT_API_URL`] |
    /// | `GOFETCH_REQUEST_TIMEOUT_SECS` | 30 |
    /// | `GOFETCH_DEBOUNCE_MS` | 500 |
    /// | `GOFETCH_PAGE_SIZE` | 25 |
    /// | `GOFETCH_USER_NAME` | `GoFetch Demo` |
    /// | `GOFETCH_USER_EMAIL` | `demo@gofetch.dev` |
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api: ApiConfig {
                url: lookup("GOFETCH_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
                request_timeout_secs: lookup("GOFETCH_REQUEST_TIMEOUT_SECS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            },
            catalog: CatalogConfig {
                debounce_ms: lookup("GOFETCH_DEBOUNCE_MS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(500),
                page_size: lookup("GOFETCH_PAGE_SIZE")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_PAGE_SIZE),
            },
            user: UserConfig {
                name: lookup("GOFETCH_USER_NAME").unwrap_or_else(|| "GoFetch Demo".to_string()),
                email: lookup("GOFETCH_USER_EMAIL")
                    .unwrap_or_else(|| "demo@gofetch.dev".to_string()),
            },
        }
    }

    /// Check values that defaults cannot repair.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] for a non-http URL, a page size outside
    /// the rows-per-page options, a zero request timeout or a zero debounce.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api.url.starts_with("http://") || self.api.url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(self.api.url.clone()));
        }
        if !ROWS_PER_PAGE_OPTIONS.contains(&self.catalog.page_size) {
            return Err(ConfigError::InvalidPageSize(self.catalog.page_size));
        }
        if self.api.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroDuration("GOFETCH_REQUEST_TIMEOUT_SECS"));
        }
        if self.catalog.debounce_ms == 0 {
            return Err(ConfigError::ZeroDuration("GOFETCH_DEBOUNCE_MS"));
        }
        Ok(())
    }

    /// Debounce window of the catalog.
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.catalog.debounce_ms)
    }

    /// HTTP client settings.
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.api.url.clone())
            .with_timeout(Duration::from_secs(self.api.request_timeout_secs))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
