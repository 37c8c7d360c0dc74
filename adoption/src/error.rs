//! Error taxonomy for the adoption client.
//!
//! Every failure ends up in [`AppState`](crate::state::AppState) as one of
//! these values; none of them abort the process.

use gofetch_client::ApiError;
use thiserror::Error;

const SESSION_EXPIRED: &str = "your session has expired, please log in again";

/// Result type alias for adoption operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// User-facing application errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AppError {
    // ═══════════════════════════════════════════════════════════
    // Remote failures
    // ═══════════════════════════════════════════════════════════

    /// Login or logout failed; the session is left unchanged.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Catalog fetch failed; the last good page stays visible.
    #[error("Could not load dogs: {0}")]
    Search(String),

    /// A step of the match chain failed; the whole chain can be retried.
    #[error("Could not find a match: {0}")]
    Match(String),

    /// Breed list could not be loaded.
    #[error("Could not load breeds: {0}")]
    Breeds(String),

    // ═══════════════════════════════════════════════════════════
    // Local failures
    // ═══════════════════════════════════════════════════════════

    /// Input rejected before any request was made.
    #[error("{0}")]
    Validation(String),
}

impl AppError {
    /// Wrap an API failure during login/logout.
    #[must_use]
    pub fn auth(error: &ApiError) -> Self {
        Self::Auth(error.to_string())
    }

    /// Wrap an API failure during a catalog fetch.
    #[must_use]
    pub fn search(error: &ApiError) -> Self {
        if error.is_unauthorized() {
            return Self::Search(SESSION_EXPIRED.to_string());
        }
        Self::Search(error.to_string())
    }

    /// Wrap an API failure during the match chain.
    #[must_use]
    pub fn matching(error: &ApiError) -> Self {
        Self::Match(error.to_string())
    }

    /// Whether this error was raised locally, before any request.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
