//! Actions of the adoption client.
//!
//! User commands and I/O results share one enum so every feature reducer
//! sees every action. Results of requests carry the `epoch` of the session
//! that issued them.

use crate::error::AppError;
use crate::search::{FilterKind, SearchPatch};
use crate::state::{CatalogPage, UserProfile};
use gofetch_client::{Dog, DogId, Location};

/// Every input to the application reducer.
#[derive(Clone, Debug, PartialEq)]
pub enum AppAction {
    // ═══════════════════════════════════════════════════════════════════════
    // Session
    // ═══════════════════════════════════════════════════════════════════════
    /// Log in with a name and email.
    Login {
        /// Display name
        name: String,
        /// Email address
        email: String,
    },

    /// The service accepted the login.
    LoginSucceeded {
        /// Logged-in user
        user: UserProfile,
    },

    /// The login was rejected or failed.
    LoginFailed {
        /// Reason
        error: AppError,
    },

    /// End the session.
    Logout,

    /// The service ended the session.
    LogoutSucceeded,

    /// Logout failed; the session is still active.
    LogoutFailed {
        /// Reason
        error: AppError,
    },

    /// Load breed names for the filter panel.
    LoadBreeds,

    /// Breed names arrived.
    BreedsLoaded {
        /// Session that requested them
        epoch: u64,
        /// Breed names
        breeds: Vec<String>,
    },

    /// Breed names could not be loaded.
    BreedsFailed {
        /// Session that requested them
        epoch: u64,
        /// Reason
        error: AppError,
    },

    /// Hide the current toast.
    DismissToast,

    // ═══════════════════════════════════════════════════════════════════════
    // Search
    // ═══════════════════════════════════════════════════════════════════════
    /// Apply a raw parameter patch.
    UpdateSearch(SearchPatch),

    /// Switch filter mode.
    SelectFilter(FilterKind),

    /// Add or remove a breed from the filter.
    ToggleBreed(String),

    /// Zip code text area changed.
    SetZipInput(String),

    /// Minimum age field changed.
    SetAgeMinInput(String),

    /// Maximum age field changed.
    SetAgeMaxInput(String),

    /// Change the sort expression (`field:asc` / `field:desc`).
    SetSort(Option<String>),

    /// Go to a zero-based page.
    ChangePage(u32),

    /// Change the page length; returns to the first page.
    SetRowsPerPage(u32),

    // ═══════════════════════════════════════════════════════════════════════
    // Catalog
    // ═══════════════════════════════════════════════════════════════════════
    /// Fetch the current page again.
    RefreshCatalog,

    /// The debounce window of `generation` closed.
    DebounceElapsed {
        /// Search generation the timer belongs to
        generation: u64,
    },

    /// A fetch finished.
    CatalogLoaded {
        /// Session that issued the fetch
        epoch: u64,
        /// Search generation the fetch belongs to
        generation: u64,
        /// Fetched page
        page: CatalogPage,
    },

    /// A fetch failed.
    CatalogFailed {
        /// Session that issued the fetch
        epoch: u64,
        /// Search generation the fetch belongs to
        generation: u64,
        /// Reason
        error: AppError,
    },

    // ═══════════════════════════════════════════════════════════════════════
    // Favorites & match
    // ═══════════════════════════════════════════════════════════════════════
    /// Mark or unmark a dog as favorite.
    ToggleFavorite(DogId),

    /// Ask for a match among the favorites, or show the stored one.
    RequestMatch,

    /// The match chain finished.
    MatchResolved {
        /// Session that requested it
        epoch: u64,
        /// Matched dog
        dog: Dog,
        /// Location of the dog's zip code
        location: Option<Location>,
    },

    /// A step of the match chain failed.
    MatchFailed {
        /// Session that requested it
        epoch: u64,
        /// Reason
        error: AppError,
    },
}

impl AppAction {
    /// Whether this action reports the outcome of a login attempt.
    #[must_use]
    pub const fn is_login_outcome(&self) -> bool {
        matches!(self, Self::LoginSucceeded { .. } | Self::LoginFailed { .. })
    }

    /// Whether this action reports the outcome of a logout attempt.
    #[must_use]
    pub const fn is_logout_outcome(&self) -> bool {
        matches!(self, Self::LogoutSucceeded | Self::LogoutFailed { .. })
    }

    /// Whether this action settles the catalog fetch of `generation`.
    #[must_use]
    pub const fn settles_catalog(&self, generation: u64) -> bool {
        match self {
            Self::CatalogLoaded { generation: g, .. } | Self::CatalogFailed { generation: g, .. } => {
                *g == generation
            },
            _ => false,
        }
    }

    /// Whether this action reports the outcome of the match chain.
    #[must_use]
    pub const fn is_match_outcome(&self) -> bool {
        matches!(self, Self::MatchResolved { .. } | Self::MatchFailed { .. })
    }
}
