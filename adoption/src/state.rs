//! Application state.
//!
//! One [`AppState`] value is owned by the store. Favorites and the match
//! live here too, so every view reads the same instance.

use crate::error::AppError;
use crate::search::SearchState;
use gofetch_client::{Dog, DogId, Location};
use indexmap::IndexSet;

/// Label of the match button when no match is stored.
pub const FIND_MATCH_LABEL: &str = "Find my match";

/// Label of the match button once a match is stored.
pub const VIEW_MATCH_LABEL: &str = "View my match";

/// Root state of the adoption client.
#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
    /// Authentication status
    pub session: SessionState,
    /// Filters and paging
    pub search: SearchState,
    /// Displayed page and fetch cycle
    pub catalog: CatalogState,
    /// Breed names for the filter panel
    pub breeds: Vec<String>,
    /// Favorited dogs, in the order they were marked
    pub favorites: FavoritesSet,
    /// Match request lifecycle
    pub matching: MatchStatus,
    /// Message currently shown to the user
    pub toast: Option<Toast>,
    /// Incremented on every logout; results from older sessions are dropped
    pub session_epoch: u64,
}

impl AppState {
    /// Logged-out state with the given page length.
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            session: SessionState::default(),
            search: SearchState::new(page_size),
            catalog: CatalogState::default(),
            breeds: Vec::new(),
            favorites: FavoritesSet::default(),
            matching: MatchStatus::NotRequested,
            toast: None,
            session_epoch: 0,
        }
    }

    /// Text of the match button.
    #[must_use]
    pub const fn match_button_label(&self) -> &'static str {
        if self.matching.is_resolved() {
            VIEW_MATCH_LABEL
        } else {
            FIND_MATCH_LABEL
        }
    }

    /// Forget everything tied to the ended session.
    ///
    /// The catalog generation and the epoch counter survive; the epoch is
    /// advanced so late results from the old session are dropped.
    pub fn reset_after_logout(&mut self, page_size: u32) {
        let generation = self.catalog.generation;
        let epoch = self.session_epoch + 1;

        *self = Self::new(page_size);
        self.catalog.generation = generation;
        self.session_epoch = epoch;
    }

    /// Show a toast, replacing the current one.
    pub fn show(&mut self, toast: Toast) {
        self.toast = Some(toast);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(crate::search::DEFAULT_PAGE_SIZE)
    }
}

// ═══════════════════════════════════════════════════════════
// Session
// ═══════════════════════════════════════════════════════════

/// Who is logged in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserProfile {
    /// Display name
    pub name: String,
    /// Email address
    pub email: String,
}

/// Authentication status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Whether the service recognises our session cookie
    pub logged_in: bool,
    /// Current user
    pub user: Option<UserProfile>,
    /// Login or logout request in flight
    pub pending: bool,
    /// Inline error of the last login/logout attempt
    pub last_error: Option<AppError>,
}

// ═══════════════════════════════════════════════════════════
// Catalog
// ═══════════════════════════════════════════════════════════

/// Result of one search and fetch cycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogPage {
    /// Matches across all pages
    pub total: u64,
    /// Dogs on this page, in search ranking order
    pub dogs: Vec<Dog>,
}

/// How the last fetch cycle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Page replaced
    Success,
    /// Previous page kept
    Error,
}

/// Catalog fetch cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CatalogPhase {
    /// Nothing requested yet
    #[default]
    Idle,
    /// Waiting for the search to stop changing
    Debouncing,
    /// Request in flight
    Fetching,
    /// Last cycle finished
    Settled(FetchOutcome),
}

/// Displayed page and fetch bookkeeping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogState {
    /// Last successfully fetched page
    pub page: CatalogPage,
    /// Fetch cycle phase
    pub phase: CatalogPhase,
    /// Bumped on every search change; only the latest generation may settle
    pub generation: u64,
    /// Error of the last cycle, cleared on success
    pub last_error: Option<AppError>,
}

impl CatalogState {
    /// Whether a fetch is scheduled or running.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.phase, CatalogPhase::Debouncing | CatalogPhase::Fetching)
    }
}

// ═══════════════════════════════════════════════════════════
// Favorites & match
// ═══════════════════════════════════════════════════════════

/// Favorited dog ids in the order they were marked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FavoritesSet(IndexSet<DogId>);

impl FavoritesSet {
    /// Add `id` if absent, remove it if present. Returns whether `id` is now a favorite.
    pub fn toggle(&mut self, id: DogId) -> bool {
        if self.0.shift_remove(&id) {
            false
        } else {
            self.0.insert(id);
            true
        }
    }

    /// Whether `id` is a favorite.
    #[must_use]
    pub fn contains(&self, id: &DogId) -> bool {
        self.0.contains(id)
    }

    /// Number of favorites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no favorites.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in marking order.
    pub fn iter(&self) -> impl Iterator<Item = &DogId> {
        self.0.iter()
    }

    /// Owned copy of the ids in marking order.
    #[must_use]
    pub fn to_vec(&self) -> Vec<DogId> {
        self.0.iter().cloned().collect()
    }
}

impl FromIterator<DogId> for FavoritesSet {
    fn from_iter<I: IntoIterator<Item = DogId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Match request lifecycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum MatchStatus {
    /// No match requested in this session
    #[default]
    NotRequested,
    /// Match chain running
    Pending,
    /// Match found; never re-queried for this session
    Resolved {
        /// The matched dog
        dog: Dog,
        /// Where the dog is, if the service knows its zip code
        location: Option<Location>,
    },
    /// Match chain failed; may be retried
    Failed(AppError),
}

impl MatchStatus {
    /// Whether a match is stored.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved { .. })
    }

    /// The matched dog, if any.
    #[must_use]
    pub const fn dog(&self) -> Option<&Dog> {
        match self {
            Self::Resolved { dog, .. } => Some(dog),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Toasts
// ═══════════════════════════════════════════════════════════

/// Toast severity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// Neutral information
    Info,
    /// Something worked
    Success,
    /// Blocked before any request
    Warning,
    /// A request failed
    Error,
}

/// A short message for the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    /// How the message is styled
    pub severity: Severity,
    /// Text
    pub message: String,
}

impl Toast {
    /// Neutral toast.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    /// Success toast.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    /// Warning toast.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    /// Error toast.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_keeps_marking_order() {
        let mut favorites = FavoritesSet::default();

        assert!(favorites.toggle("b".into()));
        assert!(favorites.toggle("a".into()));
        assert!(favorites.toggle("c".into()));
        assert!(!favorites.toggle("a".into()));

        assert_eq!(favorites.to_vec(), vec![DogId::new("b"), DogId::new("c")]);
        assert!(!favorites.contains(&DogId::new("a")));
    }

    #[test]
    fn test_match_button_label() {
        let mut state = AppState::default();
        assert_eq!(state.match_button_label(), FIND_MATCH_LABEL);

        state.matching = MatchStatus::Pending;
        assert_eq!(state.match_button_label(), FIND_MATCH_LABEL);

        state.matching = MatchStatus::Resolved {
            dog: Dog {
                id: "id2".into(),
                img: String::new(),
                name: "Rex".into(),
                age: 2,
                zip_code: "10001".into(),
                breed: "Pug".into(),
            },
            location: None,
        };
        assert_eq!(state.match_button_label(), VIEW_MATCH_LABEL);
    }

    #[test]
    fn test_reset_after_logout_keeps_counters() {
        let mut state = AppState::new(50);
        state.session.logged_in = true;
        state.favorites.toggle("a".into());
        state.catalog.generation = 7;
        state.breeds = vec!["Pug".into()];

        state.reset_after_logout(25);

        assert!(!state.session.logged_in);
        assert!(state.favorites.is_empty());
        assert!(state.breeds.is_empty());
        assert_eq!(state.search.params.size, 25);
        assert_eq!(state.catalog.generation, 7);
        assert_eq!(state.session_epoch, 1);
    }
}
