//! Search and catalog reducer.
//!
//! Owns the debounce/refetch cycle. Every change to the search parameters
//! bumps the catalog generation and (re)starts a cancellable timer; when the
//! timer of the current generation fires, the page is fetched. Results are
//! applied only if they belong to the current generation and session.
//!
//! ```text
//! Idle/Settled ──change──▶ Debouncing ──timer──▶ Fetching ──▶ Settled(Success|Error)
//!                              ▲   │
//!                              └───┘ change restarts the timer
//! ```

use crate::actions::AppAction;
use crate::effects::{fetch_catalog, CATALOG_EFFECT};
use crate::environment::{AppEnvironment, DogApi};
use crate::error::AppError;
use crate::search::{
    digits_only, is_valid_sort, parse_age, parse_zip_codes, FilterKind, SearchPatch,
    ROWS_PER_PAGE_OPTIONS,
};
use crate::state::{AppState, CatalogPhase, FetchOutcome, Toast};
use gofetch_core::effect::Effect;
use gofetch_core::reducer::Reducer;
use gofetch_core::{async_effect, delay, smallvec, SmallVec};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Search and catalog reducer.
#[derive(Debug, Clone)]
pub struct CatalogReducer<A> {
    _phantom: std::marker::PhantomData<A>,
}

impl<A> CatalogReducer<A> {
    /// Create a new catalog reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<A> Default for CatalogReducer<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Start a new debounce window for the current parameters.
///
/// Nothing is scheduled while logged out; the parameters are kept and
/// fetched once a session starts.
fn schedule_fetch<A: DogApi>(
    state: &mut AppState,
    env: &AppEnvironment<A>,
) -> SmallVec<[Effect<AppAction>; 4]> {
    if !state.session.logged_in {
        tracing::debug!("Search changed while logged out; fetch deferred");
        return SmallVec::new();
    }

    state.catalog.generation += 1;
    state.catalog.phase = CatalogPhase::Debouncing;

    let generation = state.catalog.generation;
    tracing::debug!(generation, "Catalog fetch scheduled");

    let timer = delay! {
        duration: env.debounce,
        action: AppAction::DebounceElapsed { generation }
    };
    smallvec![timer.cancellable(CATALOG_EFFECT)]
}

/// Apply a patch and schedule a fetch if anything changed.
fn update<A: DogApi>(
    state: &mut AppState,
    env: &AppEnvironment<A>,
    patch: SearchPatch,
) -> SmallVec<[Effect<AppAction>; 4]> {
    if state.search.params.apply(patch) {
        schedule_fetch(state, env)
    } else {
        SmallVec::new()
    }
}

/// Warn about a rejected input without touching the search.
fn reject(state: &mut AppState, message: String) -> SmallVec<[Effect<AppAction>; 4]> {
    let error = AppError::Validation(message);
    tracing::warn!(%error, "Search input rejected");
    state.show(Toast::warning(error.to_string()));
    SmallVec::new()
}

/// Warn when both age bounds are set and cross.
fn check_age_range(state: &mut AppState) {
    if let (Some(min), Some(max)) = (state.search.params.age_min, state.search.params.age_max) {
        if min > max {
            state.show(Toast::warning(format!(
                "Minimum age {min} is greater than maximum age {max}."
            )));
        }
    }
}

/// Keep the id restriction in sync with the favorites filter.
fn favorites_patch(state: &AppState) -> SearchPatch {
    if state.search.filter == FilterKind::Favorites {
        SearchPatch::default().ids(Some(state.favorites.to_vec()))
    } else {
        SearchPatch::default().ids(None)
    }
}

impl<A: DogApi> Reducer for CatalogReducer<A> {
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment<A>;

    #[allow(clippy::too_many_lines)] // One arm per search/catalog action
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ═══════════════════════════════════════════════════════════════
            // Search parameters
            // ═══════════════════════════════════════════════════════════════
            AppAction::UpdateSearch(patch) => update(state, env, patch),

            AppAction::SelectFilter(kind) => {
                state.search.filter = kind;
                let patch = favorites_patch(state);
                update(state, env, patch)
            },

            AppAction::ToggleBreed(breed) => {
                let mut breeds: BTreeSet<String> = state.search.params.breeds.clone();
                if !breeds.remove(&breed) {
                    breeds.insert(breed);
                }
                update(state, env, SearchPatch::default().breeds(breeds))
            },

            AppAction::SetZipInput(input) => {
                let zip_codes = parse_zip_codes(&input);
                state.search.zip_input = input;
                update(state, env, SearchPatch::default().zip_codes(zip_codes))
            },

            AppAction::SetAgeMinInput(input) => {
                state.search.age_min_input = digits_only(&input);
                let effects = update(state, env, SearchPatch::default().age_min(parse_age(&input)));
                check_age_range(state);
                effects
            },

            AppAction::SetAgeMaxInput(input) => {
                state.search.age_max_input = digits_only(&input);
                let effects = update(state, env, SearchPatch::default().age_max(parse_age(&input)));
                check_age_range(state);
                effects
            },

            AppAction::SetSort(sort) => {
                let sort = sort.filter(|s| !s.is_empty());
                if let Some(expression) = sort.as_deref() {
                    if !is_valid_sort(expression) {
                        return reject(state, format!("Unsupported sort order \"{expression}\"."));
                    }
                }
                update(state, env, SearchPatch::default().sort(sort))
            },

            AppAction::ChangePage(page) => {
                let from = page.saturating_mul(state.search.params.size);
                update(state, env, SearchPatch::default().from(from))
            },

            AppAction::SetRowsPerPage(size) => {
                if !ROWS_PER_PAGE_OPTIONS.contains(&size) {
                    return reject(
                        state,
                        format!("Rows per page must be one of {ROWS_PER_PAGE_OPTIONS:?}."),
                    );
                }
                update(state, env, SearchPatch::default().size(size).from(0))
            },

            AppAction::ToggleFavorite(_) if state.search.filter == FilterKind::Favorites => {
                let patch = favorites_patch(state);
                update(state, env, patch)
            },

            // ═══════════════════════════════════════════════════════════════
            // Fetch cycle
            // ═══════════════════════════════════════════════════════════════
            AppAction::LoginSucceeded { .. } | AppAction::RefreshCatalog => {
                schedule_fetch(state, env)
            },

            AppAction::DebounceElapsed { generation } => {
                if generation != state.catalog.generation || !state.session.logged_in {
                    tracing::debug!(generation, "Ignoring superseded debounce timer");
                    return SmallVec::new();
                }

                state.catalog.phase = CatalogPhase::Fetching;

                let api = Arc::clone(&env.api);
                let plan = state.search.params.fetch_plan();
                let epoch = state.session_epoch;
                tracing::debug!(generation, ?plan, "Fetching catalog page");

                let fetch = async_effect! {
                    match fetch_catalog(api.as_ref(), plan).await {
                        Ok(page) => Some(AppAction::CatalogLoaded { epoch, generation, page }),
                        Err(error) => Some(AppAction::CatalogFailed { epoch, generation, error }),
                    }
                };
                smallvec![fetch.cancellable(CATALOG_EFFECT)]
            },

            AppAction::CatalogLoaded {
                epoch,
                generation,
                page,
            } => {
                if epoch != state.session_epoch || generation != state.catalog.generation {
                    tracing::warn!(generation, epoch, "Discarding stale catalog page");
                    metrics::counter!("catalog.responses.stale").increment(1);
                    return SmallVec::new();
                }

                tracing::info!(total = page.total, shown = page.dogs.len(), "Catalog updated");
                state.catalog.page = page;
                state.catalog.phase = CatalogPhase::Settled(FetchOutcome::Success);
                state.catalog.last_error = None;
                SmallVec::new()
            },

            AppAction::CatalogFailed {
                epoch,
                generation,
                error,
            } => {
                if epoch != state.session_epoch || generation != state.catalog.generation {
                    tracing::warn!(generation, epoch, "Discarding stale catalog failure");
                    metrics::counter!("catalog.responses.stale").increment(1);
                    return SmallVec::new();
                }

                tracing::warn!(%error, "Catalog fetch failed; keeping previous page");
                state.catalog.phase = CatalogPhase::Settled(FetchOutcome::Error);
                state.show(Toast::error(error.to_string()));
                state.catalog.last_error = Some(error);
                SmallVec::new()
            },

            _ => SmallVec::new(),
        }
    }
}
