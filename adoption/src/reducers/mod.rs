//! Adoption reducers.
//!
//! Reducers are pure functions: `(State, Action, Environment) → (State, Effects)`.
//!
//! Each feature reducer sees every action. They run in a fixed order so the
//! catalog observes favorites and session changes made for the same action.

pub mod catalog;
pub mod favorites;
pub mod session;

use crate::actions::AppAction;
use crate::environment::{AppEnvironment, DogApi};
use crate::state::AppState;
use gofetch_core::composition::{combine_reducers, CombinedReducer};

// Re-export
pub use catalog::CatalogReducer;
pub use favorites::FavoritesReducer;
pub use session::SessionReducer;

/// The complete application reducer.
pub type AppReducer<A> = CombinedReducer<AppState, AppAction, AppEnvironment<A>>;

/// Build the application reducer: session, then favorites, then catalog.
#[must_use]
pub fn app_reducer<A: DogApi>() -> AppReducer<A> {
    combine_reducers(vec![
        Box::new(SessionReducer::<A>::new()),
        Box::new(FavoritesReducer::<A>::new()),
        Box::new(CatalogReducer::<A>::new()),
    ])
}
