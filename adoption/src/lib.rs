//! # GoFetch Adoption
//!
//! Application core of the GoFetch dog adoption client.
//!
//! One [`AppState`] is owned by a [`Store`](gofetch_runtime::Store) and
//! changed only by the feature reducers:
//!
//! - **Session**: login, logout, breed list
//! - **Search & Catalog**: filter/paging parameters and the debounced fetch cycle
//! - **Favorites & Match**: favorite set and the match chain
//!
//! All I/O goes through the [`DogApi`] trait, implemented by
//! [`DogsClient`](gofetch_client::DogsClient) for the real service and by
//! [`MockDogApi`](mocks::MockDogApi) for tests.
//!
//! ## Example
//!
//! ```no_run
//! use gofetch_adoption::{app_store, AppAction, AppEnvironment, Config};
//! use gofetch_client::DogsClient;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env();
//! let client = DogsClient::new(config.client_config())?;
//! let env = AppEnvironment::new(Arc::new(client), config.debounce(), config.catalog.page_size);
//! let store = app_store(env);
//!
//! store.send(AppAction::ToggleBreed("Poodle".to_string())).await?;
//! # Ok(())
//! # }
//! ```

pub mod actions;
pub mod config;
pub mod effects;
pub mod environment;
pub mod error;
pub mod mocks;
pub mod reducers;
pub mod search;
pub mod state;

pub use actions::AppAction;
pub use config::{Config, ConfigError};
pub use environment::{AppEnvironment, DogApi};
pub use error::AppError;
pub use reducers::{app_reducer, AppReducer};
pub use search::{FetchPlan, FilterKind, SearchParams, SearchPatch, SearchState};
pub use state::{AppState, CatalogPhase, MatchStatus, Toast};

use gofetch_runtime::Store;

/// Store running the complete adoption client.
pub type AppStore<A> = Store<AppState, AppAction, AppEnvironment<A>, AppReducer<A>>;

/// Build a store with a fresh logged-out state.
#[must_use]
pub fn app_store<A: DogApi>(env: AppEnvironment<A>) -> AppStore<A> {
    Store::new(AppState::new(env.page_size), app_reducer(), env)
}
