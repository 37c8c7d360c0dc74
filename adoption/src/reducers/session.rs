//! Session reducer.
//!
//! Handles login, logout and the breed list that is loaded once a session
//! starts.
//!
//! # Flow
//!
//! 1. `Login` validates the form and calls the service
//! 2. `LoginSucceeded` marks the session active and loads breeds
//! 3. `Logout` calls the service
//! 4. `LogoutSucceeded` resets the state and cancels everything in flight
//!
//! A rejected login or logout leaves the session as it was and records an
//! inline [`AppError::Auth`].

use crate::actions::AppAction;
use crate::effects::{BREEDS_EFFECT, CATALOG_EFFECT, MATCH_EFFECT};
use crate::environment::{AppEnvironment, DogApi};
use crate::error::AppError;
use crate::state::{AppState, Toast, UserProfile};
use gofetch_core::effect::Effect;
use gofetch_core::reducer::Reducer;
use gofetch_core::{async_effect, smallvec, SmallVec};
use std::sync::Arc;

/// Session reducer.
#[derive(Debug, Clone)]
pub struct SessionReducer<A> {
    _phantom: std::marker::PhantomData<A>,
}

impl<A> SessionReducer<A> {
    /// Create a new session reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<A> Default for SessionReducer<A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Breed list request tagged with the current session.
fn load_breeds<A: DogApi>(state: &AppState, env: &AppEnvironment<A>) -> Effect<AppAction> {
    let api = Arc::clone(&env.api);
    let epoch = state.session_epoch;

    let effect = async_effect! {
        match api.breeds().await {
            Ok(breeds) => Some(AppAction::BreedsLoaded { epoch, breeds }),
            Err(error) => Some(AppAction::BreedsFailed {
                epoch,
                error: AppError::Breeds(error.to_string()),
            }),
        }
    };
    effect.cancellable(BREEDS_EFFECT)
}

impl<A: DogApi> Reducer for SessionReducer<A> {
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment<A>;

    #[allow(clippy::too_many_lines)] // One arm per session action
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ═══════════════════════════════════════════════════════════════
            // Login
            // ═══════════════════════════════════════════════════════════════
            AppAction::Login { name, email } => {
                if state.session.logged_in || state.session.pending {
                    tracing::debug!("Login ignored: session active or request in flight");
                    return SmallVec::new();
                }

                let name = name.trim().to_string();
                let email = email.trim().to_string();
                if name.is_empty() || email.is_empty() {
                    state.session.last_error = Some(AppError::Validation(
                        "Please enter your name and email.".to_string(),
                    ));
                    return SmallVec::new();
                }

                state.session.pending = true;
                state.session.last_error = None;

                let api = Arc::clone(&env.api);
                smallvec![async_effect! {
                    let accepted = api.login(&name, &email).await;
                    match accepted {
                        Ok(true) => Some(AppAction::LoginSucceeded {
                            user: UserProfile { name, email },
                        }),
                        Ok(false) => Some(AppAction::LoginFailed {
                            error: AppError::Auth("login was rejected".to_string()),
                        }),
                        Err(error) => Some(AppAction::LoginFailed {
                            error: AppError::auth(&error),
                        }),
                    }
                }]
            },

            AppAction::LoginSucceeded { user } => {
                tracing::info!(user = %user.name, "Logged in");

                state.session.pending = false;
                state.session.logged_in = true;
                state.session.last_error = None;
                state.show(Toast::success(format!("Welcome, {}!", user.name)));
                state.session.user = Some(user);

                smallvec![load_breeds(state, env)]
            },

            AppAction::LoginFailed { error } => {
                tracing::warn!(%error, "Login failed");

                state.session.pending = false;
                state.session.last_error = Some(error);
                SmallVec::new()
            },

            // ═══════════════════════════════════════════════════════════════
            // Logout
            // ═══════════════════════════════════════════════════════════════
            AppAction::Logout => {
                if !state.session.logged_in || state.session.pending {
                    tracing::debug!("Logout ignored: no active session or request in flight");
                    return SmallVec::new();
                }

                state.session.pending = true;
                state.session.last_error = None;

                let api = Arc::clone(&env.api);
                smallvec![async_effect! {
                    match api.logout().await {
                        Ok(true) => Some(AppAction::LogoutSucceeded),
                        Ok(false) => Some(AppAction::LogoutFailed {
                            error: AppError::Auth("logout was rejected".to_string()),
                        }),
                        Err(error) => Some(AppAction::LogoutFailed {
                            error: AppError::auth(&error),
                        }),
                    }
                }]
            },

            AppAction::LogoutSucceeded => {
                state.reset_after_logout(env.page_size);
                state.show(Toast::info("You have been logged out."));
                tracing::info!(epoch = state.session_epoch, "Logged out");

                smallvec![
                    Effect::Cancel(CATALOG_EFFECT),
                    Effect::Cancel(MATCH_EFFECT),
                    Effect::Cancel(BREEDS_EFFECT),
                ]
            },

            AppAction::LogoutFailed { error } => {
                tracing::warn!(%error, "Logout failed");

                state.session.pending = false;
                state.session.last_error = Some(error);
                SmallVec::new()
            },

            // ═══════════════════════════════════════════════════════════════
            // Breeds
            // ═══════════════════════════════════════════════════════════════
            AppAction::LoadBreeds => {
                if !state.session.logged_in {
                    return SmallVec::new();
                }
                smallvec![load_breeds(state, env)]
            },

            AppAction::BreedsLoaded { epoch, breeds } => {
                if epoch != state.session_epoch {
                    tracing::debug!(epoch, "Discarding breeds of an ended session");
                    return SmallVec::new();
                }

                tracing::debug!(count = breeds.len(), "Breeds loaded");
                state.breeds = breeds;
                SmallVec::new()
            },

            AppAction::BreedsFailed { epoch, error } => {
                if epoch != state.session_epoch {
                    return SmallVec::new();
                }

                tracing::warn!(%error, "Breed list unavailable");
                state.show(Toast::warning(error.to_string()));
                SmallVec::new()
            },

            AppAction::DismissToast => {
                state.toast = None;
                SmallVec::new()
            },

            _ => SmallVec::new(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Tests can unwrap
mod tests {
    use super::*;
    use crate::mocks::MockDogApi;
    use gofetch_testing::{assertions, helpers, ReducerTest};
    use std::time::Duration;

    fn env(api: MockDogApi) -> AppEnvironment<MockDogApi> {
        AppEnvironment::new(Arc::new(api), Duration::from_millis(500), 25)
    }

    #[test]
    fn test_blank_credentials_are_rejected_locally() {
        ReducerTest::new(SessionReducer::<MockDogApi>::new())
            .with_env(env(MockDogApi::default()))
            .given_state(AppState::default())
            .when_action(AppAction::Login {
                name: "  ".to_string(),
                email: "ada@example.com".to_string(),
            })
            .then_state(|state| {
                assert!(!state.session.pending);
                assert!(state.session.last_error.as_ref().unwrap().is_validation());
            })
            .then_effects(|effects| assertions::assert_no_effects(effects))
            .run();
    }

    #[tokio::test]
    async fn test_rejected_login_becomes_auth_error() {
        let api = MockDogApi::default();
        api.set_login_result(Ok(false));
        let env = env(api);
        let mut state = AppState::default();

        let effects = SessionReducer::<MockDogApi>::new().reduce(
            &mut state,
            AppAction::Login {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            },
            &env,
        );
        assert!(state.session.pending);

        let outcome = helpers::run_first_future(effects).await.unwrap();
        assert!(matches!(
            outcome,
            AppAction::LoginFailed {
                error: AppError::Auth(_)
            }
        ));
    }

    #[test]
    fn test_login_success_loads_breeds() {
        ReducerTest::new(SessionReducer::<MockDogApi>::new())
            .with_env(env(MockDogApi::default()))
            .given_state(AppState::default())
            .when_action(AppAction::LoginSucceeded {
                user: UserProfile {
                    name: "Ada".to_string(),
                    email: "ada@example.com".to_string(),
                },
            })
            .then_state(|state| {
                assert!(state.session.logged_in);
                assert_eq!(state.session.user.as_ref().unwrap().name, "Ada");
            })
            .then_effects(|effects| {
                assertions::assert_has_cancellable(effects, BREEDS_EFFECT);
            })
            .run();
    }

    #[test]
    fn test_stale_breeds_are_discarded() {
        let mut state = AppState::default();
        state.session_epoch = 2;

        ReducerTest::new(SessionReducer::<MockDogApi>::new())
            .with_env(env(MockDogApi::default()))
            .given_state(state)
            .when_action(AppAction::BreedsLoaded {
                epoch: 1,
                breeds: vec!["Pug".to_string()],
            })
            .then_state(|state| assert!(state.breeds.is_empty()))
            .run();
    }
}
