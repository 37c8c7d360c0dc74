//! Favorites and match reducer.

use crate::actions::AppAction;
use crate::effects::{resolve_match, MATCH_EFFECT};
use crate::environment::{AppEnvironment, DogApi};
use crate::error::AppError;
use crate::state::{AppState, MatchStatus, Toast};
use gofetch_core::effect::Effect;
use gofetch_core::reducer::Reducer;
use gofetch_core::{async_effect, smallvec, SmallVec};
use std::sync::Arc;

/// Favorites and match reducer.
///
/// The match runs at most once per session: a stored match is only ever
/// displayed again, and a failed one may be retried.
#[derive(Debug, Clone)]
pub struct FavoritesReducer<A> {
    _phantom: std::marker::PhantomData<A>,
}

impl<A> FavoritesReducer<A> {
    /// Create a new favorites reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<A> Default for FavoritesReducer<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: DogApi> Reducer for FavoritesReducer<A> {
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment<A>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AppAction::ToggleFavorite(id) => {
                let favorite = state.favorites.toggle(id.clone());
                tracing::debug!(dog = %id, favorite, count = state.favorites.len(), "Favorite toggled");
                SmallVec::new()
            },

            AppAction::RequestMatch => {
                match state.matching {
                    MatchStatus::Resolved { .. } => {
                        tracing::debug!("Match already stored; showing it");
                        return SmallVec::new();
                    },
                    MatchStatus::Pending => return SmallVec::new(),
                    MatchStatus::NotRequested | MatchStatus::Failed(_) => {},
                }

                if state.favorites.is_empty() {
                    let error = AppError::Validation(
                        "Add at least one favorite before requesting a match.".to_string(),
                    );
                    state.show(Toast::warning(error.to_string()));
                    return SmallVec::new();
                }

                state.matching = MatchStatus::Pending;

                let api = Arc::clone(&env.api);
                let favorites = state.favorites.to_vec();
                let epoch = state.session_epoch;
                tracing::info!(favorites = favorites.len(), "Requesting match");

                let chain = async_effect! {
                    match resolve_match(api.as_ref(), &favorites).await {
                        Ok((dog, location)) => Some(AppAction::MatchResolved { epoch, dog, location }),
                        Err(error) => Some(AppAction::MatchFailed { epoch, error }),
                    }
                };
                smallvec![chain.cancellable(MATCH_EFFECT)]
            },

            AppAction::MatchResolved {
                epoch,
                dog,
                location,
            } => {
                if epoch != state.session_epoch || state.matching != MatchStatus::Pending {
                    tracing::warn!(epoch, "Discarding match of an ended session");
                    return SmallVec::new();
                }

                state.show(Toast::success(format!("It's a match: {}!", dog.name)));
                state.matching = MatchStatus::Resolved { dog, location };
                SmallVec::new()
            },

            AppAction::MatchFailed { epoch, error } => {
                if epoch != state.session_epoch || state.matching != MatchStatus::Pending {
                    return SmallVec::new();
                }

                tracing::warn!(%error, "Match failed");
                state.show(Toast::error(error.to_string()));
                state.matching = MatchStatus::Failed(error);
                SmallVec::new()
            },

            _ => SmallVec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{sample_dog, MockDogApi};
    use crate::state::Severity;
    use gofetch_testing::{assertions, ReducerTest};
    use std::time::Duration;

    fn env() -> AppEnvironment<MockDogApi> {
        AppEnvironment::new(Arc::new(MockDogApi::default()), Duration::from_millis(500), 25)
    }

    #[test]
    fn test_toggle_twice_restores_membership() {
        ReducerTest::new(FavoritesReducer::<MockDogApi>::new())
            .with_env(env())
            .given_state(AppState::default())
            .given_actions([AppAction::ToggleFavorite("d1".into())])
            .when_action(AppAction::ToggleFavorite("d1".into()))
            .then_state(|state| assert!(state.favorites.is_empty()))
            .then_effects(|effects| assertions::assert_no_effects(effects))
            .run();
    }

    #[test]
    fn test_match_without_favorites_warns() {
        ReducerTest::new(FavoritesReducer::<MockDogApi>::new())
            .with_env(env())
            .given_state(AppState::default())
            .when_action(AppAction::RequestMatch)
            .then_state(|state| {
                assert_eq!(state.matching, MatchStatus::NotRequested);
                assert!(matches!(
                    state.toast.as_ref().map(|t| t.severity),
                    Some(Severity::Warning)
                ));
            })
            .then_effects(|effects| assertions::assert_no_effects(effects))
            .run();
    }

    #[test]
    fn test_stored_match_is_not_requeried() {
        let mut state = AppState::default();
        state.favorites.toggle("d1".into());
        state.matching = MatchStatus::Resolved {
            dog: sample_dog("d1", "Pug", 3),
            location: None,
        };

        ReducerTest::new(FavoritesReducer::<MockDogApi>::new())
            .with_env(env())
            .given_state(state)
            .when_action(AppAction::RequestMatch)
            .then_state(|state| assert!(state.matching.is_resolved()))
            .then_effects(|effects| assertions::assert_no_effects(effects))
            .run();
    }

    #[test]
    fn test_failed_match_can_be_retried() {
        let mut state = AppState::default();
        state.favorites.toggle("d1".into());
        state.matching = MatchStatus::Failed(AppError::Match("boom".to_string()));

        ReducerTest::new(FavoritesReducer::<MockDogApi>::new())
            .with_env(env())
            .given_state(state)
            .when_action(AppAction::RequestMatch)
            .then_state(|state| assert_eq!(state.matching, MatchStatus::Pending))
            .then_effects(|effects| assertions::assert_has_cancellable(effects, MATCH_EFFECT))
            .run();
    }

    #[test]
    fn test_late_match_after_logout_is_dropped() {
        let mut state = AppState::default();
        state.session_epoch = 1;

        ReducerTest::new(FavoritesReducer::<MockDogApi>::new())
            .with_env(env())
            .given_state(state)
            .when_action(AppAction::MatchResolved {
                epoch: 0,
                dog: sample_dog("d1", "Pug", 3),
                location: None,
            })
            .then_state(|state| assert_eq!(state.matching, MatchStatus::NotRequested))
            .run();
    }
}
