//! # GoFetch Testing
//!
//! Testing utilities and helpers for GoFetch reducers.
//!
//! This crate provides:
//! - [`ReducerTest`]: Given-When-Then harness for reducers
//! - [`assertions`]: Effect assertions (futures, delays, cancellation scopes)
//! - [`helpers`]: Driving effect futures and test logging
//!
//! ## Example
//!
//! ```ignore
//! use gofetch_testing::{assertions, ReducerTest};
//!
//! ReducerTest::new(app_reducer())
//!     .with_env(test_environment())
//!     .given_state(logged_in_state())
//!     .when_action(AppAction::RequestMatch)
//!     .then_effects(|effects| assertions::assert_has_future_effect(effects))
//!     .run();
//! ```


/// Test helpers and utilities.
pub mod helpers {
    use gofetch_core::effect::Effect;
    use std::sync::Once;

    static TRACING: Once = Once::new();

    /// Install a test-friendly tracing subscriber once per process
    ///
    /// Honours `RUST_LOG`; output is captured by the test harness.
    pub fn init_test_tracing() {
        TRACING.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                .with_test_writer()
                .try_init();
        });
    }

    /// Await the first `Future` effect found (searching nested effects)
    ///
    /// Returns `None` when there is no future effect, or when the future
    /// itself resolves to `None`.
    pub async fn run_first_future<A>(effects: impl IntoIterator<Item = Effect<A>>) -> Option<A> {
        let future = effects.into_iter().find_map(take_future)?;
        future.await
    }

    fn take_future<A>(
        effect: Effect<A>,
    ) -> Option<std::pin::Pin<Box<dyn std::future::Future<Output = Option<A>> + Send>>> {
        match effect {
            Effect::Future(future) => Some(future),
            Effect::Parallel(inner) | Effect::Sequential(inner) => {
                inner.into_iter().find_map(take_future)
            },
            Effect::Cancellable { effect, .. } => take_future(*effect),
            _ => None,
        }
    }

    /// Extract the action of the first `Delay` effect (searching nested effects)
    pub fn delayed_action<A>(effects: impl IntoIterator<Item = Effect<A>>) -> Option<A> {
        effects.into_iter().find_map(|effect| match effect {
            Effect::Delay { action, .. } => Some(*action),
            Effect::Parallel(inner) | Effect::Sequential(inner) => delayed_action(inner),
            Effect::Cancellable { effect, .. } => delayed_action([*effect]),
            _ => None,
        })
    }
}

// Re-export commonly used items
pub use reducer_test::{assertions, ReducerTest};

#[cfg(test)]
mod tests {
    use super::helpers::{delayed_action, run_first_future};
    use gofetch_core::effect::{Effect, EffectId};
    use std::time::Duration;

    #[tokio::test]
    async fn test_run_first_future_finds_nested_future() {
        let effects: Vec<Effect<u32>> = vec![
            Effect::None,
            Effect::Parallel(vec![
                Effect::Future(Box::pin(async { Some(7) })).cancellable(EffectId::new("x")),
            ]),
        ];

        assert_eq!(run_first_future(effects).await, Some(7));
    }

    #[tokio::test]
    async fn test_run_first_future_without_future() {
        assert_eq!(run_first_future::<u32>(vec![Effect::None]).await, None);
    }

    #[test]
    fn test_delayed_action() {
        let effects = vec![Effect::Delay {
            duration: Duration::from_millis(1),
            action: Box::new(3_u32),
        }
        .cancellable(EffectId::new("debounce"))];

        assert_eq!(delayed_action(effects), Some(3));
    }
}
