//! Declarative macros for ergonomic effect construction
//!
//! These macros reduce boilerplate when creating `Effect` variants in reducers.

/// Create an `Effect::Future` from an async block
///
/// # Example
///
/// ```rust,ignore
/// use gofetch_core::async_effect;
///
/// async_effect! {
///     match api.breeds().await {
///         Ok(breeds) => Some(AppAction::BreedsLoaded { breeds }),
///         Err(error) => Some(AppAction::BreedsFailed { error: error.into() }),
///     }
/// }
/// ```
#[macro_export]
macro_rules! async_effect {
    ($($body:tt)*) => {
        $crate::effect::Effect::Future(
            ::std::boxed::Box::pin(async move { $($body)* })
        )
    };
}

/// Create an `Effect::Delay` for scheduling delayed actions
///
/// # Example
///
/// ```rust,ignore
/// use gofetch_core::delay;
/// use std::time::Duration;
///
/// delay! {
///     duration: Duration::from_millis(500),
///     action: AppAction::DebounceElapsed { generation }
/// }
/// ```
#[macro_export]
macro_rules! delay {
    (
        duration: $duration:expr,
        action: $action:expr
    ) => {
        $crate::effect::Effect::Delay {
            duration: $duration,
            action: ::std::boxed::Box::new($action),
        }
    };
}

/// Wrap an effect in a cancellation scope
///
/// # Example
///
/// ```rust,ignore
/// use gofetch_core::{cancellable, delay};
///
/// cancellable! {
///     id: CATALOG_EFFECT,
///     effect: delay! {
///         duration: env.debounce,
///         action: AppAction::DebounceElapsed { generation }
///     }
/// }
/// ```
#[macro_export]
macro_rules! cancellable {
    (
        id: $id:expr,
        effect: $effect:expr
    ) => {
        $crate::effect::Effect::Cancellable {
            id: $id,
            effect: ::std::boxed::Box::new($effect),
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::effect::{Effect, EffectId};
    use std::time::Duration;

    #[derive(Clone, Debug)]
    enum TestAction {
        Loaded { value: i32 },
        DebounceElapsed,
    }

    #[test]
    fn test_async_effect_macro() {
        let effect = async_effect! {
            Some(TestAction::Loaded { value: 42 })
        };

        assert!(matches!(effect, Effect::Future(_)));
    }

    #[test]
    fn test_async_effect_resolves_to_action() {
        let Effect::Future(fut) = async_effect!(Some(TestAction::Loaded { value: 7 })) else {
            unreachable!("async_effect! always builds a future");
        };

        let action = tokio_test::block_on(fut);
        assert!(matches!(action, Some(TestAction::Loaded { value: 7 })));
    }

    #[test]
    fn test_delay_macro() {
        let effect = delay! {
            duration: Duration::from_millis(500),
            action: TestAction::DebounceElapsed
        };

        assert!(matches!(effect, Effect::Delay { .. }));
    }

    #[test]
    fn test_cancellable_macro() {
        let id = EffectId::new("catalog");
        let effect = cancellable! {
            id: id,
            effect: delay! {
                duration: Duration::from_millis(500),
                action: TestAction::DebounceElapsed
            }
        };

        assert_eq!(effect.cancellation_id(), Some(id));
    }
}
