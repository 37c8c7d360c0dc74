//! Shared fixtures for the adoption integration tests.

#![allow(dead_code)] // Not every test binary uses every fixture

use gofetch_adoption::mocks::{sample_dog, MockDogApi};
use gofetch_adoption::{app_store, AppAction, AppEnvironment, AppStore};
use gofetch_client::Dog;
use std::sync::Arc;
use std::time::Duration;

/// Debounce window used by every store in these tests.
pub const DEBOUNCE: Duration = Duration::from_millis(500);

/// Upper bound for any single wait in these tests (virtual time).
pub const WAIT: Duration = Duration::from_secs(10);

pub type TestStore = AppStore<MockDogApi>;

/// `count` dogs of `breed` with ids `{prefix}{n}`.
pub fn dogs(prefix: &str, breed: &str, count: usize) -> Vec<Dog> {
    (0..count)
        .map(|n| sample_dog(&format!("{prefix}{n}"), breed, u32::try_from(n % 15).unwrap_or(0)))
        .collect()
}

pub fn store(api: &MockDogApi, page_size: u32) -> TestStore {
    app_store(AppEnvironment::new(Arc::new(api.clone()), DEBOUNCE, page_size))
}

/// Log in and wait for the first catalog page, then forget the calls made so far.
pub async fn logged_in_store(api: &MockDogApi, page_size: u32) -> TestStore {
    gofetch_testing::helpers::init_test_tracing();

    let store = store(api, page_size);
    let rx = store.subscribe_actions();

    let outcome = store
        .send_and_wait_for(
            AppAction::Login {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            },
            AppAction::is_login_outcome,
            WAIT,
        )
        .await
        .unwrap();
    assert!(matches!(outcome, AppAction::LoginSucceeded { .. }));

    let generation = store.state(|s| s.catalog.generation).await;
    TestStore::wait_for(rx, |a| a.settles_catalog(generation), WAIT)
        .await
        .unwrap();

    // Breeds load alongside the first page
    tokio::time::sleep(Duration::from_millis(10)).await;
    api.clear_calls();
    store
}

/// Send `action` and wait until the catalog settles for the generation it started.
pub async fn send_and_settle(store: &TestStore, action: AppAction) -> AppAction {
    let rx = store.subscribe_actions();
    store.send(action).await.unwrap();
    let generation = store.state(|s| s.catalog.generation).await;
    TestStore::wait_for(rx, |a| a.settles_catalog(generation), WAIT)
        .await
        .unwrap()
}
