//! Integration tests for the favorites and match chain.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

mod common;

use common::{logged_in_store, TestStore, WAIT};
use gofetch_adoption::mocks::{sample_dog, ApiCall, MockDogApi};
use gofetch_adoption::state::{Severity, FIND_MATCH_LABEL, VIEW_MATCH_LABEL};
use gofetch_adoption::{AppAction, MatchStatus};
use gofetch_client::{ApiError, DogId};
use std::time::Duration;

fn two_dogs() -> MockDogApi {
    let mut id2 = sample_dog("id2", "Poodle", 4);
    id2.zip_code = "60601".to_string();
    MockDogApi::with_dogs([sample_dog("id1", "Pug", 2), id2])
}

async fn favorite(store: &TestStore, ids: &[&str]) {
    for id in ids {
        store.send(AppAction::ToggleFavorite((*id).into())).await.unwrap();
    }
}

async fn request_match(store: &TestStore) -> AppAction {
    store
        .send_and_wait_for(AppAction::RequestMatch, AppAction::is_match_outcome, WAIT)
        .await
        .unwrap()
}

#[tokio::test(start_paused = true)]
async fn match_resolves_dog_and_location_in_sequence() {
    let api = two_dogs();
    api.pick_match("id2");
    let store = logged_in_store(&api, 25).await;
    favorite(&store, &["id1", "id2"]).await;

    let outcome = request_match(&store).await;
    assert!(matches!(outcome, AppAction::MatchResolved { .. }));

    assert_eq!(
        api.calls(),
        vec![
            ApiCall::Match(vec!["id1".into(), "id2".into()]),
            ApiCall::Dogs(vec!["id2".into()]),
            ApiCall::Locations(vec!["60601".to_string()]),
        ]
    );

    let state = store.state(Clone::clone).await;
    match &state.matching {
        MatchStatus::Resolved { dog, location } => {
            assert_eq!(dog.id, DogId::new("id2"));
            assert_eq!(location.as_ref().unwrap().zip_code, "60601");
        },
        other => panic!("expected a resolved match, got {other:?}"),
    }
    assert_eq!(state.match_button_label(), VIEW_MATCH_LABEL);
}

#[tokio::test(start_paused = true)]
async fn match_without_favorites_warns_without_requests() {
    let api = two_dogs();
    let store = logged_in_store(&api, 25).await;
    assert_eq!(store.state(|s| s.match_button_label()).await, FIND_MATCH_LABEL);

    store.send(AppAction::RequestMatch).await.unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert_eq!(api.call_count(), 0);
    let state = store.state(Clone::clone).await;
    assert_eq!(state.matching, MatchStatus::NotRequested);
    assert_eq!(state.toast.unwrap().severity, Severity::Warning);
}

#[tokio::test(start_paused = true)]
async fn stored_match_is_shown_without_requests() {
    let api = two_dogs();
    let store = logged_in_store(&api, 25).await;
    favorite(&store, &["id1"]).await;
    request_match(&store).await;
    api.clear_calls();

    store.send(AppAction::RequestMatch).await.unwrap();
    favorite(&store, &["id2"]).await;
    store.send(AppAction::RequestMatch).await.unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;

    assert!(api.calls().is_empty());
    assert_eq!(
        store.state(|s| s.matching.dog().map(|d| d.id.clone())).await,
        Some(DogId::new("id1"))
    );
}

#[tokio::test(start_paused = true)]
async fn failed_match_stores_nothing_and_can_be_retried() {
    let api = two_dogs();
    let store = logged_in_store(&api, 25).await;
    favorite(&store, &["id1"]).await;

    api.fail_match(ApiError::Status {
        status: 500,
        message: "matcher offline".to_string(),
    });
    let outcome = request_match(&store).await;
    assert!(matches!(outcome, AppAction::MatchFailed { .. }));

    let state = store.state(Clone::clone).await;
    assert!(matches!(state.matching, MatchStatus::Failed(_)));
    assert_eq!(state.toast.unwrap().severity, Severity::Error);
    assert_eq!(api.calls(), vec![ApiCall::Match(vec!["id1".into()])]);

    api.recover_match();
    let outcome = request_match(&store).await;
    assert!(matches!(outcome, AppAction::MatchResolved { .. }));
    assert!(store.state(|s| s.matching.is_resolved()).await);
}

#[tokio::test(start_paused = true)]
async fn unknown_zip_code_still_resolves_the_match() {
    let api = two_dogs();
    api.forget_zip("10001");
    let store = logged_in_store(&api, 25).await;
    favorite(&store, &["id1"]).await;

    request_match(&store).await;

    match store.state(|s| s.matching.clone()).await {
        MatchStatus::Resolved { dog, location } => {
            assert_eq!(dog.id, DogId::new("id1"));
            assert!(location.is_none());
        },
        other => panic!("expected a resolved match, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn logout_clears_favorites_and_match() {
    let api = two_dogs();
    let store = logged_in_store(&api, 25).await;
    favorite(&store, &["id1", "id2"]).await;
    request_match(&store).await;

    store
        .send_and_wait_for(AppAction::Logout, AppAction::is_logout_outcome, WAIT)
        .await
        .unwrap();

    let state = store.state(Clone::clone).await;
    assert!(state.favorites.is_empty());
    assert_eq!(state.matching, MatchStatus::NotRequested);
    assert_eq!(state.match_button_label(), FIND_MATCH_LABEL);
}

#[tokio::test(start_paused = true)]
async fn failed_logout_keeps_favorites_and_match() {
    let api = two_dogs();
    let store = logged_in_store(&api, 25).await;
    favorite(&store, &["id1"]).await;
    request_match(&store).await;

    api.set_logout_result(Err(ApiError::Status {
        status: 503,
        message: "unavailable".to_string(),
    }));
    let outcome = store
        .send_and_wait_for(AppAction::Logout, AppAction::is_logout_outcome, WAIT)
        .await
        .unwrap();
    assert!(matches!(outcome, AppAction::LogoutFailed { .. }));

    let state = store.state(Clone::clone).await;
    assert!(state.session.logged_in);
    assert_eq!(state.favorites.len(), 1);
    assert!(state.matching.is_resolved());
    assert!(state.session.last_error.is_some());
}
