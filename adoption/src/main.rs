//! GoFetch headless driver.
//!
//! Logs in, searches the breeds given on the command line, favorites the
//! first dogs of the page, asks for a match and logs out again.
//!
//! ```text
//! gofetch Poodle "Golden Retriever"
//! ```

use gofetch_adoption::{
    app_store, AppAction, AppEnvironment, AppStore, Config, MatchStatus, SearchPatch,
};
use gofetch_client::DogsClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Dogs favorited from the first page before asking for a match.
const FAVORITES_TO_PICK: usize = 3;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gofetch=info,gofetch_adoption=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();
    config.validate()?;
    debug!(config = %serde_json::to_string(&config)?, "Effective configuration");
    info!(
        api_url = %config.api.url,
        debounce_ms = config.catalog.debounce_ms,
        page_size = config.catalog.page_size,
        "Configuration loaded"
    );

    let client = DogsClient::new(config.client_config())?;
    debug!(api_url = client.api_url(), "API client ready");
    let env = AppEnvironment::new(Arc::new(client), config.debounce(), config.catalog.page_size);
    let store = app_store(env);
    let wait = Duration::from_secs(config.api.request_timeout_secs) + config.debounce();

    // Observe from before login so the first catalog settlement is never missed
    let catalog_rx = store.subscribe_actions();

    let outcome = store
        .send_and_wait_for(
            AppAction::Login {
                name: config.user.name.clone(),
                email: config.user.email.clone(),
            },
            AppAction::is_login_outcome,
            wait,
        )
        .await?;
    if let AppAction::LoginFailed { error } = outcome {
        error!(%error, "Login failed");
        return Err(error.into());
    }

    let breeds: Vec<String> = std::env::args().skip(1).collect();
    if !breeds.is_empty() {
        info!(?breeds, "Applying breed filter");
        store.send(AppAction::UpdateSearch(SearchPatch::default().breeds(breeds))).await?;
    }

    let generation = store.state(|s| s.catalog.generation).await;
    AppStore::<DogsClient>::wait_for(catalog_rx, |a| a.settles_catalog(generation), wait).await?;

    let (total, dogs, catalog_error) = store
        .state(|s| {
            (
                s.catalog.page.total,
                s.catalog.page.dogs.clone(),
                s.catalog.last_error.clone(),
            )
        })
        .await;
    if let Some(error) = catalog_error {
        warn!(%error, "Catalog unavailable");
    }

    println!("{total} dogs found, showing {}:", dogs.len());
    for dog in &dogs {
        println!(
            "  {:<12} {:<24} {:>2}y  {}  [{}]",
            dog.name, dog.breed, dog.age, dog.zip_code, dog.id
        );
    }

    if dogs.is_empty() {
        warn!("No dogs to favorite; skipping match");
    } else {
        for dog in dogs.iter().take(FAVORITES_TO_PICK) {
            store.send(AppAction::ToggleFavorite(dog.id.clone())).await?;
        }

        store
            .send_and_wait_for(AppAction::RequestMatch, AppAction::is_match_outcome, wait)
            .await?;

        match store.state(|s| s.matching.clone()).await {
            MatchStatus::Resolved { dog, location } => {
                println!("Your match: {} ({}, {}y)", dog.name, dog.breed, dog.age);
                match location {
                    Some(location) => println!(
                        "  in {}, {} {} ({:.4}, {:.4})",
                        location.city,
                        location.state,
                        location.zip_code,
                        location.latitude,
                        location.longitude
                    ),
                    None => println!("  location unknown for zip {}", dog.zip_code),
                }
            },
            MatchStatus::Failed(error) => warn!(%error, "No match"),
            MatchStatus::NotRequested | MatchStatus::Pending => {},
        }
    }

    let outcome = store
        .send_and_wait_for(AppAction::Logout, AppAction::is_logout_outcome, wait)
        .await?;
    if let AppAction::LogoutFailed { error } = outcome {
        warn!(%error, "Logout failed");
    }

    store.shutdown_default().await?;
    info!("Done");
    Ok(())
}
