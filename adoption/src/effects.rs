//! Multi-request workflows run inside effects.
//!
//! Each function is one logical operation for loading-state purposes: the
//! reducer sees a single success or failure action for the whole chain.

use crate::environment::DogApi;
use crate::error::{AppError, Result};
use crate::search::FetchPlan;
use crate::state::CatalogPage;
use gofetch_client::{Dog, DogId, Location};
use std::collections::HashMap;

/// Cancellation scope of the catalog debounce timer and fetch.
pub const CATALOG_EFFECT: gofetch_core::effect::EffectId =
    gofetch_core::effect::EffectId::new("catalog");

/// Cancellation scope of the match chain.
pub const MATCH_EFFECT: gofetch_core::effect::EffectId =
    gofetch_core::effect::EffectId::new("match");

/// Cancellation scope of the breed list request.
pub const BREEDS_EFFECT: gofetch_core::effect::EffectId =
    gofetch_core::effect::EffectId::new("breeds");

/// Run one catalog fetch.
///
/// A filter search resolves ids first and then fetches the dogs; an id
/// restriction fetches its page directly. Dogs come back in id order
/// whatever order the batch endpoint used.
///
/// # Errors
///
/// Returns [`AppError::Search`] if any request fails.
pub async fn fetch_catalog<A: DogApi>(api: &A, plan: FetchPlan) -> Result<CatalogPage> {
    let (ids, total) = match plan {
        FetchPlan::ByFilter(query) => {
            let response = api.search(&query).await.map_err(|e| AppError::search(&e))?;
            (response.result_ids, response.total)
        },
        FetchPlan::ByIds { ids, total } => (ids, total),
    };

    let dogs = if ids.is_empty() {
        Vec::new()
    } else {
        let fetched = api.dogs(&ids).await.map_err(|e| AppError::search(&e))?;
        in_id_order(&ids, fetched)
    };

    tracing::debug!(total, shown = dogs.len(), "Catalog page fetched");
    Ok(CatalogPage { total, dogs })
}

/// Reorder `dogs` to follow `ids`, dropping ids the service did not return.
fn in_id_order(ids: &[DogId], dogs: Vec<Dog>) -> Vec<Dog> {
    let mut by_id: HashMap<DogId, Dog> = dogs.into_iter().map(|dog| (dog.id.clone(), dog)).collect();
    ids.iter().filter_map(|id| by_id.remove(id)).collect()
}

/// Run the match chain: match, then the matched dog, then its location.
///
/// An unknown zip code is not a failure; the location is then `None`.
///
/// # Errors
///
/// Returns [`AppError::Match`] if any step fails or the matched dog
/// cannot be fetched.
pub async fn resolve_match<A: DogApi>(
    api: &A,
    favorites: &[DogId],
) -> Result<(Dog, Option<Location>)> {
    let matched = api
        .find_match(favorites)
        .await
        .map_err(|e| AppError::matching(&e))?
        .matched;

    let dog = api
        .dogs(std::slice::from_ref(&matched))
        .await
        .map_err(|e| AppError::matching(&e))?
        .into_iter()
        .find(|dog| dog.id == matched)
        .ok_or_else(|| AppError::Match(format!("matched dog {matched} was not returned")))?;

    let location = api
        .locations(std::slice::from_ref(&dog.zip_code))
        .await
        .map_err(|e| AppError::matching(&e))?
        .into_iter()
        .next()
        .flatten();

    tracing::info!(dog = %dog.id, located = location.is_some(), "Match resolved");
    Ok((dog, location))
}
