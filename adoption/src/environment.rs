//! Adoption environment.
//!
//! This module defines the environment type for dependency injection
//! in the adoption reducers.

use gofetch_client::{
    ApiError, Dog, DogId, DogsClient, Location, MatchResponse, SearchQuery, SearchResponse,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Remote adoption service.
///
/// Abstracts over the HTTP client so reducers can be driven against
/// [`MockDogApi`](crate::mocks::MockDogApi) in tests.
pub trait DogApi: Send + Sync + 'static {
    /// Log in; `Ok(true)` when the service accepted the credentials.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or is rejected.
    fn login(&self, name: &str, email: &str) -> impl Future<Output = Result<bool, ApiError>> + Send;

    /// End the session.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or is rejected.
    fn logout(&self) -> impl Future<Output = Result<bool, ApiError>> + Send;

    /// Search dog ids.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the response does not decode.
    fn search(&self, query: &SearchQuery) -> impl Future<Output = Result<SearchResponse, ApiError>> + Send;

    /// Fetch dogs by id.
    ///
    /// # Errors
    ///
    /// Returns error if any batch fails.
    fn dogs(&self, ids: &[DogId]) -> impl Future<Output = Result<Vec<Dog>, ApiError>> + Send;

    /// List breed names.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    fn breeds(&self) -> impl Future<Output = Result<Vec<String>, ApiError>> + Send;

    /// Pick a match among `ids`.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    fn find_match(&self, ids: &[DogId]) -> impl Future<Output = Result<MatchResponse, ApiError>> + Send;

    /// Resolve zip codes to locations.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    fn locations(
        &self,
        zip_codes: &[String],
    ) -> impl Future<Output = Result<Vec<Option<Location>>, ApiError>> + Send;
}

impl DogApi for DogsClient {
    fn login(&self, name: &str, email: &str) -> impl Future<Output = Result<bool, ApiError>> + Send {
        Self::login(self, name, email)
    }

    fn logout(&self) -> impl Future<Output = Result<bool, ApiError>> + Send {
        Self::logout(self)
    }

    fn search(&self, query: &SearchQuery) -> impl Future<Output = Result<SearchResponse, ApiError>> + Send {
        Self::search(self, query)
    }

    fn dogs(&self, ids: &[DogId]) -> impl Future<Output = Result<Vec<Dog>, ApiError>> + Send {
        Self::dogs(self, ids)
    }

    fn breeds(&self) -> impl Future<Output = Result<Vec<String>, ApiError>> + Send {
        Self::breeds(self)
    }

    fn find_match(&self, ids: &[DogId]) -> impl Future<Output = Result<MatchResponse, ApiError>> + Send {
        Self::find_match(self, ids)
    }

    fn locations(
        &self,
        zip_codes: &[String],
    ) -> impl Future<Output = Result<Vec<Option<Location>>, ApiError>> + Send {
        Self::locations(self, zip_codes)
    }
}

/// Adoption environment.
///
/// Contains all external dependencies needed by the adoption reducers.
pub struct AppEnvironment<A: DogApi> {
    /// Remote service, shared with running effects.
    pub api: Arc<A>,

    /// Quiet period before a search change is fetched.
    pub debounce: Duration,

    /// Page length restored when a session ends.
    pub page_size: u32,
}

impl<A: DogApi> AppEnvironment<A> {
    /// Create a new adoption environment.
    #[must_use]
    pub const fn new(api: Arc<A>, debounce: Duration, page_size: u32) -> Self {
        Self {
            api,
            debounce,
            page_size,
        }
    }
}

impl<A: DogApi> Clone for AppEnvironment<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            debounce: self.debounce,
            page_size: self.page_size,
        }
    }
}
