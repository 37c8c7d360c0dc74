//! In-memory adoption service.

use crate::environment::DogApi;
use gofetch_client::{
    ApiError, Dog, DogId, Location, MatchResponse, SearchQuery, SearchResponse,
};
use indexmap::IndexMap;
use std::collections::HashSet;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// A request the mock received.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiCall {
    /// `POST /auth/login`
    Login {
        /// Submitted name
        name: String,
        /// Submitted email
        email: String,
    },
    /// `POST /auth/logout`
    Logout,
    /// `GET /dogs/search`
    Search(SearchQuery),
    /// `POST /dogs`
    Dogs(Vec<DogId>),
    /// `GET /dogs/breeds`
    Breeds,
    /// `POST /dogs/match`
    Match(Vec<DogId>),
    /// `POST /locations`
    Locations(Vec<String>),
}

#[derive(Debug)]
struct MockState {
    dogs: IndexMap<DogId, Dog>,
    search_order: Option<Vec<DogId>>,
    search_error: Option<ApiError>,
    login_result: Result<bool, ApiError>,
    logout_result: Result<bool, ApiError>,
    match_pick: Option<DogId>,
    match_error: Option<ApiError>,
    unknown_zips: HashSet<String>,
    reverse_batches: bool,
    calls: Vec<ApiCall>,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            dogs: IndexMap::new(),
            search_order: None,
            search_error: None,
            login_result: Ok(true),
            logout_result: Ok(true),
            match_pick: None,
            match_error: None,
            unknown_zips: HashSet::new(),
            reverse_batches: false,
            calls: Vec::new(),
        }
    }
}

/// Mock adoption service.
///
/// Serves a fixed set of dogs, records every call, and can be told to fail
/// or to answer slowly. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct MockDogApi {
    state: Arc<Mutex<MockState>>,
    latency: Duration,
}

impl MockDogApi {
    /// Mock serving these dogs, in this order.
    #[must_use]
    pub fn with_dogs(dogs: impl IntoIterator<Item = Dog>) -> Self {
        let mock = Self::default();
        mock.with_state(|s| s.dogs = dogs.into_iter().map(|d| (d.id.clone(), d)).collect());
        mock
    }

    /// Answer every request after `latency`.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make searches return exactly these ids, ignoring the query.
    pub fn set_search_order(&self, ids: Vec<DogId>) {
        self.with_state(|s| s.search_order = Some(ids));
    }

    /// Make searches fail.
    pub fn fail_search(&self, error: ApiError) {
        self.with_state(|s| s.search_error = Some(error));
    }

    /// Let searches succeed again.
    pub fn recover_search(&self) {
        self.with_state(|s| s.search_error = None);
    }

    /// Set the login outcome.
    pub fn set_login_result(&self, result: Result<bool, ApiError>) {
        self.with_state(|s| s.login_result = result);
    }

    /// Set the logout outcome.
    pub fn set_logout_result(&self, result: Result<bool, ApiError>) {
        self.with_state(|s| s.logout_result = result);
    }

    /// Make the match endpoint pick `id`.
    pub fn pick_match(&self, id: impl Into<DogId>) {
        self.with_state(|s| s.match_pick = Some(id.into()));
    }

    /// Make the match endpoint fail.
    pub fn fail_match(&self, error: ApiError) {
        self.with_state(|s| s.match_error = Some(error));
    }

    /// Let the match endpoint succeed again.
    pub fn recover_match(&self) {
        self.with_state(|s| s.match_error = None);
    }

    /// Make location lookups return `null` for `zip_code`.
    pub fn forget_zip(&self, zip_code: impl Into<String>) {
        self.with_state(|s| {
            s.unknown_zips.insert(zip_code.into());
        });
    }

    /// Answer batch dog fetches in reverse request order.
    ///
    /// The service does not promise to keep the order of the ids it is given.
    pub fn reverse_batches(&self) {
        self.with_state(|s| s.reverse_batches = true);
    }

    /// Every call received so far.
    #[must_use]
    pub fn calls(&self) -> Vec<ApiCall> {
        self.with_state(|s| s.calls.clone())
    }

    /// Queries of every search received so far.
    #[must_use]
    pub fn searches(&self) -> Vec<SearchQuery> {
        self.with_state(|s| {
            s.calls
                .iter()
                .filter_map(|call| match call {
                    ApiCall::Search(query) => Some(query.clone()),
                    _ => None,
                })
                .collect()
        })
    }

    /// Number of calls received so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.with_state(|s| s.calls.len())
    }

    /// Forget recorded calls.
    pub fn clear_calls(&self) {
        self.with_state(|s| s.calls.clear());
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut MockState) -> T) -> T {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut state)
    }

    fn respond<T: Send>(&self, result: T) -> impl Future<Output = T> + Send {
        let latency = self.latency;
        async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            result
        }
    }
}

impl MockState {
    fn search(&self, query: &SearchQuery) -> Result<SearchResponse, ApiError> {
        if let Some(error) = &self.search_error {
            return Err(error.clone());
        }

        if let Some(order) = &self.search_order {
            return Ok(SearchResponse {
                result_ids: order.clone(),
                total: order.len() as u64,
                next: None,
                prev: None,
            });
        }

        let mut matching: Vec<&Dog> = self
            .dogs
            .values()
            .filter(|dog| query.breeds.is_empty() || query.breeds.contains(&dog.breed))
            .filter(|dog| query.zip_codes.is_empty() || query.zip_codes.contains(&dog.zip_code))
            .filter(|dog| query.age_min.is_none_or(|min| dog.age >= min))
            .filter(|dog| query.age_max.is_none_or(|max| dog.age <= max))
            .collect();

        if let Some((field, direction)) = query.sort.as_deref().and_then(|s| s.split_once(':')) {
            match field {
                "name" => matching.sort_by(|a, b| a.name.cmp(&b.name)),
                "age" => matching.sort_by_key(|dog| dog.age),
                _ => matching.sort_by(|a, b| a.breed.cmp(&b.breed)),
            }
            if direction == "desc" {
                matching.reverse();
            }
        }

        let from = query.from.unwrap_or(0) as usize;
        let size = query.size.unwrap_or(25) as usize;

        Ok(SearchResponse {
            result_ids: matching
                .iter()
                .skip(from)
                .take(size)
                .map(|dog| dog.id.clone())
                .collect(),
            total: matching.len() as u64,
            next: None,
            prev: None,
        })
    }

    fn breeds(&self) -> Vec<String> {
        let mut breeds: Vec<String> = self.dogs.values().map(|d| d.breed.clone()).collect();
        breeds.sort();
        breeds.dedup();
        breeds
    }

    fn locate(&self, zip_code: &str) -> Option<Location> {
        if self.unknown_zips.contains(zip_code) {
            return None;
        }
        Some(Location {
            zip_code: zip_code.to_string(),
            latitude: 40.75,
            longitude: -73.99,
            city: "New York".to_string(),
            state: "NY".to_string(),
            county: "New York".to_string(),
        })
    }
}

impl DogApi for MockDogApi {
    fn login(&self, name: &str, email: &str) -> impl Future<Output = Result<bool, ApiError>> + Send {
        let result = self.with_state(|s| {
            s.calls.push(ApiCall::Login {
                name: name.to_string(),
                email: email.to_string(),
            });
            s.login_result.clone()
        });
        self.respond(result)
    }

    fn logout(&self) -> impl Future<Output = Result<bool, ApiError>> + Send {
        let result = self.with_state(|s| {
            s.calls.push(ApiCall::Logout);
            s.logout_result.clone()
        });
        self.respond(result)
    }

    fn search(&self, query: &SearchQuery) -> impl Future<Output = Result<SearchResponse, ApiError>> + Send {
        let result = self.with_state(|s| {
            s.calls.push(ApiCall::Search(query.clone()));
            s.search(query)
        });
        self.respond(result)
    }

    fn dogs(&self, ids: &[DogId]) -> impl Future<Output = Result<Vec<Dog>, ApiError>> + Send {
        let result = self.with_state(|s| {
            s.calls.push(ApiCall::Dogs(ids.to_vec()));
            let mut dogs: Vec<Dog> = ids.iter().filter_map(|id| s.dogs.get(id).cloned()).collect();
            if s.reverse_batches {
                dogs.reverse();
            }
            Ok(dogs)
        });
        self.respond(result)
    }

    fn breeds(&self) -> impl Future<Output = Result<Vec<String>, ApiError>> + Send {
        let result = self.with_state(|s| {
            s.calls.push(ApiCall::Breeds);
            Ok(s.breeds())
        });
        self.respond(result)
    }

    fn find_match(&self, ids: &[DogId]) -> impl Future<Output = Result<MatchResponse, ApiError>> + Send {
        let result = self.with_state(|s| {
            s.calls.push(ApiCall::Match(ids.to_vec()));
            if let Some(error) = &s.match_error {
                return Err(error.clone());
            }
            s.match_pick
                .clone()
                .or_else(|| ids.first().cloned())
                .map(|matched| MatchResponse { matched })
                .ok_or_else(|| ApiError::Status {
                    status: 400,
                    message: "no dogs submitted".to_string(),
                })
        });
        self.respond(result)
    }

    fn locations(
        &self,
        zip_codes: &[String],
    ) -> impl Future<Output = Result<Vec<Option<Location>>, ApiError>> + Send {
        let result = self.with_state(|s| {
            s.calls.push(ApiCall::Locations(zip_codes.to_vec()));
            Ok(zip_codes.iter().map(|zip| s.locate(zip)).collect())
        });
        self.respond(result)
    }
}

/// A dog with predictable fields for tests.
#[must_use]
pub fn sample_dog(id: &str, breed: &str, age: u32) -> Dog {
    Dog {
        id: DogId::new(id),
        img: format!("https://images.example/{id}.jpg"),
        name: format!("Dog {id}"),
        age,
        zip_code: "10001".to_string(),
        breed: breed.to_string(),
    }
}
