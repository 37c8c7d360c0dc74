//! Dog adoption API client implementation

use crate::{
    error::ApiError,
    query::SearchQuery,
    types::{Dog, DogId, Location, LoginRequest, MatchResponse, SearchResponse},
};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Production endpoint of the adoption service
pub const DEFAULT_API_URL: &str = "https://frontend-take-home-service.fetch.com";

/// Largest id batch `POST /dogs` accepts in one request
pub const MAX_IDS_PER_REQUEST: usize = 100;

/// Connection settings for [`DogsClient`]
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Base URL without trailing slash
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    /// Configuration for a custom base URL
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Set the per-request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Dog adoption API client
///
/// Holds a cookie store: the session cookie set by [`DogsClient::login`]
/// is sent with every later request. Clones share the same session.
#[derive(Clone, Debug)]
pub struct DogsClient {
    client: Client,
    api_url: String,
}

impl DogsClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidConfig`] if the base URL does not parse or
    /// the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        reqwest::Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidConfig(format!("{}: {e}", config.base_url)))?;

        let client = Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            client,
            api_url: config.base_url,
        })
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Log in with a name and email
    ///
    /// Returns `true` when the service answered with a status in `[200, 299)`.
    ///
    /// # Errors
    ///
    /// Returns errors for network failures or non-success statuses
    pub async fn login(&self, name: &str, email: &str) -> Result<bool, ApiError> {
        tracing::debug!(name, "POST /auth/login");

        let response = self
            .client
            .post(format!("{}/auth/login", self.api_url))
            .json(&LoginRequest { name, email })
            .send()
            .await?;

        auth_outcome(response).await
    }

    /// End the current session
    ///
    /// # Errors
    ///
    /// Returns errors for network failures or non-success statuses
    pub async fn logout(&self) -> Result<bool, ApiError> {
        tracing::debug!("POST /auth/logout");

        let response = self
            .client
            .post(format!("{}/auth/logout", self.api_url))
            .send()
            .await?;

        auth_outcome(response).await
    }

    /// Search dog ids matching a filter
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn search(&self, query: &SearchQuery) -> Result<SearchResponse, ApiError> {
        let pairs = query.to_query_pairs();
        tracing::debug!(?pairs, "GET /dogs/search");

        let response = self
            .client
            .get(format!("{}/dogs/search", self.api_url))
            .query(&pairs)
            .send()
            .await?;

        decode(response).await
    }

    /// Fetch full dog objects for a list of ids
    ///
    /// Requests are split into batches of [`MAX_IDS_PER_REQUEST`]; results
    /// keep the order of `ids`. An empty list performs no request.
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn dogs(&self, ids: &[DogId]) -> Result<Vec<Dog>, ApiError> {
        let mut dogs = Vec::with_capacity(ids.len());

        for chunk in ids.chunks(MAX_IDS_PER_REQUEST) {
            tracing::debug!(count = chunk.len(), "POST /dogs");

            let response = self
                .client
                .post(format!("{}/dogs", self.api_url))
                .json(chunk)
                .send()
                .await?;

            dogs.extend(decode::<Vec<Dog>>(response).await?);
        }

        Ok(dogs)
    }

    /// List every breed name the search can filter on
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn breeds(&self) -> Result<Vec<String>, ApiError> {
        tracing::debug!("GET /dogs/breeds");

        let response = self
            .client
            .get(format!("{}/dogs/breeds", self.api_url))
            .send()
            .await?;

        decode(response).await
    }

    /// Ask the service to pick one dog from the given favorites
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn find_match(&self, ids: &[DogId]) -> Result<MatchResponse, ApiError> {
        tracing::debug!(count = ids.len(), "POST /dogs/match");

        let response = self
            .client
            .post(format!("{}/dogs/match", self.api_url))
            .json(ids)
            .send()
            .await?;

        decode(response).await
    }

    /// Resolve zip codes to locations, one entry per zip code
    ///
    /// Zip codes the service does not know come back as `None`.
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, API errors, or parsing failures
    pub async fn locations(&self, zip_codes: &[String]) -> Result<Vec<Option<Location>>, ApiError> {
        tracing::debug!(count = zip_codes.len(), "POST /locations");

        let response = self
            .client
            .post(format!("{}/locations", self.api_url))
            .json(zip_codes)
            .send()
            .await?;

        decode(response).await
    }
}

/// Decode a JSON body, mapping non-success statuses to errors
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let response = check_status(response).await?;
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::ResponseParseFailed(e.to_string()))
}

async fn auth_outcome(response: Response) -> Result<bool, ApiError> {
    let response = check_status(response).await?;
    Ok(response.status().as_u16() < 299)
}

async fn check_status(response: Response) -> Result<Response, ApiError> {
    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
        status => {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Request rejected by API");
            Err(ApiError::Status {
                status: status.as_u16(),
                message: body,
            })
        },
    }
}
