//! # GoFetch API Client
//!
//! Typed async client for the dog adoption REST API: session login/logout,
//! dog search, batch dog lookup, breeds, match and location lookup.
//!
//! ## Example
//!
//! ```no_run
//! use gofetch_client::{ClientConfig, DogsClient, SearchQuery};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DogsClient::new(ClientConfig::default())?;
//!
//!     client.login("Ada", "ada@example.com").await?;
//!
//!     let query = SearchQuery {
//!         breeds: vec!["Poodle".to_string()],
//!         size: Some(25),
//!         ..SearchQuery::default()
//!     };
//!     let page = client.search(&query).await?;
//!     let dogs = client.dogs(&page.result_ids).await?;
//!
//!     println!("{} of {} dogs", dogs.len(), page.total);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod query;
pub mod types;

// Re-export main types for convenience
pub use client::{ClientConfig, DogsClient, DEFAULT_API_URL, MAX_IDS_PER_REQUEST};
pub use error::ApiError;
pub use query::SearchQuery;
pub use types::{Dog, DogId, Location, MatchResponse, SearchResponse};
