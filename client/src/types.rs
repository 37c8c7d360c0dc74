//! Wire types for the dog adoption API

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a dog, assigned by the service
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DogId(String);

impl DogId {
    /// Wrap a raw identifier
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DogId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A dog as returned by `POST /dogs`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dog {
    /// Unique id
    pub id: DogId,
    /// Image URL
    pub img: String,
    /// Name
    pub name: String,
    /// Age in years
    pub age: u32,
    /// Zip code where the dog is located
    pub zip_code: String,
    /// Breed name
    pub breed: String,
}

/// A geographic location as returned by `POST /locations`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Zip code
    pub zip_code: String,
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// City name
    pub city: String,
    /// Two-letter state abbreviation
    pub state: String,
    /// County name
    pub county: String,
}

/// Response of `GET /dogs/search`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Matching ids for the requested page, in ranking order
    pub result_ids: Vec<DogId>,
    /// Total number of matches across all pages
    pub total: u64,
    /// Query string of the next page
    #[serde(default)]
    pub next: Option<String>,
    /// Query string of the previous page
    #[serde(default)]
    pub prev: Option<String>,
}

/// Response of `POST /dogs/match`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResponse {
    /// The dog picked from the submitted favorites
    #[serde(rename = "match")]
    pub matched: DogId,
}

/// Credentials for `POST /auth/login`
#[derive(Clone, Debug, Serialize)]
pub(crate) struct LoginRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Tests can unwrap
mod tests {
    use super::*;

    #[test]
    fn test_search_response_uses_camel_case() {
        let json = r#"{"resultIds":["a","b"],"total":87,"next":"/dogs/search?from=25"}"#;
        let response: SearchResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.result_ids, vec![DogId::new("a"), DogId::new("b")]);
        assert_eq!(response.total, 87);
        assert_eq!(response.next.as_deref(), Some("/dogs/search?from=25"));
        assert_eq!(response.prev, None);
    }

    #[test]
    fn test_match_response_field_name() {
        let response: MatchResponse =
            serde_json::from_str(r#"{"match":"id2"}"#).unwrap();
        assert_eq!(response.matched, DogId::new("id2"));
    }

    #[test]
    fn test_locations_allow_null_entries() {
        let json = r#"[null,{"zip_code":"10001","latitude":40.75,"longitude":-73.99,"city":"New York","state":"NY","county":"New York"}]"#;
        let locations: Vec<Option<Location>> =
            serde_json::from_str(json).unwrap();

        assert!(locations[0].is_none());
        assert_eq!(locations[1].as_ref().map(|l| l.city.as_str()), Some("New York"));
    }
}
