//! Query string for `GET /dogs/search`
//!
//! The service treats an absent parameter differently from an empty one, so
//! only fields that carry a value are serialized. Multi-valued fields repeat
//! their key (`breeds=Poodle&breeds=Pug`).

/// Filter and paging parameters for a dog search
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Breed names to include
    pub breeds: Vec<String>,
    /// Zip codes to include
    pub zip_codes: Vec<String>,
    /// Minimum age in years
    pub age_min: Option<u32>,
    /// Maximum age in years
    pub age_max: Option<u32>,
    /// Page length
    pub size: Option<u32>,
    /// Offset of the first result
    pub from: Option<u32>,
    /// Sort order, `field:asc` or `field:desc`
    pub sort: Option<String>,
}

impl SearchQuery {
    /// Key/value pairs in the order the service documents them
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(self.breeds.len() + self.zip_codes.len() + 5);

        pairs.extend(self.breeds.iter().map(|breed| ("breeds", breed.clone())));
        pairs.extend(self.zip_codes.iter().map(|zip| ("zipCodes", zip.clone())));

        if let Some(age_min) = self.age_min {
            pairs.push(("ageMin", age_min.to_string()));
        }
        if let Some(age_max) = self.age_max {
            pairs.push(("ageMax", age_max.to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size", size.to_string()));
        }
        if let Some(from) = self.from {
            pairs.push(("from", from.to_string()));
        }
        if let Some(sort) = self.sort.as_ref().filter(|s| !s.is_empty()) {
            pairs.push(("sort", sort.clone()));
        }

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_has_no_pairs() {
        assert!(SearchQuery::default().to_query_pairs().is_empty());
    }

    #[test]
    fn test_multi_valued_fields_repeat_key() {
        let query = SearchQuery {
            breeds: vec!["Poodle".into(), "Pug".into()],
            zip_codes: vec!["10001".into()],
            size: Some(25),
            from: Some(0),
            ..SearchQuery::default()
        };

        assert_eq!(
            query.to_query_pairs(),
            vec![
                ("breeds", "Poodle".to_string()),
                ("breeds", "Pug".to_string()),
                ("zipCodes", "10001".to_string()),
                ("size", "25".to_string()),
                ("from", "0".to_string()),
            ]
        );
    }

    #[test]
    fn test_blank_sort_is_dropped() {
        let query = SearchQuery {
            sort: Some(String::new()),
            age_min: Some(2),
            ..SearchQuery::default()
        };

        assert_eq!(query.to_query_pairs(), vec![("ageMin", "2".to_string())]);
    }
}
