//! Search parameters and the query they produce.
//!
//! [`SearchParams`] is the single source of truth for what the catalog
//! shows. It is only ever changed through [`SearchParams::apply`], which
//! enforces the paging rule: any filter change returns to the first page.

use gofetch_client::{DogId, SearchQuery};
use std::collections::BTreeSet;

/// Page lengths offered by the catalog.
pub const ROWS_PER_PAGE_OPTIONS: [u32; 3] = [25, 50, 100];

/// Default page length.
pub const DEFAULT_PAGE_SIZE: u32 = 25;

/// Fields the service accepts in `field:direction` sort expressions.
pub const SORT_FIELDS: [&str; 3] = ["breed", "name", "age"];

/// Current filter and paging parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchParams {
    /// Breeds to include (empty: all breeds)
    pub breeds: BTreeSet<String>,
    /// Zip codes to include (empty: everywhere)
    pub zip_codes: BTreeSet<String>,
    /// Minimum age in years
    pub age_min: Option<u32>,
    /// Maximum age in years
    pub age_max: Option<u32>,
    /// Page length, always positive
    pub size: u32,
    /// Offset of the first dog on the page, a multiple of `size`
    pub from: u32,
    /// Sort expression, `field:asc` or `field:desc`
    pub sort: Option<String>,
    /// Exact id restriction; when present every other filter is ignored
    pub ids: Option<Vec<DogId>>,
}

impl SearchParams {
    /// Parameters for the first page with no filters.
    #[must_use]
    pub fn new(size: u32) -> Self {
        Self {
            breeds: BTreeSet::new(),
            zip_codes: BTreeSet::new(),
            age_min: None,
            age_max: None,
            size: size.max(1),
            from: 0,
            sort: None,
            ids: None,
        }
    }

    /// Apply a patch, returning whether anything changed.
    ///
    /// A change to any field other than `from`/`size` resets `from` to 0.
    /// A size change without an explicit offset snaps `from` down to the
    /// start of the page that contained it.
    pub fn apply(&mut self, patch: SearchPatch) -> bool {
        let mut filter_changed = false;

        if let Some(breeds) = patch.breeds {
            filter_changed |= replace(&mut self.breeds, breeds);
        }
        if let Some(zip_codes) = patch.zip_codes {
            filter_changed |= replace(&mut self.zip_codes, zip_codes);
        }
        if let Some(age_min) = patch.age_min {
            filter_changed |= replace(&mut self.age_min, age_min);
        }
        if let Some(age_max) = patch.age_max {
            filter_changed |= replace(&mut self.age_max, age_max);
        }
        if let Some(sort) = patch.sort {
            filter_changed |= replace(&mut self.sort, sort);
        }
        if let Some(ids) = patch.ids {
            filter_changed |= replace(&mut self.ids, ids);
        }

        let mut paging_changed = false;
        if let Some(size) = patch.size {
            paging_changed |= replace(&mut self.size, size.max(1));
        }

        let from = if filter_changed {
            0
        } else {
            patch.from.unwrap_or(self.from)
        };
        paging_changed |= replace(&mut self.from, from - from % self.size);

        filter_changed || paging_changed
    }

    /// Zero-based index of the current page.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.from / self.size
    }

    /// Number of pages needed to show `total` dogs.
    #[must_use]
    pub fn page_count(&self, total: u64) -> u64 {
        total.div_ceil(u64::from(self.size))
    }

    /// What the next catalog fetch has to do.
    #[must_use]
    pub fn fetch_plan(&self) -> FetchPlan {
        if let Some(ids) = &self.ids {
            let start = (self.from as usize).min(ids.len());
            let end = start.saturating_add(self.size as usize).min(ids.len());
            return FetchPlan::ByIds {
                ids: ids[start..end].to_vec(),
                total: ids.len() as u64,
            };
        }

        FetchPlan::ByFilter(SearchQuery {
            breeds: self.breeds.iter().cloned().collect(),
            zip_codes: self.zip_codes.iter().cloned().collect(),
            age_min: self.age_min,
            age_max: self.age_max,
            size: Some(self.size),
            from: Some(self.from),
            sort: self.sort.clone().filter(|s| !s.is_empty()),
        })
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

/// Partial update of [`SearchParams`]; `None` leaves a field untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[must_use]
pub struct SearchPatch {
    /// New breed set
    pub breeds: Option<BTreeSet<String>>,
    /// New zip code set
    pub zip_codes: Option<BTreeSet<String>>,
    /// New minimum age (`Some(None)` clears it)
    pub age_min: Option<Option<u32>>,
    /// New maximum age (`Some(None)` clears it)
    pub age_max: Option<Option<u32>>,
    /// New page length
    pub size: Option<u32>,
    /// New offset
    pub from: Option<u32>,
    /// New sort expression (`Some(None)` clears it)
    pub sort: Option<Option<String>>,
    /// New id restriction (`Some(None)` clears it)
    pub ids: Option<Option<Vec<DogId>>>,
}

impl SearchPatch {
    /// Set the breed filter.
    pub fn breeds<I, S>(mut self, breeds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.breeds = Some(breeds.into_iter().map(Into::into).collect());
        self
    }

    /// Set the zip code filter.
    pub fn zip_codes<I, S>(mut self, zip_codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.zip_codes = Some(zip_codes.into_iter().map(Into::into).collect());
        self
    }

    /// Set or clear the minimum age.
    pub fn age_min(mut self, age: Option<u32>) -> Self {
        self.age_min = Some(age);
        self
    }

    /// Set or clear the maximum age.
    pub fn age_max(mut self, age: Option<u32>) -> Self {
        self.age_max = Some(age);
        self
    }

    /// Set the page length.
    pub fn size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the offset.
    pub fn from(mut self, from: u32) -> Self {
        self.from = Some(from);
        self
    }

    /// Set or clear the sort expression.
    pub fn sort(mut self, sort: Option<String>) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Set or clear the id restriction.
    pub fn ids(mut self, ids: Option<Vec<DogId>>) -> Self {
        self.ids = Some(ids);
        self
    }
}

/// How the catalog fetch obtains its page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchPlan {
    /// Search ids by filter, then fetch the dogs
    ByFilter(SearchQuery),
    /// Fetch this page of a fixed id restriction directly
    ByIds {
        /// Ids on the requested page, in restriction order
        ids: Vec<DogId>,
        /// Size of the whole restriction
        total: u64,
    },
}

/// Filter panel mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// No mode-specific filter
    #[default]
    All,
    /// Breed checkboxes
    Breed,
    /// Zip code list
    ZipCode,
    /// Age range
    Age,
    /// Only favorited dogs
    Favorites,
}

/// Search parameters plus the raw filter inputs the user typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchState {
    /// Parameters the catalog is fetched with
    pub params: SearchParams,
    /// Active filter mode
    pub filter: FilterKind,
    /// Zip code text area, one zip code per line
    pub zip_input: String,
    /// Minimum age field (digits only)
    pub age_min_input: String,
    /// Maximum age field (digits only)
    pub age_max_input: String,
}

impl SearchState {
    /// Empty search with the given page length.
    #[must_use]
    pub fn new(size: u32) -> Self {
        Self {
            params: SearchParams::new(size),
            ..Self::default()
        }
    }

    /// Zero-based index of the current page.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.params.page()
    }
}

/// Strip everything but ASCII digits.
#[must_use]
pub fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Parse an age field; empty or out-of-range input means no bound.
#[must_use]
pub fn parse_age(input: &str) -> Option<u32> {
    let digits = digits_only(input);
    if digits.is_empty() {
        None
    } else {
        digits.parse().ok()
    }
}

/// Parse the zip code text area: one zip code per line, digits only,
/// blank lines dropped.
#[must_use]
pub fn parse_zip_codes(input: &str) -> BTreeSet<String> {
    input
        .lines()
        .map(digits_only)
        .filter(|zip| !zip.is_empty())
        .collect()
}

/// Check a sort expression of the form `field:asc` or `field:desc`.
#[must_use]
pub fn is_valid_sort(sort: &str) -> bool {
    sort.split_once(':').is_some_and(|(field, direction)| {
        SORT_FIELDS.contains(&field) && matches!(direction, "asc" | "desc")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paged(from: u32) -> SearchParams {
        let mut params = SearchParams::new(25);
        params.from = from;
        params
    }

    #[test]
    fn test_filter_change_resets_offset() {
        let mut params = paged(50);

        assert!(params.apply(SearchPatch::default().breeds(["Poodle"])));
        assert_eq!(params.from, 0);
        assert_eq!(params.page(), 0);
    }

    #[test]
    fn test_filter_change_wins_over_explicit_offset() {
        let mut params = paged(0);

        params.apply(SearchPatch::default().age_min(Some(2)).from(75));
        assert_eq!(params.from, 0);
    }

    #[test]
    fn test_page_change_keeps_filters() {
        let mut params = paged(0);
        params.apply(SearchPatch::default().breeds(["Pug"]));

        assert!(params.apply(SearchPatch::default().from(50)));
        assert_eq!(params.from, 50);
        assert_eq!(params.page(), 2);
        assert!(params.breeds.contains("Pug"));
    }

    #[test]
    fn test_rows_per_page_change_returns_to_first_page() {
        let mut params = paged(0);

        params.apply(SearchPatch::default().size(50).from(0));
        assert_eq!((params.from, params.size), (0, 50));
    }

    #[test]
    fn test_size_change_realigns_offset() {
        let mut params = paged(75);

        params.apply(SearchPatch::default().size(50));
        assert_eq!(params.from, 50);
    }

    #[test]
    fn test_unchanged_patch_reports_no_change() {
        let mut params = paged(25);
        assert!(!params.apply(SearchPatch::default().from(25)));
        assert!(!params.apply(SearchPatch::default()));
        assert_eq!(params.from, 25);
    }

    #[test]
    fn test_fetch_plan_drops_empty_fields() {
        let plan = SearchParams::new(25).fetch_plan();

        assert_eq!(
            plan,
            FetchPlan::ByFilter(SearchQuery {
                size: Some(25),
                from: Some(0),
                ..SearchQuery::default()
            })
        );
    }

    #[test]
    fn test_id_restriction_bypasses_filters() {
        let mut params = SearchParams::new(2);
        params.apply(SearchPatch::default().breeds(["Poodle"]).age_max(Some(3)));
        params.apply(
            SearchPatch::default().ids(Some(vec!["a".into(), "b".into(), "c".into()])),
        );

        assert_eq!(
            params.fetch_plan(),
            FetchPlan::ByIds {
                ids: vec!["a".into(), "b".into()],
                total: 3,
            }
        );

        params.apply(SearchPatch::default().from(2));
        assert_eq!(
            params.fetch_plan(),
            FetchPlan::ByIds {
                ids: vec!["c".into()],
                total: 3,
            }
        );
    }

    #[test]
    fn test_empty_restriction_yields_empty_page() {
        let mut params = SearchParams::new(25);
        params.apply(SearchPatch::default().ids(Some(Vec::new())));

        assert_eq!(
            params.fetch_plan(),
            FetchPlan::ByIds {
                ids: Vec::new(),
                total: 0,
            }
        );
    }

    #[test]
    fn test_page_count() {
        let params = SearchParams::new(25);
        assert_eq!(params.page_count(0), 0);
        assert_eq!(params.page_count(25), 1);
        assert_eq!(params.page_count(87), 4);
    }

    #[test]
    fn test_zip_input_parsing() {
        let zips = parse_zip_codes("\n10001\n  \n9021a0\n10001\n");
        assert_eq!(
            zips.into_iter().collect::<Vec<_>>(),
            vec!["10001".to_string(), "90210".to_string()]
        );
        assert!(parse_zip_codes("").is_empty());
        assert!(parse_zip_codes("\n\n").is_empty());
    }

    #[test]
    fn test_age_input_parsing() {
        assert_eq!(parse_age(""), None);
        assert_eq!(parse_age("1a2"), Some(12));
        assert_eq!(parse_age("abc"), None);
        assert_eq!(parse_age("99999999999"), None);
    }

    #[test]
    fn test_sort_validation() {
        assert!(is_valid_sort("breed:asc"));
        assert!(is_valid_sort("age:desc"));
        assert!(!is_valid_sort("breed"));
        assert!(!is_valid_sort("color:asc"));
        assert!(!is_valid_sort("name:up"));
    }
}
