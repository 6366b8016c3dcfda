//! Sort/filter listing state and its query-string codec
//!
//! The listing state (`page`, `limit`, active sort, active filters) is a
//! value object whose canonical wire form is a URL query string. Encoding
//! and decoding are exact inverses for every state the UI can produce, and
//! decoding is best-effort: malformed input degrades to defaults instead of
//! failing the caller.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default page number, omitted from encoded query strings.
pub const DEFAULT_PAGE: usize = 1;
/// Default page size, omitted from encoded query strings.
pub const DEFAULT_LIMIT: usize = 10;

/// The closed set of sortable project columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    BasicInterest,
    InitialRating,
    CreditDuration,
}

impl SortColumn {
    pub const ALL: [SortColumn; 3] = [
        SortColumn::BasicInterest,
        SortColumn::InitialRating,
        SortColumn::CreditDuration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::BasicInterest => "basic_interest",
            SortColumn::InitialRating => "initial_rating",
            SortColumn::CreditDuration => "credit_duration",
        }
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortColumn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic_interest" => Ok(SortColumn::BasicInterest),
            "initial_rating" => Ok(SortColumn::InitialRating),
            "credit_duration" => Ok(SortColumn::CreditDuration),
            other => Err(format!(
                "invalid sort column: {other}. Valid columns: basic_interest, initial_rating, credit_duration"
            )),
        }
    }
}

/// One active sort entry: a column and its direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub id: SortColumn,
    pub desc: bool,
}

/// The closed set of filterable project fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterId {
    Country,
    InitialRating,
    Purpose,
    CreditDuration,
    CampaignId,
    PrivateId,
}

/// A filter criterion value: a single choice, a multi-select, or a
/// numeric range with optional bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    One(String),
    Many(Vec<String>),
    Range {
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<u32>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<u32>,
    },
}

/// One active filter entry. At most one per `id` is meaningful; later
/// entries win when duplicates appear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub id: FilterId,
    pub value: FilterValue,
}

/// Complete listing state: pagination plus active sort and filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub page: usize,
    pub limit: usize,
    pub sort: Vec<SortSpec>,
    pub filters: Vec<FilterSpec>,
}

impl Default for QueryState {
    fn default() -> Self {
        QueryState {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            sort: Vec::new(),
            filters: Vec::new(),
        }
    }
}

impl QueryState {
    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    /// Changing the page size always returns to the first page.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self.page = DEFAULT_PAGE;
        self
    }

    /// Changing the sort always returns to the first page.
    pub fn with_sort(mut self, sort: Vec<SortSpec>) -> Self {
        self.sort = sort;
        self.page = DEFAULT_PAGE;
        self
    }

    /// Changing the filters always returns to the first page.
    pub fn with_filters(mut self, filters: Vec<FilterSpec>) -> Self {
        self.filters = filters;
        self.page = DEFAULT_PAGE;
        self
    }

    pub fn without_filters(self) -> Self {
        self.with_filters(Vec::new())
    }
}

/// Encode listing state as a URL query string (no leading `?`).
///
/// `page` and `limit` are omitted at their defaults. Each sort and filter
/// entry is serialized as JSON under a repeated `sort[]`/`filters[]` key,
/// percent-encoded, order preserved.
pub fn encode(state: &QueryState) -> String {
    let mut parts: Vec<String> = Vec::new();

    if state.page != DEFAULT_PAGE {
        parts.push(format!("page={}", state.page));
    }

    if state.limit != DEFAULT_LIMIT {
        parts.push(format!("limit={}", state.limit));
    }

    for sort in &state.sort {
        // Serialization of these enum-of-plain-fields types cannot fail.
        if let Ok(json) = serde_json::to_string(sort) {
            parts.push(format!("sort[]={}", urlencoding::encode(&json)));
        }
    }

    for filter in &state.filters {
        if let Ok(json) = serde_json::to_string(filter) {
            parts.push(format!("filters[]={}", urlencoding::encode(&json)));
        }
    }

    parts.join("&")
}

/// Decode a URL query string into listing state.
///
/// Never fails: `page` and `limit` fall back to their defaults when
/// missing, non-numeric, or zero, and `sort[]`/`filters[]` entries that are
/// not valid JSON for a known column or filter are dropped one by one.
/// A leading `?` is accepted.
pub fn decode(query: &str) -> QueryState {
    let mut state = QueryState::default();

    let query = query.strip_prefix('?').unwrap_or(query);

    for pair in query.split('&') {
        let (key, value) = match pair.split_once('=') {
            Some(kv) => kv,
            None => continue,
        };

        let key = match urlencoding::decode(key) {
            Ok(k) => k,
            Err(_) => continue,
        };
        let value = match urlencoding::decode(value) {
            Ok(v) => v,
            Err(_) => continue,
        };

        match key.as_ref() {
            "page" => {
                if let Some(page) = parse_positive(&value) {
                    state.page = page;
                }
            }
            "limit" => {
                if let Some(limit) = parse_positive(&value) {
                    state.limit = limit;
                }
            }
            "sort[]" => {
                if let Ok(sort) = serde_json::from_str::<SortSpec>(&value) {
                    state.sort.push(sort);
                }
            }
            "filters[]" => {
                if let Ok(filter) = serde_json::from_str::<FilterSpec>(&value) {
                    state.filters.push(filter);
                }
            }
            _ => {}
        }
    }

    state
}

fn parse_positive(value: &str) -> Option<usize> {
    value.parse::<usize>().ok().filter(|n| *n >= 1)
}

/// Cycle the sort state for a column: unsorted → ascending → descending →
/// unsorted. A single column is active at a time, so toggling a new column
/// replaces the previous sort entirely.
pub fn toggle_sort(current: &[SortSpec], column: SortColumn) -> Vec<SortSpec> {
    match current.iter().find(|s| s.id == column) {
        None => vec![SortSpec {
            id: column,
            desc: false,
        }],
        Some(existing) if !existing.desc => vec![SortSpec {
            id: column,
            desc: true,
        }],
        Some(_) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn country_filter(codes: &[&str]) -> FilterSpec {
        FilterSpec {
            id: FilterId::Country,
            value: FilterValue::Many(codes.iter().map(|c| c.to_string()).collect()),
        }
    }

    #[test]
    fn test_encode_default_state_is_empty() {
        assert_eq!(encode(&QueryState::default()), "");
    }

    #[test]
    fn test_encode_omits_defaults() {
        let state = QueryState::default().with_page(3);
        assert_eq!(encode(&state), "page=3");

        let state = QueryState {
            page: 1,
            limit: 50,
            sort: Vec::new(),
            filters: Vec::new(),
        };
        assert_eq!(encode(&state), "limit=50");
    }

    #[test]
    fn test_encode_sort_entry() {
        let state = QueryState {
            page: 1,
            limit: 10,
            sort: vec![SortSpec {
                id: SortColumn::BasicInterest,
                desc: true,
            }],
            filters: Vec::new(),
        };

        assert_eq!(
            encode(&state),
            "sort[]=%7B%22id%22%3A%22basic_interest%22%2C%22desc%22%3Atrue%7D"
        );
    }

    #[test]
    fn test_encode_preserves_filter_order() {
        let state = QueryState {
            page: 1,
            limit: 10,
            sort: Vec::new(),
            filters: vec![
                FilterSpec {
                    id: FilterId::Purpose,
                    value: FilterValue::One("refinancing".to_string()),
                },
                country_filter(&["lt"]),
            ],
        };

        let encoded = encode(&state);
        let purpose_at = encoded.find("purpose").unwrap();
        let country_at = encoded.find("country").unwrap();
        assert!(purpose_at < country_at);
    }

    #[test]
    fn test_round_trip_full_state() {
        let state = QueryState {
            page: 3,
            limit: 20,
            sort: vec![SortSpec {
                id: SortColumn::BasicInterest,
                desc: true,
            }],
            filters: vec![country_filter(&["lt", "lv"])],
        };

        assert_eq!(decode(&encode(&state)), state);
    }

    #[test]
    fn test_round_trip_every_filter_shape() {
        let state = QueryState {
            page: 7,
            limit: 100,
            sort: vec![SortSpec {
                id: SortColumn::CreditDuration,
                desc: false,
            }],
            filters: vec![
                country_filter(&["ee"]),
                FilterSpec {
                    id: FilterId::Purpose,
                    value: FilterValue::One("working_capital".to_string()),
                },
                FilterSpec {
                    id: FilterId::CreditDuration,
                    value: FilterValue::Range {
                        min: Some(6),
                        max: None,
                    },
                },
                FilterSpec {
                    id: FilterId::CampaignId,
                    value: FilterValue::One("CMP-19".to_string()),
                },
            ],
        };

        assert_eq!(decode(&encode(&state)), state);
    }

    #[test]
    fn test_round_trip_default_state() {
        assert_eq!(decode(&encode(&QueryState::default())), QueryState::default());
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode(""), QueryState::default());
    }

    #[test]
    fn test_decode_accepts_leading_question_mark() {
        let state = decode("?page=4&limit=20");
        assert_eq!(state.page, 4);
        assert_eq!(state.limit, 20);
    }

    #[test]
    fn test_decode_drops_malformed_entries() {
        let state = decode("sort[]=not-json&filters[]={}");
        assert_eq!(state, QueryState::default());
    }

    #[test]
    fn test_decode_drops_unknown_ids() {
        let state = decode("sort[]=%7B%22id%22%3A%22bogus%22%2C%22desc%22%3Afalse%7D");
        assert!(state.sort.is_empty());

        let state = decode("filters[]=%7B%22id%22%3A%22city%22%2C%22value%22%3A%22vilnius%22%7D");
        assert!(state.filters.is_empty());
    }

    #[test]
    fn test_decode_keeps_well_formed_among_malformed() {
        let query = "sort[]=junk&sort[]=%7B%22id%22%3A%22initial_rating%22%2C%22desc%22%3Afalse%7D";
        let state = decode(query);
        assert_eq!(
            state.sort,
            vec![SortSpec {
                id: SortColumn::InitialRating,
                desc: false,
            }]
        );
    }

    #[test]
    fn test_decode_non_numeric_page_falls_back() {
        let state = decode("page=abc&limit=-5");
        assert_eq!(state.page, DEFAULT_PAGE);
        assert_eq!(state.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_decode_zero_page_falls_back() {
        let state = decode("page=0&limit=0");
        assert_eq!(state.page, DEFAULT_PAGE);
        assert_eq!(state.limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_decode_ignores_unknown_keys_and_bare_tokens() {
        let state = decode("utm_source=mail&noise&page=2");
        assert_eq!(state.page, 2);
        assert!(state.sort.is_empty());
        assert!(state.filters.is_empty());
    }

    #[test]
    fn test_decode_range_with_both_bounds() {
        let query =
            "filters[]=%7B%22id%22%3A%22credit_duration%22%2C%22value%22%3A%7B%22min%22%3A6%2C%22max%22%3A24%7D%7D";
        let state = decode(query);
        assert_eq!(
            state.filters,
            vec![FilterSpec {
                id: FilterId::CreditDuration,
                value: FilterValue::Range {
                    min: Some(6),
                    max: Some(24),
                },
            }]
        );
    }

    #[test]
    fn test_toggle_sort_three_state_cycle() {
        let first = toggle_sort(&[], SortColumn::BasicInterest);
        assert_eq!(
            first,
            vec![SortSpec {
                id: SortColumn::BasicInterest,
                desc: false,
            }]
        );

        let second = toggle_sort(&first, SortColumn::BasicInterest);
        assert_eq!(
            second,
            vec![SortSpec {
                id: SortColumn::BasicInterest,
                desc: true,
            }]
        );

        let third = toggle_sort(&second, SortColumn::BasicInterest);
        assert!(third.is_empty());
    }

    #[test]
    fn test_toggle_sort_replaces_other_column() {
        let current = vec![SortSpec {
            id: SortColumn::BasicInterest,
            desc: true,
        }];

        let toggled = toggle_sort(&current, SortColumn::InitialRating);
        assert_eq!(
            toggled,
            vec![SortSpec {
                id: SortColumn::InitialRating,
                desc: false,
            }]
        );
    }

    #[test]
    fn test_state_changes_reset_page() {
        let state = QueryState::default().with_page(5).with_limit(50);
        assert_eq!(state.page, 1);

        let state = QueryState::default()
            .with_page(5)
            .with_sort(vec![SortSpec {
                id: SortColumn::BasicInterest,
                desc: false,
            }]);
        assert_eq!(state.page, 1);

        let state = QueryState::default()
            .with_page(5)
            .with_filters(vec![country_filter(&["lt"])]);
        assert_eq!(state.page, 1);

        let state = decode("page=5&filters[]=%7B%22id%22%3A%22country%22%2C%22value%22%3A%5B%22lt%22%5D%7D")
            .without_filters();
        assert_eq!(state.page, 1);
        assert!(state.filters.is_empty());
    }

    #[test]
    fn test_sort_column_from_str() {
        assert_eq!(
            "basic_interest".parse::<SortColumn>().unwrap(),
            SortColumn::BasicInterest
        );
        assert!("interest".parse::<SortColumn>().is_err());
    }
}
