//! Draft filter form state and the builder/parser pair
//!
//! The filter panel edits a draft: plain string fields that only become
//! active [`FilterSpec`] entries when applied. [`build_filters`] and
//! [`parse_draft`] convert between the two representations and are mutual
//! inverses for every combination of fields.

use crate::query::{FilterId, FilterSpec, FilterValue};

/// Rating grades offered by the rating filter, best to worst.
pub const RATING_OPTIONS: [&str; 10] = [
    "AAA", "AA+", "AA", "AA-", "A+", "A", "A-", "BBB+", "BBB", "BBB-",
];

/// Country codes offered by the country filter, with display labels.
pub const COUNTRY_OPTIONS: [(&str, &str); 4] = [
    ("lt", "Lithuania"),
    ("lv", "Latvia"),
    ("ee", "Estonia"),
    ("es", "Spain"),
];

/// Investment purposes offered by the purpose filter, with display labels.
pub const PURPOSE_OPTIONS: [(&str, &str); 5] = [
    ("real_estate_development", "Real estate development"),
    ("refinancing", "Refinancing"),
    ("working_capital", "Working capital"),
    ("real_estate_acquisition", "Real estate acquisition"),
    ("other", "Other"),
];

/// Section titles of the filter panel, in accordion order.
pub const SECTION_TITLES: [&str; 6] = [
    "Country",
    "Initial rating",
    "Purpose",
    "Credit duration (months)",
    "Campaign ID",
    "Private ID",
];

/// Not-yet-applied filter form values. Empty strings and empty lists mean
/// the field is untouched and produces no filter entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterDraft {
    pub countries: Vec<String>,
    pub ratings: Vec<String>,
    pub purpose: String,
    pub credit_duration_min: String,
    pub credit_duration_max: String,
    pub campaign_id: String,
    pub private_id: String,
}

impl FilterDraft {
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
            && self.ratings.is_empty()
            && self.purpose.is_empty()
            && self.credit_duration_min.is_empty()
            && self.credit_duration_max.is_empty()
            && self.campaign_id.is_empty()
            && self.private_id.is_empty()
    }
}

/// Convert a draft into active filter entries, one per non-empty field.
///
/// The two duration bounds fold into a single range filter; the filter is
/// omitted entirely when neither bound parses as a number.
pub fn build_filters(draft: &FilterDraft) -> Vec<FilterSpec> {
    let mut filters = Vec::new();

    if !draft.countries.is_empty() {
        filters.push(FilterSpec {
            id: FilterId::Country,
            value: FilterValue::Many(draft.countries.clone()),
        });
    }

    if !draft.ratings.is_empty() {
        filters.push(FilterSpec {
            id: FilterId::InitialRating,
            value: FilterValue::Many(draft.ratings.clone()),
        });
    }

    if !draft.purpose.is_empty() {
        filters.push(FilterSpec {
            id: FilterId::Purpose,
            value: FilterValue::One(draft.purpose.clone()),
        });
    }

    let min = parse_bound(&draft.credit_duration_min);
    let max = parse_bound(&draft.credit_duration_max);
    if min.is_some() || max.is_some() {
        filters.push(FilterSpec {
            id: FilterId::CreditDuration,
            value: FilterValue::Range { min, max },
        });
    }

    if !draft.campaign_id.is_empty() {
        filters.push(FilterSpec {
            id: FilterId::CampaignId,
            value: FilterValue::One(draft.campaign_id.clone()),
        });
    }

    if !draft.private_id.is_empty() {
        filters.push(FilterSpec {
            id: FilterId::PrivateId,
            value: FilterValue::One(draft.private_id.clone()),
        });
    }

    filters
}

fn parse_bound(field: &str) -> Option<u32> {
    if field.is_empty() {
        return None;
    }
    field.trim().parse().ok()
}

/// Reconstruct a draft from active filter entries.
///
/// Inverse of [`build_filters`]: fields without a filter entry come back
/// empty. Duplicate entries for the same id resolve last-write-wins;
/// entries whose value shape does not fit the field are ignored.
pub fn parse_draft(filters: &[FilterSpec]) -> FilterDraft {
    let mut draft = FilterDraft::default();

    for filter in filters {
        match (filter.id, &filter.value) {
            (FilterId::Country, FilterValue::Many(codes)) => {
                draft.countries = codes.clone();
            }
            (FilterId::Country, FilterValue::One(code)) => {
                draft.countries = vec![code.clone()];
            }
            (FilterId::InitialRating, FilterValue::Many(grades)) => {
                draft.ratings = grades.clone();
            }
            (FilterId::InitialRating, FilterValue::One(grade)) => {
                draft.ratings = vec![grade.clone()];
            }
            (FilterId::Purpose, FilterValue::One(purpose)) => {
                draft.purpose = purpose.clone();
            }
            (FilterId::CreditDuration, FilterValue::Range { min, max }) => {
                draft.credit_duration_min = min.map(|n| n.to_string()).unwrap_or_default();
                draft.credit_duration_max = max.map(|n| n.to_string()).unwrap_or_default();
            }
            (FilterId::CampaignId, FilterValue::One(id)) => {
                draft.campaign_id = id.clone();
            }
            (FilterId::PrivateId, FilterValue::One(id)) => {
                draft.private_id = id.clone();
            }
            _ => {}
        }
    }

    draft
}

/// Filter-panel sections worth expanding for a draft: one index per active
/// field, or just the first section when nothing is active.
pub fn active_sections(draft: &FilterDraft) -> Vec<usize> {
    let mut sections = Vec::new();

    if !draft.countries.is_empty() {
        sections.push(0);
    }
    if !draft.ratings.is_empty() {
        sections.push(1);
    }
    if !draft.purpose.is_empty() {
        sections.push(2);
    }
    if !draft.credit_duration_min.is_empty() || !draft.credit_duration_max.is_empty() {
        sections.push(3);
    }
    if !draft.campaign_id.is_empty() {
        sections.push(4);
    }
    if !draft.private_id.is_empty() {
        sections.push(5);
    }

    if sections.is_empty() {
        sections.push(0);
    }

    sections
}
