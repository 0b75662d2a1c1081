use serde::Deserialize;
use tracing::warn;
use validator::Validate;

use crate::{types::search_query::SearchQuery, views::PageConfig};

/// Query-string form of a search. Omitted numbers fall back to the configured
/// defaults.
#[derive(Validate, Deserialize, Debug)]
pub struct SearchStaysParams {
    #[serde(default)]
    pub location: String,

    #[validate(range(min = 1, message = "Must be greater than zero"))]
    pub radius_km: Option<u32>,

    #[validate(range(min = 1, message = "Must be greater than zero"))]
    pub max_results: Option<u32>,
}

impl SearchStaysParams {
    /// `None` when the location is blank.
    pub fn into_query(self, page: &PageConfig) -> Option<SearchQuery> {
        let location = self.location.trim();
        if location.is_empty() {
            return None;
        }

        Some(SearchQuery {
            location: location.to_string(),
            radius_km: self.radius_km.unwrap_or(page.default_radius_km),
            max_results: self.max_results.unwrap_or(page.default_max_results),
        })
    }
}

/// Query-string form of a search coming from the HTML page. Nothing here can
/// be rejected: unusable numbers fall back to the configured defaults.
#[derive(Deserialize, Debug, Default)]
pub struct SearchPageParams {
    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub radius_km: Option<String>,

    #[serde(default)]
    pub max_results: Option<String>,
}

fn positive_or_default(field: &str, raw: Option<&str>, default: u32) -> u32 {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return default;
    };

    match raw.parse::<u32>() {
        Ok(value) if value > 0 => value,
        _ => {
            warn!(field, value = raw, default, "Ignoring unusable search parameter");
            default
        }
    }
}

impl SearchPageParams {
    pub fn into_stays_params(self, page: &PageConfig) -> SearchStaysParams {
        SearchStaysParams {
            location: self.location.unwrap_or_default(),
            radius_km: Some(positive_or_default(
                "radius_km",
                self.radius_km.as_deref(),
                page.default_radius_km,
            )),
            max_results: Some(positive_or_default(
                "max_results",
                self.max_results.as_deref(),
                page.default_max_results,
            )),
        }
    }
}
