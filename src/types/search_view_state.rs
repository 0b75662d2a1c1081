use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{search_query::SearchQuery, stay_record::StayRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchFailureKind {
    Configuration,
    Backend,
    Parse,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchFailure {
    pub kind: SearchFailureKind,
    pub message: String,
}

/// Everything the search page needs to render: the inputs of the last search
/// and its outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchViewState {
    pub location: String,
    pub radius_km: u32,
    pub max_results: u32,
    pub stays: Vec<StayRecord>,
    pub error: Option<SearchFailure>,
    pub searched_at: Option<DateTime<Utc>>,
}

impl SearchViewState {
    /// State for a page that has not run a search yet.
    pub fn idle(location: &str, radius_km: u32, max_results: u32) -> Self {
        Self {
            location: location.to_string(),
            radius_km,
            max_results,
            stays: Vec::new(),
            error: None,
            searched_at: None,
        }
    }

    pub fn succeeded(query: SearchQuery, stays: Vec<StayRecord>) -> Self {
        Self {
            location: query.location,
            radius_km: query.radius_km,
            max_results: query.max_results,
            stays,
            error: None,
            searched_at: Some(Utc::now()),
        }
    }

    pub fn failed(query: SearchQuery, failure: SearchFailure) -> Self {
        Self {
            location: query.location,
            radius_km: query.radius_km,
            max_results: query.max_results,
            stays: Vec::new(),
            error: Some(failure),
            searched_at: Some(Utc::now()),
        }
    }

    pub fn has_searched(&self) -> bool {
        self.searched_at.is_some()
    }
}
