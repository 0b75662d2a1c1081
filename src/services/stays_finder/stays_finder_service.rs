use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, warn};

use super::{
    prompt_builder::build_stays_prompt,
    response_parser::{parse_stays, ParseError},
};
use crate::{
    services::completion_client::{CompletionClient, CompletionError},
    types::{
        search_query::SearchQuery,
        search_view_state::{SearchFailure, SearchFailureKind, SearchViewState},
        stay_record::StayRecord,
    },
};

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("API key not configured. Add GEMINI_API_KEY to your .env file.")]
    Configuration,

    #[error("API error: {0}")]
    Backend(String),

    #[error("Failed to parse AI response. Please try again.")]
    Parse(#[from] ParseError),
}

impl From<CompletionError> for SearchError {
    fn from(e: CompletionError) -> Self {
        match e {
            CompletionError::MissingCredentials => SearchError::Configuration,
            CompletionError::Backend(message) => SearchError::Backend(message),
        }
    }
}

impl SearchError {
    pub fn kind(&self) -> SearchFailureKind {
        match self {
            SearchError::Configuration => SearchFailureKind::Configuration,
            SearchError::Backend(_) => SearchFailureKind::Backend,
            SearchError::Parse(_) => SearchFailureKind::Parse,
        }
    }
}

#[derive(Clone)]
pub struct StaysFinderService {
    completion_client: Arc<dyn CompletionClient>,
}

impl StaysFinderService {
    pub fn new(completion_client: Arc<dyn CompletionClient>) -> Self {
        Self { completion_client }
    }

    pub fn has_credentials(&self) -> bool {
        self.completion_client.has_credentials()
    }

    /// One prompt, one backend call, one parse.
    pub async fn find_stays(&self, query: &SearchQuery) -> Result<Vec<StayRecord>, SearchError> {
        if !self.completion_client.has_credentials() {
            return Err(SearchError::Configuration);
        }

        let prompt = build_stays_prompt(query);
        let raw = self.completion_client.complete(&prompt).await?;

        parse_stays(&raw).map_err(|e| {
            warn!(
                error = %e,
                response_len = raw.len(),
                "Backend response could not be parsed as stays"
            );
            SearchError::from(e)
        })
    }

    /// Runs a search and folds every outcome into a view state. Failures never
    /// escape: each kind becomes a user-visible message with no stays.
    pub async fn run_search(&self, query: SearchQuery) -> SearchViewState {
        info!(
            location = %query.location,
            radius_km = query.radius_km,
            max_results = query.max_results,
            "Searching for stays"
        );

        match self.find_stays(&query).await {
            Ok(stays) => {
                if stays.is_empty() {
                    info!(location = %query.location, "Backend returned zero stays");
                } else {
                    info!(location = %query.location, count = stays.len(), "Found stays");
                }
                SearchViewState::succeeded(query, stays)
            }
            Err(e) => {
                match &e {
                    SearchError::Configuration => warn!("Search attempted without an API key"),
                    SearchError::Backend(message) => error!("Stays search failed: {}", message),
                    SearchError::Parse(_) => {}
                }
                SearchViewState::failed(
                    query,
                    SearchFailure {
                        kind: e.kind(),
                        message: e.to_string(),
                    },
                )
            }
        }
    }
}
