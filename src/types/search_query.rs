/// A single, immutable search request built from one user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub location: String,
    pub radius_km: u32,
    pub max_results: u32,
}
