use serde::{Deserialize, Serialize};

/// One accommodation entry as returned by the generative backend.
///
/// Every field is optional on input. Absent fields stay absent here and are
/// only defaulted when rendered.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StayRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub stay_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amenities: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
