use thiserror::Error;

use crate::types::stay_record::StayRecord;

#[derive(Debug, Error)]
#[error("response is not a JSON array of stays: {0}")]
pub struct ParseError(#[from] serde_json::Error);

/// Removes a markdown code fence wrapping the payload, if there is one.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let without_close = without_open
        .trim_end()
        .strip_suffix("```")
        .unwrap_or(without_open);

    without_close.trim()
}

/// Decodes the backend's text into stays, preserving their order.
///
/// Either every record decodes or the whole response is rejected.
pub fn parse_stays(raw: &str) -> Result<Vec<StayRecord>, ParseError> {
    Ok(serde_json::from_str::<Vec<StayRecord>>(strip_code_fence(raw))?)
}
