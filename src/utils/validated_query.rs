use std::error::Error;

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use super::app_error::AppError;

/// Query-string extractor that runs `validator` rules before the handler sees
/// the payload. Rejections are 400s with a JSON `{message}` body.
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(data) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| match e.source() {
                Some(source) => AppError::bad_request(&format!("Invalid query: {}", source)),
                None => AppError::bad_request(&format!("Invalid query: {}", e.body_text())),
            })?;

        data.validate()
            .map_err(|e| AppError::bad_request(&format!("Invalid query: {}", e)))?;

        Ok(ValidatedQuery(data))
    }
}
