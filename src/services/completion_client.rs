use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompletionError {
    #[error("API key not configured")]
    MissingCredentials,

    #[error("{0}")]
    Backend(String),
}

/// A generative-text backend that answers one instruction with one text
/// payload, asked to be JSON.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Whether a credential is available. A client without one must fail
    /// `complete` with [`CompletionError::MissingCredentials`] before touching
    /// the network.
    fn has_credentials(&self) -> bool;

    async fn complete(&self, instruction: &str) -> Result<String, CompletionError>;
}
