use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};
use urlencoding::encode;

use super::types::{
    gemini_generate_content_request::GeminiGenerateContentRequest,
    gemini_generate_content_response::{GeminiErrorResponse, GeminiGenerateContentResponse},
};
use crate::services::completion_client::{CompletionClient, CompletionError};

#[derive(Clone)]
pub struct GeminiServiceConfig {
    pub api_key: Option<String>,
    pub host: String,
    pub model: String,
    pub timeout: Duration,
}

#[derive(Clone)]
pub struct GeminiService {
    config: GeminiServiceConfig,
    client: reqwest::Client,
}

impl GeminiService {
    pub fn new(config: GeminiServiceConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self { config, client })
    }

    fn generate_content_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.host,
            encode(&self.config.model)
        )
    }
}

#[async_trait]
impl CompletionClient for GeminiService {
    fn has_credentials(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn complete(&self, instruction: &str) -> Result<String, CompletionError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(CompletionError::MissingCredentials)?;

        debug!(model = %self.config.model, "Sending generateContent request");

        let resp = self
            .client
            .post(self.generate_content_url())
            .header("x-goog-api-key", api_key)
            .json(&GeminiGenerateContentRequest::json_prompt(instruction))
            .send()
            .await
            .map_err(|e| {
                CompletionError::Backend(format!("Failed to send request: {}", e.without_url()))
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            CompletionError::Backend(format!("Failed to get response body: {}", e.without_url()))
        })?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<GeminiErrorResponse>(&body) {
                Ok(GeminiErrorResponse { error }) => {
                    warn!(
                        %status,
                        code = ?error.code,
                        error_status = ?error.status,
                        "Gemini request failed"
                    );
                    CompletionError::Backend(error.message)
                }
                Err(_) => {
                    warn!(%status, "Gemini request failed with an unrecognized body");
                    CompletionError::Backend(format!("Backend responded with status {}", status))
                }
            });
        }

        let parsed = serde_json::from_str::<GeminiGenerateContentResponse>(&body).map_err(|e| {
            CompletionError::Backend(format!("Unexpected response format: {}", e))
        })?;

        if let Some(reason) = parsed
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return Err(CompletionError::Backend(format!(
                "Prompt was blocked by the backend: {}",
                reason
            )));
        }

        parsed.first_candidate_text().ok_or_else(|| {
            let finish_reason = parsed
                .candidates
                .first()
                .and_then(|c| c.finish_reason.as_deref())
                .unwrap_or("none");
            CompletionError::Backend(format!(
                "Backend returned no candidate text (finish reason: {})",
                finish_reason
            ))
        })
    }
}
