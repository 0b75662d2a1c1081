use std::{sync::Arc, time::Duration};

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    routes::apply_routes,
    services::{
        gemini_client::gemini_service::{GeminiService, GeminiServiceConfig},
        stays_finder::stays_finder_service::StaysFinderService,
    },
    types::app_state::AppState,
    utils::app_config::AppConfig,
    views::PageConfig,
};

pub fn gen_app(config: &AppConfig) -> Result<Router, reqwest::Error> {
    let gemini_service = GeminiService::new(GeminiServiceConfig {
        api_key: config.gemini_api_key.clone(),
        host: config.gemini_host.clone(),
        model: config.gemini_model.clone(),
        timeout: Duration::from_secs(config.gemini_timeout_secs),
    })?;

    let state = AppState {
        stays_finder: StaysFinderService::new(Arc::new(gemini_service)),
        page: PageConfig {
            app_name: config.app_name.clone(),
            default_location: config.default_location.clone(),
            default_radius_km: config.default_radius_km,
            default_max_results: config.default_max_results,
        },
    };

    Ok(apply_routes(Router::new())
        .route("/health", get(health))
        .layer(CorsLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
pub const GEMINI_TEST_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

#[cfg(test)]
pub struct MockApp {
    pub app: Router,
    pub gemini_server: mockito::ServerGuard,
}

#[cfg(test)]
pub fn test_config(gemini_host: &str, gemini_api_key: Option<&str>) -> AppConfig {
    use std::{collections::HashMap, env::VarError};

    let mut env = HashMap::from([("GEMINI_HOST", gemini_host)]);
    if let Some(key) = gemini_api_key {
        env.insert("GEMINI_API_KEY", key);
    }

    AppConfig::from_lookup(|key| {
        env.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    })
    .unwrap()
}

/// App wired to a fresh mock Gemini server with the key `key`.
#[cfg(test)]
pub async fn gen_mock_app() -> MockApp {
    let gemini_server = mockito::Server::new_async().await;
    let app = gen_app(&test_config(&gemini_server.url(), Some("key"))).unwrap();

    MockApp { app, gemini_server }
}

/// Serialized `generateContent` reply whose only candidate says `text`.
#[cfg(test)]
pub fn gemini_candidate_body(text: &str) -> String {
    serde_json::json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
    .to_string()
}
