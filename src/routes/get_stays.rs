use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
#[cfg(test)]
use axum_macros::debug_handler;

use super::search_params::SearchStaysParams;
use crate::{
    types::{app_state::AppState, search_view_state::SearchFailureKind},
    utils::{app_error::AppError, validated_query::ValidatedQuery},
};

fn status_for(kind: SearchFailureKind) -> StatusCode {
    match kind {
        SearchFailureKind::Configuration => StatusCode::SERVICE_UNAVAILABLE,
        SearchFailureKind::Backend | SearchFailureKind::Parse => StatusCode::BAD_GATEWAY,
    }
}

#[cfg_attr(test, debug_handler)]
pub async fn get_stays(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<SearchStaysParams>,
) -> Result<Response, AppError> {
    let query = params
        .into_query(&state.page)
        .ok_or_else(|| AppError::bad_request("Invalid query: location must not be blank"))?;

    let view = state.stays_finder.run_search(query).await;
    let status = view
        .error
        .as_ref()
        .map(|f| status_for(f.kind))
        .unwrap_or(StatusCode::OK);

    Ok((status, Json(view)).into_response())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use tower::ServiceExt;
    use tracing_test::traced_test;

    use crate::{
        app::{gemini_candidate_body, gen_app, gen_mock_app, test_config, GEMINI_TEST_PATH},
        types::search_view_state::{SearchFailureKind, SearchViewState},
        utils::app_error::AppErrorResponse,
    };

    async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn returns_parsed_stays() {
        let mut mock_app = gen_mock_app().await;

        let mock_server = mock_app
            .gemini_server
            .mock("POST", GEMINI_TEST_PATH)
            .match_header("x-goog-api-key", "key")
            .match_body(mockito::Matcher::Regex("Lisbon".to_string()))
            .with_header("content-type", "application/json")
            .with_body(gemini_candidate_body(
                "```json\n[{\"name\":\"Inn A\",\"rating\":4.5},{\"name\":\"Inn B\"}]\n```",
            ))
            .create_async()
            .await;

        let (status, body) = get(
            mock_app.app,
            "/api/stays?location=Lisbon&radius_km=3&max_results=2",
        )
        .await;

        mock_server.assert_async().await;
        assert_eq!(status, StatusCode::OK);

        let view: SearchViewState = serde_json::from_slice(&body).unwrap();
        assert_eq!(view.location, "Lisbon");
        assert_eq!(view.radius_km, 3);
        assert_eq!(view.max_results, 2);
        assert!(view.error.is_none());
        assert_eq!(view.stays.len(), 2);
        assert_eq!(view.stays[0].name.as_deref(), Some("Inn A"));
        assert_eq!(view.stays[0].rating, Some(4.5));
        assert_eq!(view.stays[1].rating, None);
    }

    #[tokio::test]
    async fn absent_fields_are_not_serialized() {
        let mut mock_app = gen_mock_app().await;

        mock_app
            .gemini_server
            .mock("POST", GEMINI_TEST_PATH)
            .with_body(gemini_candidate_body(r#"[{"name":"Inn A"}]"#))
            .create_async()
            .await;

        let (_, body) = get(mock_app.app, "/api/stays?location=Lisbon").await;
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["stays"][0], serde_json::json!({"name": "Inn A"}));
        assert_eq!(json["radius_km"], 10);
        assert_eq!(json["max_results"], 8);
    }

    #[tokio::test]
    async fn zero_results_is_ok() {
        let mut mock_app = gen_mock_app().await;

        mock_app
            .gemini_server
            .mock("POST", GEMINI_TEST_PATH)
            .with_body(gemini_candidate_body("[]"))
            .create_async()
            .await;

        let (status, body) = get(mock_app.app, "/api/stays?location=Atlantis").await;

        assert_eq!(status, StatusCode::OK);
        let view: SearchViewState = serde_json::from_slice(&body).unwrap();
        assert!(view.stays.is_empty());
        assert!(view.error.is_none());
    }

    #[tokio::test]
    #[traced_test]
    async fn unparseable_response_is_bad_gateway() {
        let mut mock_app = gen_mock_app().await;

        mock_app
            .gemini_server
            .mock("POST", GEMINI_TEST_PATH)
            .with_body(gemini_candidate_body("Here are some hotels: Inn A, Inn B"))
            .create_async()
            .await;

        let (status, body) = get(mock_app.app, "/api/stays?location=Lisbon").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let view: SearchViewState = serde_json::from_slice(&body).unwrap();
        assert!(view.stays.is_empty());
        assert_eq!(view.error.unwrap().kind, SearchFailureKind::Parse);
        assert!(logs_contain("could not be parsed"));
    }

    #[tokio::test]
    async fn backend_failure_is_bad_gateway() {
        let mut mock_app = gen_mock_app().await;

        mock_app
            .gemini_server
            .mock("POST", GEMINI_TEST_PATH)
            .with_status(429)
            .with_body(r#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#)
            .create_async()
            .await;

        let (status, body) = get(mock_app.app, "/api/stays?location=Lisbon").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let view: SearchViewState = serde_json::from_slice(&body).unwrap();
        assert!(view.stays.is_empty());
        let failure = view.error.unwrap();
        assert_eq!(failure.kind, SearchFailureKind::Backend);
        assert_eq!(failure.message, "API error: Resource has been exhausted");
    }

    #[tokio::test]
    async fn missing_key_is_service_unavailable_and_skips_backend() {
        let mut server = mockito::Server::new_async().await;
        let mock_server = server
            .mock("POST", GEMINI_TEST_PATH)
            .expect(0)
            .create_async()
            .await;

        let app = gen_app(&test_config(&server.url(), None)).unwrap();
        let (status, body) = get(app, "/api/stays?location=Lisbon").await;

        mock_server.assert_async().await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        let view: SearchViewState = serde_json::from_slice(&body).unwrap();
        assert_eq!(view.error.unwrap().kind, SearchFailureKind::Configuration);
    }

    #[tokio::test]
    async fn rejects_blank_location_and_zero_counts() {
        for uri in [
            "/api/stays?location=%20%20",
            "/api/stays",
            "/api/stays?location=Lisbon&radius_km=0",
            "/api/stays?location=Lisbon&max_results=abc",
        ] {
            let mock_app = gen_mock_app().await;
            let (status, body) = get(mock_app.app, uri).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            let error: AppErrorResponse = serde_json::from_slice(&body).unwrap();
            assert!(error.message.starts_with("Invalid query"), "{uri}: {}", error.message);
        }
    }
}
