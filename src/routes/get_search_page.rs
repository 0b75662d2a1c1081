use axum::{
    extract::{Query, State},
    response::Html,
};
#[cfg(test)]
use axum_macros::debug_handler;

use super::search_params::SearchPageParams;
use crate::{
    types::{app_state::AppState, search_view_state::SearchViewState},
    views::render_stays_page,
};

#[cfg_attr(test, debug_handler)]
pub async fn get_search_page(
    State(state): State<AppState>,
    query: Option<Query<SearchPageParams>>,
) -> Html<String> {
    let page_params = query.map(|Query(p)| p).unwrap_or_default();
    let params = page_params.into_stays_params(&state.page);
    let radius_km = params.radius_km.unwrap_or(state.page.default_radius_km);
    let max_results = params.max_results.unwrap_or(state.page.default_max_results);

    let view = match params.into_query(&state.page) {
        Some(query) => state.stays_finder.run_search(query).await,
        None => SearchViewState::idle("", radius_km, max_results),
    };

    Html(render_stays_page(
        &state.page,
        state.stays_finder.has_credentials(),
        &view,
    ))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::app::{gemini_candidate_body, gen_mock_app, GEMINI_TEST_PATH};

    async fn body_text(response: axum::response::Response) -> String {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn renders_stay_cards() {
        let mut mock_app = gen_mock_app().await;

        let mock_server = mock_app
            .gemini_server
            .mock("POST", GEMINI_TEST_PATH)
            .with_header("content-type", "application/json")
            .with_body(gemini_candidate_body(
                r#"[{"name":"Hotel <Lux>","type":"Resort","distance_km":2,"price_range":"$$$","rating":5,"amenities":["Spa","Pool"],"description":"Waterfront."}]"#,
            ))
            .create_async()
            .await;

        let response = mock_app
            .app
            .oneshot(
                Request::builder()
                    .uri("/search?location=Miami%20Beach&radius_km=5&max_results=1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        mock_server.assert_async().await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Found 1 stays near Miami Beach"));
        assert!(html.contains("<h3>Hotel &lt;Lux&gt;</h3>"));
        assert!(html.contains("Spa &bull; Pool"));
        assert!(html.contains(r#"value="5""#));
    }

    #[tokio::test]
    async fn blank_location_shows_tip_without_calling_backend() {
        let mut mock_app = gen_mock_app().await;

        let mock_server = mock_app
            .gemini_server
            .mock("POST", GEMINI_TEST_PATH)
            .expect(0)
            .create_async()
            .await;

        let response = mock_app
            .app
            .oneshot(
                Request::builder()
                    .uri("/search?location=&radius_km=10&max_results=8")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        mock_server.assert_async().await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Try searching for:"));
    }

    #[tokio::test]
    async fn backend_failure_renders_notice() {
        let mut mock_app = gen_mock_app().await;

        mock_app
            .gemini_server
            .mock("POST", GEMINI_TEST_PATH)
            .with_status(500)
            .with_body(r#"{"error":{"code":500,"message":"Internal error encountered.","status":"INTERNAL"}}"#)
            .create_async()
            .await;

        let response = mock_app
            .app
            .oneshot(
                Request::builder()
                    .uri("/search?location=Kyoto")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("API error: Internal error encountered."));
        assert!(!html.contains(r#"<div class="stay-card">"#));
    }

    #[tokio::test]
    async fn unusable_numbers_fall_back_to_defaults() {
        let mut mock_app = gen_mock_app().await;

        let mock_server = mock_app
            .gemini_server
            .mock("POST", GEMINI_TEST_PATH)
            .match_body(mockito::Matcher::Regex("within 10 km".to_string()))
            .with_body(gemini_candidate_body("[]"))
            .create_async()
            .await;

        let response = mock_app
            .app
            .oneshot(
                Request::builder()
                    .uri("/search?location=Kyoto&radius_km=0&max_results=")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        mock_server.assert_async().await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("No stays found near Kyoto"));
        assert!(html.contains(r#"min="1" max="50" value="10""#));
        assert!(html.contains(r#"min="1" max="20" value="8""#));
    }
}
