use axum::{extract::State, response::Html};

use crate::{
    types::{app_state::AppState, search_view_state::SearchViewState},
    views::render_stays_page,
};

pub async fn get_index(State(state): State<AppState>) -> Html<String> {
    let view = SearchViewState::idle(
        &state.page.default_location,
        state.page.default_radius_km,
        state.page.default_max_results,
    );

    Html(render_stays_page(
        &state.page,
        state.stays_finder.has_credentials(),
        &view,
    ))
}
