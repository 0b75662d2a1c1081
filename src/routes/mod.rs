use axum::{routing::get, Router};

use crate::types::app_state::AppState;

mod get_index;
mod get_search_page;
mod get_stays;
mod search_params;

pub fn apply_routes(app: Router<AppState>) -> Router<AppState> {
    app.route("/", get(get_index::get_index))
        .route("/search", get(get_search_page::get_search_page))
        .route("/api/stays", get(get_stays::get_stays))
}
