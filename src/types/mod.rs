pub mod app_state;
pub mod search_query;
pub mod search_view_state;
pub mod stay_record;
