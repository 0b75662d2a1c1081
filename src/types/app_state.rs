use crate::{services::stays_finder::stays_finder_service::StaysFinderService, views::PageConfig};

#[derive(Clone)]
pub struct AppState {
    pub stays_finder: StaysFinderService,
    pub page: PageConfig,
}
