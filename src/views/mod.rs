mod stays_page;

pub use stays_page::{render_stays_page, PageConfig};
