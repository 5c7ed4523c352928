// Reusable components live here.

pub mod analytics_panel;
pub mod error_banner;
pub mod loading_spinner;
pub mod pagination;
pub mod stats_card;
pub mod status_badge;
