pub mod analytics_handler;
pub mod file_handler;
pub mod search_handler;
pub mod status_handler;

pub use analytics_handler::AnalyticsHandler;
pub use file_handler::FileHandler;
pub use search_handler::SearchHandler;
pub use status_handler::StatusHandler;
