pub mod analytics_routes;
pub mod file_routes;
pub mod health_routes;
pub mod search_routes;
pub mod status_routes;

pub use analytics_routes::*;
pub use file_routes::*;
pub use health_routes::*;
pub use search_routes::*;
pub use status_routes::*;
