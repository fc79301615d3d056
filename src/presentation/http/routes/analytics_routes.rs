use axum::{Router, routing::get};
use std::sync::Arc;

use crate::presentation::http::handlers::AnalyticsHandler;

pub fn analytics_routes(analytics_handler: Arc<AnalyticsHandler>) -> Router {
    Router::new()
        .route("/analytics", get(AnalyticsHandler::get_analytics))
        .with_state(analytics_handler)
}
