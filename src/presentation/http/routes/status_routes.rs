use axum::{Router, routing::get};
use std::sync::Arc;

use crate::presentation::http::handlers::StatusHandler;

pub fn status_routes(status_handler: Arc<StatusHandler>) -> Router {
    Router::new()
        .route(
            "/status",
            get(StatusHandler::list_status_checks).post(StatusHandler::create_status_check),
        )
        .with_state(status_handler)
}
