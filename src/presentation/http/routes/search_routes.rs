use axum::{Router, routing::post};
use std::sync::Arc;

use crate::presentation::http::handlers::SearchHandler;

pub fn search_routes(search_handler: Arc<SearchHandler>) -> Router {
    Router::new()
        .route("/search", post(SearchHandler::search_files))
        .with_state(search_handler)
}
