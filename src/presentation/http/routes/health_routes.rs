use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::get};

use crate::presentation::http::dto::{BannerResponseDto, HealthResponseDto};

/// Banner at the API root, answered with and without the trailing slash.
pub fn banner_routes(prefix: &str) -> Router {
    Router::new()
        .route(prefix, get(root_handler))
        .route(&format!("{}/", prefix), get(root_handler))
}

pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

async fn root_handler() -> impl IntoResponse {
    let banner = BannerResponseDto {
        message: "IntelliShare API - Smart File Sharing with AI Intelligence".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "active".to_string(),
    };

    (StatusCode::OK, Json(banner))
}

async fn health_handler() -> impl IntoResponse {
    let health_response = HealthResponseDto {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(health_response))
}
