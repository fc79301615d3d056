use axum::{Router, extract::DefaultBodyLimit, http::HeaderValue};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::infrastructure::config::{AppConfig, CorsOrigins};
use crate::presentation::http::{
    handlers::{AnalyticsHandler, FileHandler, SearchHandler, StatusHandler},
    routes::{
        analytics_routes, banner_routes, file_routes, health_routes, search_routes,
        status_routes,
    },
};

pub const API_PREFIX: &str = "/api";

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub cors_origins: CorsOrigins,
    pub max_upload_bytes: usize,
}

impl From<&AppConfig> for ServerSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            cors_origins: config.cors_origins.clone(),
            max_upload_bytes: config.max_upload_bytes,
        }
    }
}

pub struct HttpServer {
    file_handler: Arc<FileHandler>,
    search_handler: Arc<SearchHandler>,
    analytics_handler: Arc<AnalyticsHandler>,
    status_handler: Arc<StatusHandler>,
    settings: ServerSettings,
}

impl HttpServer {
    pub fn new(
        file_handler: Arc<FileHandler>,
        search_handler: Arc<SearchHandler>,
        analytics_handler: Arc<AnalyticsHandler>,
        status_handler: Arc<StatusHandler>,
        settings: ServerSettings,
    ) -> Self {
        Self {
            file_handler,
            search_handler,
            analytics_handler,
            status_handler,
            settings,
        }
    }

    pub fn router(&self) -> Router {
        let api = Router::new()
            .merge(file_routes(self.file_handler.clone()))
            .merge(search_routes(self.search_handler.clone()))
            .merge(analytics_routes(self.analytics_handler.clone()))
            .merge(status_routes(self.status_handler.clone()));

        Router::new()
            .merge(health_routes())
            .merge(banner_routes(API_PREFIX))
            .nest(API_PREFIX, api)
            .layer(cors_layer(&self.settings.cors_origins))
            .layer(DefaultBodyLimit::max(self.settings.max_upload_bytes))
            .layer(RequestBodyLimitLayer::new(self.settings.max_upload_bytes))
            .layer(
                TraceLayer::new_for_http()
                    .on_request(
                        |request: &axum::http::Request<axum::body::Body>, _span: &tracing::Span| {
                            tracing::info!(
                                "Received request: {} {}",
                                request.method(),
                                request.uri()
                            );
                        },
                    )
                    .on_response(
                        |response: &axum::http::Response<axum::body::Body>,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::info!(
                                "Response: {} (took {} ms)",
                                response.status(),
                                latency.as_millis()
                            );
                        },
                    )
                    .on_failure(
                        |error: ServerErrorsFailureClass,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::error!(
                                "Request failed: {:?} (took {} ms)",
                                error,
                                latency.as_millis()
                            );
                        },
                    ),
            )
    }

    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();

        let addr: SocketAddr = format!("{}:{}", self.settings.host, self.settings.port).parse()?;
        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let allow_origin = match origins {
        CorsOrigins::Any => AllowOrigin::any(),
        CorsOrigins::List(list) => {
            let values: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                        None
                    }
                })
                .collect();
            AllowOrigin::list(values)
        }
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
