mod application;
mod domain;
mod infrastructure;
mod presentation;

use dotenv::dotenv;

use crate::infrastructure::{AppConfig, AppContainer};

#[tokio::main]
async fn main() {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run().await {
        tracing::error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    tracing::info!(
        "Starting {} v{} on {}:{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.host,
        config.port
    );

    let container = AppContainer::new(&config).await?;
    container.http_server().run().await
}
