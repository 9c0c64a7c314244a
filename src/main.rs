mod application;
mod config;
mod domain;
mod infrastructure;
mod presentation;

use config::Settings;
use infrastructure::AppContainer;
use presentation::http::HttpServer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let port = settings.port;
    let allowed_origins = settings.allowed_origins.clone();

    let container = AppContainer::new(&settings).await?;

    let server = HttpServer::new(
        container.equipment_handler.clone(),
        container.document_handler.clone(),
        container.retrieval_handler.clone(),
        container.session_handler.clone(),
        allowed_origins,
        port,
    );

    server.run().await
}
