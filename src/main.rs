use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use shelfwise_api::config::Config;
use shelfwise_api::routes::{create_router, AppState};
use shelfwise_api::services::providers::{
    CatalogProvider, GoogleBooksProvider, OpenLibraryProvider,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let providers: Vec<Arc<dyn CatalogProvider>> = vec![
        Arc::new(GoogleBooksProvider::new(
            config.google_books_api_url.clone(),
            config.google_books_api_key.clone(),
        )),
        Arc::new(OpenLibraryProvider::new(config.open_library_api_url.clone())),
    ];

    let app = create_router(AppState::new(providers));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
