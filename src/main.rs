use book_search::config::Config;
use book_search::services::catalog::CatalogClient;
use book_search::services::controller::ViewController;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("book_search=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env();
    info!("Using catalog at {}", config.catalog_url);

    let catalog = Arc::new(CatalogClient::new(config.catalog_url.clone()));
    let controller = ViewController::new(catalog, config.ordering)?;
    let app = book_search::app(Arc::new(Mutex::new(controller)));

    let addr = config.bind_addr();
    info!("Book search starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
