use std::sync::Arc;

use carousel_api::{
    config::Config,
    db,
    routes::{create_router, AppState},
    services::{CarouselBuilder, PgStore, Stores},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("carousel_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let pool = db::create_pool(&config.database_url, config.max_db_connections).await?;
    if config.run_migrations {
        db::run_migrations(&pool).await?;
    }

    let stores = Stores::from_backend(Arc::new(PgStore::new(pool)));
    let builder = CarouselBuilder::new(stores, config.carousel_settings());
    let app = create_router(AppState::new(builder));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
