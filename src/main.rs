use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use docvault::config::Config;
use docvault::db::Database;
use docvault::storage::LocalBlobStore;
use docvault::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docvault=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting docvault...");

    let config = Arc::new(Config::load()?);
    tracing::info!("Configuration loaded");

    let db = Database::new(&config.database.path).await?;
    db.run_migrations().await?;
    tracing::info!("Database ready at {}", config.database.path);

    let blobs = Arc::new(LocalBlobStore::new(&config.storage.upload_dir));
    tracing::info!("Storing uploads in {}", config.storage.upload_dir);

    let state = AppState {
        db,
        config: config.clone(),
        blobs,
    };

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
