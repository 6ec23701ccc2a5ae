use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use common::storage::UnconfiguredImageStore;
use tracing::{Level, info};

use encore_server::config::AppConfig;
use encore_server::database::init_db;
use encore_server::seed::seed_tags;
use encore_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let db = init_db(&config.database)
        .await
        .context("Failed to initialise database")?;
    seed_tags(&db).await.context("Failed to seed tags")?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let state = AppState {
        db,
        config,
        image_store: Arc::new(UnconfiguredImageStore),
    };
    let app = encore_server::build_router(state);

    info!("Server running at http://{}", addr);
    info!("API docs at http://{}/swagger-ui", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
