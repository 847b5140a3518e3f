//! Order Flow Server - Binary Entry Point

use std::sync::Arc;

use order_flow::api::{create_router, AppState};
use order_flow::broadcast::EventBroadcaster;
use order_flow::config::ServerConfig;
use order_flow::menu::MenuCatalog;
use order_flow::store::{JsonlOrderStore, OrderStore};
use tracing_subscriber::EnvFilter;

type MainResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> MainResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("order_flow=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    let store: Arc<dyn OrderStore> = match &config.order_file {
        Some(path) => Arc::new(JsonlOrderStore::open(path)?),
        None => {
            tracing::warn!("ORDER_FILE_PATH is :memory:, orders will not survive a restart");
            Arc::new(JsonlOrderStore::in_memory())
        }
    };
    let menu = MenuCatalog::load(&config.menu_file)?;
    let broadcaster = Arc::new(EventBroadcaster::new(config.broadcast_capacity));

    let state = Arc::new(AppState::new(store, broadcaster, menu, config.lifecycle()));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    tracing::info!(
        address = %config.bind_address(),
        strict_transitions = config.strict_transitions,
        "order server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("order server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        // Without a signal handler, run until the process is killed.
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
