//! Server startup and lifecycle

use crate::{routes, AppState, GatewayConfig};
use stash_store::ObjectStore;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Run the gateway server until ctrl-c.
pub async fn run_server(config: GatewayConfig, store: Arc<dyn ObjectStore>) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(config.clone(), store));
    let app = routes::create_router(state);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;

    info!("stash gateway listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
