//! HTTP route definitions

use crate::{handlers, AppState};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Create the gateway router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::hello))
        .route("/download/{key}", get(handlers::download))
        .route("/upload", post(handlers::upload))
        // No upload size cap: the spool threshold bounds memory, large
        // bodies spill to disk instead of being rejected.
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
