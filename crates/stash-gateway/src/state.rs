//! Application state

use crate::config::GatewayConfig;
use stash_store::ObjectStore;
use std::sync::Arc;

/// State shared across request handlers.
///
/// Constructed once at composition time and handed to the router; the
/// store is immutable after construction, so requests share it without
/// locking.
pub struct AppState {
    /// Gateway configuration
    pub config: GatewayConfig,
    /// Object storage backend
    pub store: Arc<dyn ObjectStore>,
}

impl AppState {
    pub fn new(config: GatewayConfig, store: Arc<dyn ObjectStore>) -> Self {
        Self { config, store }
    }
}
