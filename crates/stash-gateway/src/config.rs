//! Gateway configuration

/// Upload bytes kept in memory before spilling to a temp file (8 MiB).
/// Governs memory use per request, not an upload size cap.
pub const DEFAULT_SPOOL_THRESHOLD: usize = 8 * 1024 * 1024;

/// Gateway server configuration
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// In-memory threshold for multipart uploads
    pub spool_threshold: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            spool_threshold: DEFAULT_SPOOL_THRESHOLD,
        }
    }
}

impl GatewayConfig {
    /// Get the bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
