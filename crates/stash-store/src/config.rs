//! Storage backend configuration

use crate::{Result, StoreError};
use std::time::Duration;

/// Bucket every object lives in. The gateway exposes no bucket selection.
pub const DEFAULT_BUCKET: &str = "default";

/// Default per-call deadline for backend operations.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for an S3-compatible storage backend
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Static access key ID
    pub access_key_id: String,
    /// Static secret access key
    pub secret_access_key: String,
    /// Backend region
    pub region: String,
    /// Custom base endpoint (plain HTTP allowed, for local/dev backends)
    pub endpoint_url: String,
    /// Bucket name
    pub bucket: String,
    /// Per-call operation timeout
    pub operation_timeout: Duration,
}

impl StoreConfig {
    /// Build a config from the four required backend settings, with the
    /// fixed bucket and default timeout.
    pub fn from_parts(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
        endpoint_url: impl Into<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: region.into(),
            endpoint_url: endpoint_url.into(),
            bucket: DEFAULT_BUCKET.to_string(),
            operation_timeout: DEFAULT_OPERATION_TIMEOUT,
        }
    }

    /// Check that every required setting is present and non-empty.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("access key ID", &self.access_key_id),
            ("secret access key", &self.secret_access_key),
            ("region", &self.region),
            ("endpoint URL", &self.endpoint_url),
            ("bucket", &self.bucket),
        ];
        for (name, value) in required {
            if value.is_empty() {
                return Err(StoreError::Configuration(format!(
                    "{name} must not be empty"
                )));
            }
        }
        Ok(())
    }
}
