//! Error types for the stash-store crate

use thiserror::Error;

/// Result type alias using `StoreError`
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur during object storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Object key was empty
    #[error("object key must not be empty")]
    EmptyKey,

    /// No content type was supplied for an upload
    #[error("missing content type")]
    MissingContentType,

    /// Object not found in the backend
    #[error("object not found: {0}")]
    NotFound(String),

    /// Any other backend failure (permission, transport, service error).
    /// Carries the backend's rendered message.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// IO error while reading a spooled payload
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Whether this error means the requested object does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}
