//! # Stash Gateway
//!
//! Minimal HTTP gateway over an object storage backend.
//!
//! This crate provides:
//! - **Upload**: `POST /upload` accepts a multipart `file` part, streams it
//!   into the backend under a freshly generated key, and returns the key
//! - **Download**: `GET /download/{key}` streams the object back out with
//!   the content type and length recorded at upload time
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              HTTP Clients               │
//! └────────────────────┬────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────┐
//! │             Stash Gateway               │
//! │   (routes, multipart spool, key gen)    │
//! ├─────────────────────────────────────────┤
//! │              stash-store                │
//! │     (S3-compatible get/put adapter)     │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Payloads are never buffered whole in memory: uploads beyond the spool
//! threshold spill to a temp file, downloads stream straight from the
//! backend into the response body.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod spool;
pub mod state;

pub use config::GatewayConfig;
pub use error::{ApiError, ErrorResponse};
pub use routes::create_router;
pub use server::run_server;
pub use state::AppState;
