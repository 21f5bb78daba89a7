//! Request handlers

use crate::error::ApiError;
use crate::spool::{self, SpoolError};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::multipart::MultipartRejection,
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// Body of `GET /`
#[derive(Debug, Serialize)]
pub struct GreetingResponse {
    pub message: String,
}

/// Body of a successful `POST /upload`
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub key: String,
}

/// GET / - fixed info payload
pub async fn hello() -> Json<GreetingResponse> {
    Json(GreetingResponse {
        message: "Hello World!".to_string(),
    })
}

/// GET /download/{key} - stream an object out of the backend
///
/// The response body is wired directly to the backend read stream; the
/// object is never buffered whole. Content type and length come from the
/// values recorded at upload time.
pub async fn download(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Response, ApiError> {
    tracing::info!(%key, "downloading object");

    let download = state.store.get(&key).await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, download.content_type)
        .header(header::CONTENT_LENGTH, download.content_length)
        .body(Body::from_stream(download.body))
        .map_err(|e| ApiError::Internal(e.to_string()))
}

/// POST /upload - store a multipart `file` part under a generated key
///
/// The part's declared content type is required; a part without one is a
/// malformed request, not a fall-through to some default.
pub async fn upload(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut multipart = multipart.map_err(|e| ApiError::MalformedRequest(e.body_text()))?;

    let field = loop {
        match multipart.next_field().await? {
            Some(field) if field.name() == Some("file") => break field,
            Some(_) => continue,
            None => {
                return Err(ApiError::malformed("multipart form has no `file` field"));
            }
        }
    };

    let content_type = field
        .content_type()
        .map(str::to_owned)
        .ok_or_else(|| ApiError::malformed("`file` part declares no content type"))?;

    let body = spool::spool_stream(field, state.config.spool_threshold)
        .await
        .map_err(|err| match err {
            SpoolError::Read(e) => ApiError::from(e),
            SpoolError::Io(e) => ApiError::Internal(e.to_string()),
        })?;

    // Keys are random per call, never derived from the filename.
    let key = Uuid::new_v4().to_string();
    let size = body.len();
    state.store.put(&key, body, &content_type).await?;

    tracing::info!(%key, size, %content_type, "stored uploaded object");
    Ok(Json(UploadResponse { key }))
}
