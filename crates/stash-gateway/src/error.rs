//! API error type and its HTTP mapping

use axum::extract::multipart::MultipartError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use stash_store::StoreError;
use thiserror::Error;

/// JSON body returned for every failed request
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Errors surfaced by the request handlers
#[derive(Error, Debug)]
pub enum ApiError {
    /// Client sent an unusable request (bad multipart framing, missing
    /// `file` field, part without a content type)
    #[error("{0}")]
    MalformedRequest(String),

    /// Storage backend failure, message carried verbatim
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Server-side failure outside the storage backend
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRequest(message.into())
    }

    /// HTTP status for this error. Object-not-found maps to 404; every
    /// other storage failure is reported as 500 with the backend message.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            Self::Store(err) if err.is_not_found() => StatusCode::NOT_FOUND,
            Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self::MalformedRequest(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(%status, error = %message, "request failed");
        } else {
            tracing::debug!(%status, error = %message, "request rejected");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_request_is_bad_request() {
        let err = ApiError::malformed("no file field");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_object_is_not_found() {
        let err = ApiError::from(StoreError::NotFound("abc".into()));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn backend_failure_is_internal() {
        let err = ApiError::from(StoreError::Backend("connection reset".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("connection reset"));
    }

    #[test]
    fn error_body_has_error_field() {
        let json = serde_json::to_value(ErrorResponse {
            error: "boom".to_string(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"error": "boom"}));
    }
}
