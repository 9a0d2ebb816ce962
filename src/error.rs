//! Error types for the translation server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tokio_rusqlite::rusqlite;

// == Api Error Enum ==
/// Unified error type for the translation server.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Invalid request data (bad input, never retried)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Caller exceeded its request quota for the current window
    #[error("Rate limit exceeded, retry in {retry_after_secs} seconds")]
    RateLimited { retry_after_secs: u64 },

    /// External translation provider failed or timed out
    #[error("Translation failed: {0}")]
    Provider(String),

    /// Backing store could not be reached
    #[error("Storage unavailable: {0}")]
    Storage(tokio_rusqlite::Error),

    /// Schema migration failed to apply
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<tokio_rusqlite::Error<ApiError>> for ApiError {
    fn from(err: tokio_rusqlite::Error<ApiError>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => {
                ApiError::Storage(tokio_rusqlite::Error::ConnectionClosed)
            }
            tokio_rusqlite::Error::Close(c) => ApiError::Storage(tokio_rusqlite::Error::Close(c)),
            _ => ApiError::Storage(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for ApiError {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        ApiError::Storage(err)
    }
}

impl From<rusqlite::Error> for ApiError {
    fn from(err: rusqlite::Error) -> Self {
        ApiError::Storage(tokio_rusqlite::Error::Error(err))
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Provider(_) => StatusCode::BAD_GATEWAY,
            ApiError::Storage(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::MigrationFailed(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "success": false,
            "error": self.to_string(),
        }));

        let mut response = (status, body).into_response();

        if let ApiError::RateLimited { retry_after_secs } = self {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, retry_after_secs.into());
        }

        response
    }
}

// == Result Type Alias ==
/// Convenience Result type for the translation server.
pub type Result<T> = std::result::Result<T, ApiError>;
