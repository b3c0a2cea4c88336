//! Errors returned to HTTP clients.

use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use super::handlers::ErrorResponse;

/// Request failures surfaced as JSON error payloads.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The body was absent or not a JSON object.
    #[error("Invalid item")]
    InvalidItem,

    /// The body claimed to be JSON but did not parse.
    #[error("{0}")]
    MalformedJson(#[from] serde_json::Error),

    /// The body could not be read (for example, over the size limit).
    #[error("{0}")]
    Body(#[from] BytesRejection),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidItem | ApiError::MalformedJson(_) => StatusCode::BAD_REQUEST,
            ApiError::Body(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
