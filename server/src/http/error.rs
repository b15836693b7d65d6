use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::ErrorResponse;

#[derive(Debug)]
pub enum ApiError {
    /// Requested identifier absent. Surfaced as 404, never retried.
    NotFound,
    /// Malformed request: unparsable body or missing upload part.
    BadRequest(String),
    /// Store or blob layer fault. Single attempt; the caller must resubmit.
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
