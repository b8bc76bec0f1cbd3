//! Error → HTTP status mapping.
//!
//! This is the only place in the system where error kinds become status
//! codes. Anything outside the caller-facing taxonomy is logged and reported
//! as a generic 500 with no internal detail in the body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use todo_core::Error;

/// Wrapper so core errors can be returned from handlers with `?`.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self.0 {
            Error::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                msg.clone(),
            ),
            Error::NotFound(_) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                "todo not found".to_string(),
            ),
            Error::InvalidQuery(msg) => (StatusCode::BAD_REQUEST, "INVALID_QUERY", msg.clone()),
            other => {
                tracing::error!(error = %other, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "internal server error".to_string(),
                )
            }
        };
        (status, Json(ErrorBody { code, message })).into_response()
    }
}
