//! HTTP error mapping.
//!
//! # Design
//! Every failure leaves the server as `{"error": "<message>"}`. Validation
//! messages are passed through verbatim; internal faults are logged here and
//! replaced with a generic message so no detail reaches the caller.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use todo_core::TodoError;

pub const NOT_FOUND_MESSAGE: &str = "Todo not found";
pub const INTERNAL_MESSAGE: &str = "Server error";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed body or a rejected field.
    #[error("{0}")]
    BadRequest(String),

    /// No todo matches the requested id.
    #[error("Todo not found")]
    NotFound,

    /// Anything unanticipated. The detail is logged, never returned.
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl From<TodoError> for ApiError {
    fn from(err: TodoError) -> Self {
        match err {
            TodoError::NotFound(_) => ApiError::NotFound,
            TodoError::Validation(e) => ApiError::BadRequest(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.as_str()),
            ApiError::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE),
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "unhandled error");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE)
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Response for a handler that panicked; used with `CatchPanicLayer`.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    ApiError::Internal(detail).into_response()
}
