pub mod analyze;
pub mod health;
pub mod index;
pub mod predict;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

pub(crate) const INVALID_JSON_MESSAGE: &str = "Invalid JSON payload";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    error: String,
}

/// `{"error": message}` with the given status.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = Json(ErrorResponse {
        error: message.into(),
    });
    (status, body).into_response()
}
