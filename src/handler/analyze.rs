use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::{INVALID_JSON_MESSAGE, error_response};

const PLACEHOLDER_RESULT: &str = "URL analysis is coming soon!";

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    result: &'static str,
}

/// Handler for POST /analyze. URL analysis is not implemented; a present URL
/// gets a fixed placeholder.
pub async fn analyze_handler(payload: Result<Json<AnalyzeRequest>, JsonRejection>) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            error!("URL analysis failed: {rejection}");
            return error_response(StatusCode::BAD_REQUEST, INVALID_JSON_MESSAGE);
        }
    };

    let Some(url) = request.url.filter(|u| !u.is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "No URL provided");
    };

    info!("Received URL for analysis: {url}");
    Json(AnalyzeResponse {
        result: PLACEHOLDER_RESULT,
    })
    .into_response()
}
