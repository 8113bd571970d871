use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::{INVALID_JSON_MESSAGE, error_response};
use crate::port::NewsClassifier;

const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error. Please try again later.";

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictResponse {
    is_fake: bool,
    details: String,
}

/// Handler for POST /predict
pub async fn predict_handler(
    State(classifier): State<Arc<dyn NewsClassifier>>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            error!("Prediction failed: {rejection}");
            return error_response(StatusCode::BAD_REQUEST, INVALID_JSON_MESSAGE);
        }
    };

    let Some(text) = request.text.filter(|t| !t.is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, "No text provided");
    };

    info!("Received text for prediction: {text}");

    match classifier.classify(&text) {
        Ok(verdict) => {
            info!(
                real_probability = verdict.real_probability,
                "Prediction result: {}", verdict.label
            );
            Json(PredictResponse {
                is_fake: verdict.label.is_fake(),
                details: format!("Prediction: {}", verdict.label),
            })
            .into_response()
        }
        Err(e) => {
            error!("Prediction failed: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
        }
    }
}
