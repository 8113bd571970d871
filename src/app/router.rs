use crate::handler::analyze::analyze_handler;
use crate::handler::health::health_handler;
use crate::handler::index::{index_handler, script_handler};
use crate::handler::predict::predict_handler;
use crate::port::NewsClassifier;
use axum::Router;
use axum::routing::{get, post};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the HTTP router (homepage, health, URL analysis, prediction).
pub fn main_router(classifier: Arc<dyn NewsClassifier>) -> Router {
    let pages_router = Router::new()
        .route("/", get(index_handler))
        .route("/static/script.js", get(script_handler));

    let v1_health_router = Router::new().route("/v1/health", get(health_handler));

    let analyze_router = Router::new().route("/analyze", post(analyze_handler));

    let predict_router = Router::new()
        .route("/predict", post(predict_handler))
        .with_state(classifier);

    Router::new()
        .merge(pages_router)
        .merge(v1_health_router)
        .merge(analyze_router)
        .merge(predict_router)
        .layer(TraceLayer::new_for_http())
}
