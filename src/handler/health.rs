use tracing::debug;

/// Liveness probe for GET /v1/health. Does not touch the classifier.
pub async fn health_handler() -> &'static str {
    debug!("Health check requested");
    "Healthy"
}
