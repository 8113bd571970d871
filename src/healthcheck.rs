//! Probe used by the `verity healthcheck` subcommand.
//!
//! Container images without a shell or curl call the binary itself to check
//! that the local server answers on `/v1/health`.
use std::time::Duration;

use thiserror::Error;

use crate::config::DEFAULT_HTTP_PORT;

const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Error, Debug)]
pub enum HealthcheckError {
    #[error("Failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Health endpoint returned status: {0}")]
    Status(reqwest::StatusCode),
}

/// Check the server on the default port (5000).
pub async fn healthcheck() -> Result<(), HealthcheckError> {
    healthcheck_with_port(DEFAULT_HTTP_PORT).await
}

/// Check the server listening on `port` on the loopback interface.
pub async fn healthcheck_with_port(port: u16) -> Result<(), HealthcheckError> {
    let client = reqwest::Client::builder()
        .timeout(PROBE_TIMEOUT)
        .build()
        .map_err(HealthcheckError::Client)?;

    let url = format!("http://127.0.0.1:{port}/v1/health");
    let resp = client
        .get(&url)
        .send()
        .await
        .map_err(|source| HealthcheckError::Request {
            url: url.clone(),
            source,
        })?;

    let status = resp.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(HealthcheckError::Status(status))
    }
}
