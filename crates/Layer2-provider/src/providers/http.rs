//! Shared HTTP plumbing for the backends

use crate::error::ProviderError;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Backend-specific error body parser
pub(crate) type ErrorParser = fn(StatusCode, &str) -> ProviderError;

pub(crate) fn client(timeout: Duration) -> Result<Client, ProviderError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::NotConfigured(format!("Failed to create HTTP client: {}", e)))
}

/// Send a prepared JSON request and decode the success body
pub(crate) async fn send_json<R: DeserializeOwned>(
    backend: &str,
    request: RequestBuilder,
    parse_error: ErrorParser,
) -> Result<R, ProviderError> {
    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::warn!(backend = backend, status = %status, "request failed");
        return Err(parse_error(status, &body));
    }

    Ok(response.json::<R>().await?)
}
