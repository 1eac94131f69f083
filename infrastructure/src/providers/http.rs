//! Shared HTTP plumbing for provider adapters

use council_application::BackendError;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Connection timeout, independent of the per-adapter request timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest provider error body quoted in a [`BackendError`]
const ERROR_BODY_LIMIT: usize = 300;

/// Build a client whose every request is bounded by `timeout`
pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
}

/// Send a prepared request and decode a successful JSON body as `T`.
///
/// Every failure, whether transport, HTTP status or decode, becomes a
/// [`BackendError`] labelled with the calling backend.
pub(crate) async fn send_json<T: DeserializeOwned>(
    label: &str,
    request: RequestBuilder,
) -> Result<T, BackendError> {
    let response = request
        .send()
        .await
        .map_err(|e| transport_error(label, &e))?;

    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .map_err(|e| transport_error(label, &e))?;
    debug!(backend = label, status, bytes = body.len(), "Provider responded");

    if !(200..300).contains(&status) {
        return Err(status_error(label, status, &body));
    }

    serde_json::from_str(&body).map_err(|e| BackendError::malformed(label, e))
}

fn transport_error(label: &str, error: &reqwest::Error) -> BackendError {
    if error.is_timeout() {
        BackendError::timeout(label)
    } else {
        BackendError::transport(label, error)
    }
}

/// Map a non-success HTTP status to a backend error
pub(crate) fn status_error(label: &str, status: u16, body: &str) -> BackendError {
    let detail = format!("HTTP {}: {}", status, truncate(body.trim(), ERROR_BODY_LIMIT));
    match status {
        401 | 403 => BackendError::auth(label, detail),
        429 => BackendError::rate_limited(label, detail),
        408 | 504 => BackendError::timeout(label),
        _ => BackendError::new(label, detail),
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
