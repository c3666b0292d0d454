//! Transport error types.

use thiserror::Error;

/// Errors raised while talking to an instructor endpoint.
///
/// None of these are retried.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request could not be sent or its body could not be read.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The request body could not be serialized.
    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The server answered with something that is not JSON.
    #[error("response from {url} (status {status}) is not JSON: {source}")]
    InvalidJson {
        url: String,
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// The base URL cannot be turned into an endpoint URL.
    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),
}
