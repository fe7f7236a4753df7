//! Error types for the network client.
//!
//! # Design
//! `NetworkError` has exactly one variant per way a call can fail. Transport
//! and decode failures keep the underlying error as their `source` so callers
//! can inspect it. HTTP status codes are not errors here: a response is only
//! judged by whether its body is present and decodes.

/// Failure reported by a `Transport` implementation.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Failures from transports that have no dedicated variant.
    #[error("{0}")]
    Other(String),
}

/// Errors delivered to the caller of `NetworkClient::send` / `call`.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// The endpoint is not an absolute URL. No request was made.
    #[error("invalid URL {endpoint:?}: {source}")]
    InvalidUrl {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    /// The response arrived without a body, whatever its status.
    #[error("response body is empty")]
    EmptyResponseBody,

    #[error("transport failed: {0}")]
    Transport(#[from] TransportError),

    /// The body is not JSON of the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}
