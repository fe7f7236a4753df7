//! Turns request descriptors into HTTP calls and typed results.
//!
//! # Design
//! A call has three stages: `build_request` (descriptor to `HttpRequest`),
//! the `Transport` round-trip, and `parse_response` (`HttpResponse` to a
//! typed value). The first and last stages are pure functions and are public
//! so they can be tested without a network.
//!
//! `NetworkClient` holds only an `Arc<dyn Transport>`. Cloning it is cheap
//! and every call is independent: no queueing, ordering, retries or
//! cancellation.

use std::future::Future;
use std::sync::{Arc, OnceLock};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::NetworkError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::request::{NetworkRequest, Parameters};
use crate::transport::{ReqwestTransport, Transport, TransportConfig};

static SHARED: OnceLock<NetworkClient> = OnceLock::new();

/// Asynchronous client for `NetworkRequest` descriptors.
#[derive(Clone)]
pub struct NetworkClient {
    transport: Arc<dyn Transport>,
}

impl NetworkClient {
    /// Client over a default `reqwest` transport.
    pub fn new() -> Self {
        Self::with_transport(ReqwestTransport::default())
    }

    pub fn with_config(config: &TransportConfig) -> Result<Self, NetworkError> {
        Ok(Self::with_transport(ReqwestTransport::new(config)?))
    }

    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    /// Process-wide client, created on first use.
    ///
    /// Prefer constructing and passing around your own `NetworkClient`; this
    /// exists for call sites that have nowhere to keep one.
    pub fn shared() -> &'static NetworkClient {
        SHARED.get_or_init(NetworkClient::new)
    }

    /// Performs the call described by `request`.
    ///
    /// The request is translated before this returns, so the future borrows
    /// nothing from `request` or `self`.
    pub fn call<R>(
        &self,
        request: &R,
    ) -> impl Future<Output = Result<R::Response, NetworkError>> + Send + 'static
    where
        R: NetworkRequest,
        R::Response: Send + 'static,
    {
        let prepared = build_request(request);
        let transport = Arc::clone(&self.transport);
        async move {
            let http_request = prepared?;
            debug!(method = %http_request.method, url = %http_request.url, "dispatching request");
            let response = transport.execute(http_request).await?;
            parse_response(response)
        }
    }

    /// Performs the call on the current Tokio runtime and hands the outcome
    /// to `completion`.
    ///
    /// `completion` runs exactly once, on a runtime worker, and never before
    /// `send` has returned. Failures that need no network (an invalid URL)
    /// are delivered the same way.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    pub fn send<R, F>(&self, request: &R, completion: F)
    where
        R: NetworkRequest,
        R::Response: Send + 'static,
        F: FnOnce(Result<R::Response, NetworkError>) + Send + 'static,
    {
        let call = self.call(request);
        tokio::spawn(async move {
            completion(call.await);
        });
    }
}

impl Default for NetworkClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NetworkClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkClient").finish_non_exhaustive()
    }
}

/// Translate a descriptor into a wire request.
///
/// For GET, parameters replace the endpoint's query string. For every other
/// method they become a JSON object body. Headers are copied as-is.
pub fn build_request<R: NetworkRequest + ?Sized>(request: &R) -> Result<HttpRequest, NetworkError> {
    let endpoint = request.endpoint();
    let mut url = Url::parse(endpoint).map_err(|source| NetworkError::InvalidUrl {
        endpoint: endpoint.to_string(),
        source,
    })?;
    let method = request.method();

    let mut body = None;
    if let Some(parameters) = request.parameters() {
        if method == HttpMethod::Get {
            replace_query(&mut url, parameters);
        } else {
            body = encode_body(parameters);
        }
    }

    let headers = request
        .headers()
        .map(|headers| {
            headers
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect()
        })
        .unwrap_or_default();

    Ok(HttpRequest {
        method,
        url,
        headers,
        body,
    })
}

/// Decode a response body into `T`. The status code is not consulted.
pub fn parse_response<T: DeserializeOwned>(response: HttpResponse) -> Result<T, NetworkError> {
    if response.body.is_empty() {
        return Err(NetworkError::EmptyResponseBody);
    }
    Ok(serde_json::from_slice(&response.body)?)
}

fn replace_query(url: &mut Url, parameters: &Parameters) {
    if parameters.is_empty() {
        url.set_query(None);
        return;
    }
    url.query_pairs_mut()
        .clear()
        .extend_pairs(parameters.iter().map(|(key, value)| (key, query_value(value))));
}

/// Text form of a parameter value: strings unquoted, everything else as JSON.
fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// A failed encode drops the body rather than failing the call.
fn encode_body(parameters: &Parameters) -> Option<String> {
    match serde_json::to_string(parameters) {
        Ok(body) => Some(body),
        Err(e) => {
            debug!(error = %e, "dropping request body that failed to serialize");
            None
        }
    }
}
