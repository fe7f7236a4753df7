//! Request descriptors: what to call and what comes back.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::http::HttpMethod;

/// Request parameters. Sent as the query string for GET and as a JSON object
/// body for every other method.
pub type Parameters = serde_json::Map<String, Value>;

/// Header name/value pairs supplied by the caller.
pub type Headers = BTreeMap<String, String>;

/// Describes one HTTP call and the JSON shape its response decodes into.
///
/// Implementors are plain values; nothing is validated until the request is
/// sent.
pub trait NetworkRequest {
    type Response: DeserializeOwned;

    /// Absolute URL of the call.
    fn endpoint(&self) -> &str;

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn parameters(&self) -> Option<&Parameters> {
        None
    }

    fn headers(&self) -> Option<&Headers> {
        None
    }
}

/// Ad-hoc descriptor for any endpoint, decoding into `T`.
///
/// ```
/// use nettask_core::JsonRequest;
///
/// let request = JsonRequest::<serde_json::Value>::get("https://example.com/todos")
///     .with_parameter("userId", 1)
///     .with_header("Accept", "application/json");
/// ```
pub struct JsonRequest<T> {
    endpoint: String,
    method: HttpMethod,
    parameters: Option<Parameters>,
    headers: Option<Headers>,
    response: PhantomData<fn() -> T>,
}

impl<T> JsonRequest<T> {
    pub fn new(method: HttpMethod, endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
            parameters: None,
            headers: None,
            response: PhantomData,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, endpoint)
    }

    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, endpoint)
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters
            .get_or_insert_with(Parameters::new)
            .insert(key.into(), value.into());
        self
    }

    /// Replaces all parameters. An empty map is kept as "present but empty".
    pub fn with_parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = Some(parameters);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(Headers::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }
}

impl<T: DeserializeOwned> NetworkRequest for JsonRequest<T> {
    type Response = T;

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn method(&self) -> HttpMethod {
        self.method
    }

    fn parameters(&self) -> Option<&Parameters> {
        self.parameters.as_ref()
    }

    fn headers(&self) -> Option<&Headers> {
        self.headers.as_ref()
    }
}

impl<T> Clone for JsonRequest<T> {
    fn clone(&self) -> Self {
        Self {
            endpoint: self.endpoint.clone(),
            method: self.method,
            parameters: self.parameters.clone(),
            headers: self.headers.clone(),
            response: PhantomData,
        }
    }
}

impl<T> fmt::Debug for JsonRequest<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonRequest")
            .field("endpoint", &self.endpoint)
            .field("method", &self.method)
            .field("parameters", &self.parameters)
            .field("headers", &self.headers)
            .finish()
    }
}
