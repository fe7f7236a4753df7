//! Generic asynchronous HTTP client driven by request descriptors.
//!
//! # Overview
//! A caller describes a call with a `NetworkRequest` (endpoint, method,
//! parameters, headers and the JSON shape of the response) and hands it to
//! `NetworkClient`, which performs the call and delivers either the decoded
//! value or a `NetworkError`.
//!
//! # Design
//! - `build_request` and `parse_response` are pure, so request construction
//!   and response decoding are testable without I/O.
//! - All I/O goes through the `Transport` trait; `ReqwestTransport` is the
//!   default.
//! - Results arrive through a future (`call`) or a one-shot continuation
//!   (`send`). Nothing is retried, cached or cancelled.

pub mod client;
pub mod error;
pub mod http;
pub mod request;
pub mod todos;
pub mod transport;

pub use client::{build_request, parse_response, NetworkClient};
pub use error::{NetworkError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, UnknownMethod};
pub use request::{Headers, JsonRequest, NetworkRequest, Parameters};
pub use todos::{CreateTodo, DeleteTodo, Deleted, GetTodo, ListTodos, Todo, UpdateTodo};
pub use transport::{ReqwestTransport, Transport, TransportConfig};
