//! HTTP transport layer for AWeber API communication.
//!
//! Resources never talk to the network directly: every request is an
//! [`HttpRequest`] handed to a [`Transport`]. The default transport,
//! [`OAuthAdapter`], signs requests with OAuth 1.0a and sends them with
//! `reqwest`. Any other implementation (a recording double in tests, a
//! proxy, a cache) can be swapped in at runtime.
//!
//! # Overview
//!
//! - [`Transport`]: The injectable request/response seam
//! - [`OAuthAdapter`]: The signed `reqwest` implementation
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A decoded response from the API
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PATCH, DELETE)
//! - [`HttpError`]: Everything that can go wrong while sending
//!
//! # Example
//!
//! ```rust,ignore
//! use aweber_api::clients::{HttpMethod, HttpRequest, OAuthAdapter, Transport};
//! use aweber_api::AWeberConfig;
//!
//! let adapter = OAuthAdapter::new(&config);
//! let request = HttpRequest::builder(HttpMethod::Get, "/accounts")
//!     .build()
//!     .unwrap();
//!
//! let response = adapter.send(request).await?;
//! ```

mod errors;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{ApiError, HttpError, InvalidHttpRequestError};
pub use http_client::{OAuthAdapter, Transport, SDK_VERSION};
pub use http_request::{encode_query, value_to_param, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
