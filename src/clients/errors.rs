//! HTTP-specific error types for the AWeber API client.
//!
//! # Error Handling
//!
//! - [`ApiError`]: The service answered with a non-2xx status
//! - [`InvalidHttpRequestError`]: A request failed validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! No request is ever retried: every failure is surfaced once, as is.
//!
//! # Example
//!
//! ```rust,ignore
//! use aweber_api::clients::{HttpError, Transport};
//!
//! match transport.send(request).await {
//!     Ok(response) => println!("Success: {}", response.body),
//!     Err(HttpError::Response(e)) => {
//!         println!("API error {}: {}", e.code, e.message);
//!     }
//!     Err(e) => println!("Transport error: {}", e),
//! }
//! ```

use serde_json::Value;
use thiserror::Error;

/// Error returned when the service answers with a non-2xx status.
///
/// AWeber reports failures as
/// `{"error": {"status": 400, "type": "WebServiceError", "message": "..."}}`;
/// `error_type` and `message` are taken from that envelope when present.
///
/// # Example
///
/// ```rust
/// use aweber_api::clients::ApiError;
/// use serde_json::json;
///
/// let error = ApiError::from_response(
///     400,
///     &json!({"error": {"type": "WebServiceError", "message": "Invalid date"}}),
/// );
/// assert_eq!(error.code, 400);
/// assert_eq!(error.to_string(), "WebServiceError: Invalid date");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{error_type}: {message}")]
pub struct ApiError {
    /// The HTTP status code of the response.
    pub code: u16,
    /// The error type reported by the service (e.g. `WebServiceError`).
    pub error_type: String,
    /// The error message reported by the service.
    pub message: String,
}

impl ApiError {
    /// Builds an `ApiError` from a status code and a decoded response body.
    #[must_use]
    pub fn from_response(code: u16, body: &Value) -> Self {
        let envelope = body.get("error");
        let field = |name: &str| {
            envelope
                .and_then(|e| e.get(name))
                .and_then(Value::as_str)
                .map(ToString::to_string)
        };

        let error_type = field("type");
        let message = field("message");

        if error_type.is_none() && message.is_none() {
            tracing::warn!(
                "Error response with status {} has no error envelope: {}",
                code,
                body
            );
        }

        Self {
            code,
            error_type: error_type.unwrap_or_else(|| "APIError".to_string()),
            message: message.unwrap_or_else(|| match body {
                Value::String(s) if !s.is_empty() => s.clone(),
                _ => format!("Request failed with status {code}"),
            }),
        }
    }
}

/// Error returned when an HTTP request fails validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST or PATCH request was made without data.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires data.
        method: String,
    },

    /// The request URL is empty.
    #[error("Cannot send a request without a URL.")]
    EmptyUrl,

    /// The resolved request URL could not be parsed.
    #[error("Invalid request URL: {url}")]
    InvalidUrl {
        /// The URL that failed to parse.
        url: String,
    },
}

/// Unified error type for all HTTP-related errors.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The service rejected the request (non-2xx status code).
    #[error(transparent)]
    Response(#[from] ApiError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl HttpError {
    /// Returns the HTTP status code when the service answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.code),
            _ => None,
        }
    }
}
