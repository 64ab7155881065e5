//! HTTP request types for the AWeber API client.
//!
//! This module provides the [`HttpRequest`] type and its builder for
//! constructing requests to the AWeber API.

use std::fmt;

use serde_json::{Map, Value};

use crate::auth::oauth::OAuthToken;
use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods used by the AWeber API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources and custom actions.
    Post,
    /// HTTP PATCH method for partial updates.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Patch => write!(f, "patch"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// An HTTP request to be sent to the AWeber API.
///
/// `url` is either a resource path relative to the API base
/// (`/accounts/1/lists`) or an absolute URL, and may already carry a query
/// string (search collections do). `query` holds additional parameters
/// appended after it.
///
/// # Example
///
/// ```rust
/// use aweber_api::clients::{HttpRequest, HttpMethod};
/// use serde_json::json;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "/accounts/1/lists")
///     .query_param("ws.start", "20")
///     .query_param("ws.size", "20")
///     .build()
///     .unwrap();
/// assert_eq!(request.full_url(), "/accounts/1/lists?ws.start=20&ws.size=20");
///
/// let request = HttpRequest::builder(HttpMethod::Patch, "/accounts/1/lists/1/subscribers/1")
///     .data(json!({"name": "Randy Rhodes"}).as_object().unwrap().clone())
///     .build()
///     .unwrap();
/// assert!(request.data.is_some());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The resource path or absolute URL, possibly with a query string.
    pub url: String,
    /// Additional query parameters, in insertion order.
    pub query: Vec<(String, String)>,
    /// The request data, if any.
    pub data: Option<Map<String, Value>>,
    /// Token to sign with instead of the transport's configured one.
    pub token: Option<OAuthToken>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, url: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, url)
    }

    /// Returns the URL with `query` appended.
    #[must_use]
    pub fn full_url(&self) -> String {
        if self.query.is_empty() {
            return self.url.clone();
        }
        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{separator}{}", self.url, encode_query(&self.query))
    }

    /// Validates the request, ensuring it meets all requirements.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if:
    /// - `url` is empty
    /// - `http_method` is `Post` or `Patch` but `data` is `None`
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if self.url.is_empty() {
            return Err(InvalidHttpRequestError::EmptyUrl);
        }

        if matches!(self.http_method, HttpMethod::Post | HttpMethod::Patch) && self.data.is_none() {
            return Err(InvalidHttpRequestError::MissingBody {
                method: self.http_method.to_string(),
            });
        }

        Ok(())
    }
}

/// Encodes parameters as `k=v&k=v` using RFC 3986 percent-encoding.
#[must_use]
pub fn encode_query<K: AsRef<str>, V: AsRef<str>>(params: &[(K, V)]) -> String {
    params
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                urlencoding::encode(k.as_ref()),
                urlencoding::encode(v.as_ref())
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Renders a JSON value as a form or query parameter value.
#[must_use]
pub fn value_to_param(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Builder for constructing [`HttpRequest`] instances.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    url: String,
    query: Vec<(String, String)>,
    data: Option<Map<String, Value>>,
    token: Option<OAuthToken>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            http_method: method,
            url: url.into(),
            query: Vec::new(),
            data: None,
            token: None,
        }
    }

    /// Sets the request data.
    #[must_use]
    pub fn data(mut self, data: Map<String, Value>) -> Self {
        self.data = Some(data);
        self
    }

    /// Adds a single query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Signs this request with the given token.
    #[must_use]
    pub fn token(mut self, token: OAuthToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            url: self.url,
            query: self.query,
            data: self.data,
            token: self.token,
        };
        request.verify()?;
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_http_method_display() {
        assert_eq!(HttpMethod::Get.to_string(), "get");
        assert_eq!(HttpMethod::Post.to_string(), "post");
        assert_eq!(HttpMethod::Patch.to_string(), "patch");
        assert_eq!(HttpMethod::Delete.to_string(), "delete");
        assert_eq!(HttpMethod::Patch.as_str(), "PATCH");
    }

    #[test]
    fn test_builder_creates_valid_get_request() {
        let request = HttpRequest::builder(HttpMethod::Get, "/accounts/1")
            .build()
            .unwrap();

        assert_eq!(request.http_method, HttpMethod::Get);
        assert_eq!(request.url, "/accounts/1");
        assert!(request.data.is_none());
        assert!(request.token.is_none());
    }

    #[test]
    fn test_verify_requires_data_for_post_and_patch() {
        let result = HttpRequest::builder(HttpMethod::Post, "/accounts/1").build();
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::MissingBody { method }) if method == "post"
        ));

        let result = HttpRequest::builder(HttpMethod::Patch, "/accounts/1").build();
        assert!(matches!(
            result,
            Err(InvalidHttpRequestError::MissingBody { method }) if method == "patch"
        ));
    }

    #[test]
    fn test_verify_accepts_empty_data_for_post() {
        let request = HttpRequest::builder(HttpMethod::Post, "/broadcasts/2/cancel")
            .data(Map::new())
            .build()
            .unwrap();
        assert_eq!(request.data, Some(Map::new()));
    }

    #[test]
    fn test_verify_rejects_empty_url() {
        let result = HttpRequest::builder(HttpMethod::Get, "").build();
        assert!(matches!(result, Err(InvalidHttpRequestError::EmptyUrl)));
    }

    #[test]
    fn test_full_url_appends_to_existing_query() {
        let request = HttpRequest::builder(HttpMethod::Get, "/accounts/1?ws.op=findSubscribers")
            .query_param("ws.show", "total_size")
            .build()
            .unwrap();
        assert_eq!(
            request.full_url(),
            "/accounts/1?ws.op=findSubscribers&ws.show=total_size"
        );
    }

    #[test]
    fn test_encode_query_preserves_order_and_encodes() {
        let query = encode_query(&[("ws.op", "find"), ("email", "joe@example.com")]);
        assert_eq!(query, "ws.op=find&email=joe%40example.com");
    }

    #[test]
    fn test_value_to_param() {
        assert_eq!(value_to_param(&json!("text")), "text");
        assert_eq!(value_to_param(&json!(42)), "42");
        assert_eq!(value_to_param(&json!(true)), "true");
        assert_eq!(value_to_param(&Value::Null), "");
    }
}
