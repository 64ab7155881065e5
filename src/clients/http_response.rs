//! HTTP response types for the AWeber API client.

use std::collections::HashMap;

/// An HTTP response from the AWeber API.
///
/// Header names are lowercased. The body is decoded JSON; non-JSON bodies
/// (such as the form-encoded OAuth token endpoints) are kept as
/// `Value::String`, and empty bodies become `Value::Null`.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: serde_json::Value,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: serde_json::Value) -> Self {
        Self {
            code,
            headers,
            body,
        }
    }

    /// Decodes a raw response body.
    #[must_use]
    pub fn parse_body(text: &str) -> serde_json::Value {
        if text.trim().is_empty() {
            return serde_json::Value::Null;
        }
        serde_json::from_str(text).unwrap_or_else(|_| serde_json::Value::String(text.to_string()))
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the first value of a header, if present.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the `Location` header, set when a resource was created or moved.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.header("location")
    }
}
