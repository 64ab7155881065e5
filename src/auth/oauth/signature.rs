//! OAuth 1.0a request signing.
//!
//! This module implements the signing half of OAuth 1.0a (RFC 5849): the
//! percent-encoding rules, the signature base string, HMAC signing and the
//! `Authorization` header that carries the protocol parameters.
//!
//! # Example
//!
//! ```rust
//! use aweber_api::auth::oauth::signature::{percent_encode, signature_base_string};
//!
//! assert_eq!(percent_encode("joe@example.com"), "joe%40example.com");
//!
//! let params = vec![("size".to_string(), "original".to_string())];
//! let base = signature_base_string("GET", "http://photos.example.net/photos", &params);
//! assert_eq!(base, "GET&http%3A%2F%2Fphotos.example.net%2Fphotos&size%3Doriginal");
//! ```

use std::fmt;

use base64::prelude::*;
use hmac::{Hmac, Mac};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha1::Sha1;
use sha2::Sha256;

type HmacSha1 = Hmac<Sha1>;
type HmacSha256 = Hmac<Sha256>;

/// Length of generated nonces.
pub const NONCE_LENGTH: usize = 32;

/// OAuth protocol version sent in every request.
pub const OAUTH_VERSION: &str = "1.0";

/// Supported OAuth 1.0a signature methods.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SignatureMethod {
    /// `HMAC-SHA1`, the method the AWeber API expects.
    #[default]
    HmacSha1,
    /// `HMAC-SHA256`.
    HmacSha256,
}

impl SignatureMethod {
    /// Returns the `oauth_signature_method` value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::HmacSha1 => "HMAC-SHA1",
            Self::HmacSha256 => "HMAC-SHA256",
        }
    }
}

impl fmt::Display for SignatureMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A token and its secret, used both for request tokens and access tokens.
#[derive(Clone, PartialEq, Eq)]
pub struct OAuthToken {
    /// The public token value (`oauth_token`).
    pub token: String,
    /// The token secret, half of the signing key.
    pub secret: String,
}

impl OAuthToken {
    /// Creates a new token pair.
    #[must_use]
    pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for OAuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthToken")
            .field("token", &self.token)
            .field("secret", &"*****")
            .finish()
    }
}

/// Percent-encodes a value using the RFC 3986 unreserved set.
///
/// Only `A-Z a-z 0-9 - . _ ~` pass through unchanged; spaces become `%20`.
#[must_use]
pub fn percent_encode(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Builds the signature base string for a request.
///
/// `base_url` must not contain a query string; every query, form and
/// `oauth_*` parameter belongs in `params`. Parameters are encoded, then
/// sorted by name and value.
#[must_use]
pub fn signature_base_string(method: &str, base_url: &str, params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    let normalized = encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    format!(
        "{}&{}&{}",
        method.to_uppercase(),
        percent_encode(base_url),
        percent_encode(&normalized)
    )
}

/// Signs a base string, returning the base64-encoded digest.
///
/// The key is `consumer_secret&token_secret`, with an empty token secret
/// before a token has been issued.
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn sign(
    method: SignatureMethod,
    base_string: &str,
    consumer_secret: &str,
    token_secret: Option<&str>,
) -> String {
    let key = format!(
        "{}&{}",
        percent_encode(consumer_secret),
        percent_encode(token_secret.unwrap_or_default())
    );

    let digest = match method {
        SignatureMethod::HmacSha1 => {
            let mut mac =
                HmacSha1::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
            mac.update(base_string.as_bytes());
            mac.finalize().into_bytes().to_vec()
        }
        SignatureMethod::HmacSha256 => {
            let mut mac =
                HmacSha256::new_from_slice(key.as_bytes()).expect("HMAC can take key of any size");
            mac.update(base_string.as_bytes());
            mac.finalize().into_bytes().to_vec()
        }
    };

    BASE64_STANDARD.encode(digest)
}

/// Generates a random alphanumeric nonce.
#[must_use]
pub fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LENGTH)
        .map(char::from)
        .collect()
}

/// Returns the current Unix timestamp as a string.
#[must_use]
pub fn timestamp() -> String {
    chrono::Utc::now().timestamp().to_string()
}

/// The `oauth_*` protocol parameters of a single request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OAuthParams {
    /// `oauth_consumer_key`.
    pub consumer_key: String,
    /// `oauth_token`, absent while requesting a request token.
    pub token: Option<String>,
    /// `oauth_nonce`.
    pub nonce: String,
    /// `oauth_timestamp`.
    pub timestamp: String,
    /// `oauth_signature_method`.
    pub signature_method: SignatureMethod,
}

impl OAuthParams {
    /// Creates parameters with a fresh nonce and the current timestamp.
    #[must_use]
    pub fn new(
        consumer_key: impl Into<String>,
        token: Option<String>,
        signature_method: SignatureMethod,
    ) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            token,
            nonce: generate_nonce(),
            timestamp: timestamp(),
            signature_method,
        }
    }

    /// Returns the protocol parameters as name/value pairs (without the signature).
    #[must_use]
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("oauth_consumer_key".to_string(), self.consumer_key.clone()),
            ("oauth_nonce".to_string(), self.nonce.clone()),
            (
                "oauth_signature_method".to_string(),
                self.signature_method.as_str().to_string(),
            ),
            ("oauth_timestamp".to_string(), self.timestamp.clone()),
            ("oauth_version".to_string(), OAUTH_VERSION.to_string()),
        ];
        if let Some(token) = &self.token {
            pairs.push(("oauth_token".to_string(), token.clone()));
        }
        pairs
    }

    /// Signs a request and renders the `Authorization` header value.
    ///
    /// `request_params` are the query and form parameters of the request;
    /// they are signed but not repeated in the header.
    #[must_use]
    pub fn authorization_header(
        &self,
        method: &str,
        base_url: &str,
        request_params: &[(String, String)],
        consumer_secret: &str,
        token_secret: Option<&str>,
    ) -> String {
        let protocol = self.pairs();
        let mut all = protocol.clone();
        all.extend_from_slice(request_params);

        let base = signature_base_string(method, base_url, &all);
        let signature = sign(self.signature_method, &base, consumer_secret, token_secret);

        let mut fields: Vec<String> = protocol
            .iter()
            .map(|(k, v)| format!("{}=\"{}\"", percent_encode(k), percent_encode(v)))
            .collect();
        fields.push(format!("oauth_signature=\"{}\"", percent_encode(&signature)));

        format!("OAuth {}", fields.join(", "))
    }
}
