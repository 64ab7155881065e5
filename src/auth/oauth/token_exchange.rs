//! OAuth 1.0a token exchange against the AWeber authorization server.
//!
//! The three-legged flow is:
//!
//! 1. [`get_request_token`]: obtain a temporary request token for a callback URL
//! 2. [`authorize_url`]: send the user to AWeber to approve the app
//! 3. [`get_access_token`]: trade the request token and verifier for an access token
//!
//! Both token endpoints answer with a form-encoded body
//! (`oauth_token=...&oauth_token_secret=...`).
//!
//! # Example
//!
//! ```rust,ignore
//! use aweber_api::auth::oauth::{authorize_url, get_access_token, get_request_token};
//!
//! let request_token = get_request_token(&adapter, "https://example.com/callback").await?;
//! println!("Visit {}", authorize_url(&request_token.token));
//!
//! // After the user approves, AWeber redirects with `oauth_verifier`.
//! let access_token = get_access_token(&adapter, &request_token, &verifier).await?;
//! ```

use serde_json::{Map, Value};

use crate::auth::oauth::{OAuthError, OAuthToken};
use crate::clients::{HttpMethod, HttpRequest, Transport};

/// Base URL of the AWeber OAuth endpoints.
pub const AUTH_BASE: &str = "https://auth.aweber.com/1.0/oauth";

/// Returns the URL a user visits to authorize a request token.
///
/// # Example
///
/// ```rust
/// use aweber_api::auth::oauth::authorize_url;
///
/// assert_eq!(
///     authorize_url("abc"),
///     "https://auth.aweber.com/1.0/oauth/authorize?oauth_token=abc"
/// );
/// ```
#[must_use]
pub fn authorize_url(request_token: &str) -> String {
    format!(
        "{AUTH_BASE}/authorize?oauth_token={}",
        urlencoding::encode(request_token)
    )
}

/// Requests a temporary request token.
///
/// # Errors
///
/// Returns [`OAuthError::Http`] if the server rejects the request and
/// [`OAuthError::TokenParse`] if the response carries no token pair.
pub async fn get_request_token(
    transport: &dyn Transport,
    callback_url: &str,
) -> Result<OAuthToken, OAuthError> {
    let mut data = Map::new();
    data.insert(
        "oauth_callback".to_string(),
        Value::String(callback_url.to_string()),
    );

    let request = HttpRequest::builder(HttpMethod::Post, format!("{AUTH_BASE}/request_token"))
        .data(data)
        .build()
        .map_err(crate::clients::HttpError::from)?;

    let response = transport.send(request).await?;
    parse_token_response(&response.body)
}

/// Exchanges an authorized request token for an access token.
///
/// # Errors
///
/// Returns [`OAuthError::MissingVerifier`] if `verifier` is empty,
/// [`OAuthError::Http`] if the server rejects the exchange and
/// [`OAuthError::TokenParse`] if the response carries no token pair.
pub async fn get_access_token(
    transport: &dyn Transport,
    request_token: &OAuthToken,
    verifier: &str,
) -> Result<OAuthToken, OAuthError> {
    if verifier.is_empty() {
        return Err(OAuthError::MissingVerifier);
    }

    let mut data = Map::new();
    data.insert(
        "oauth_verifier".to_string(),
        Value::String(verifier.to_string()),
    );

    let request = HttpRequest::builder(HttpMethod::Post, format!("{AUTH_BASE}/access_token"))
        .data(data)
        .token(request_token.clone())
        .build()
        .map_err(crate::clients::HttpError::from)?;

    let response = transport.send(request).await?;
    parse_token_response(&response.body)
}

/// Extracts `oauth_token` and `oauth_token_secret` from a token endpoint body.
///
/// Accepts the form-encoded text AWeber returns as well as a JSON object
/// with the same keys.
///
/// # Errors
///
/// Returns [`OAuthError::TokenParse`] if either value is missing or empty.
pub fn parse_token_response(body: &Value) -> Result<OAuthToken, OAuthError> {
    let (token, secret) = match body {
        Value::String(text) => {
            let mut token = None;
            let mut secret = None;
            for (key, value) in url::form_urlencoded::parse(text.as_bytes()) {
                match key.as_ref() {
                    "oauth_token" => token = Some(value.into_owned()),
                    "oauth_token_secret" => secret = Some(value.into_owned()),
                    _ => {}
                }
            }
            (token, secret)
        }
        Value::Object(map) => {
            let field = |name: &str| map.get(name).and_then(Value::as_str).map(String::from);
            (field("oauth_token"), field("oauth_token_secret"))
        }
        _ => (None, None),
    };

    match (token, secret) {
        (Some(token), Some(secret)) if !token.is_empty() && !secret.is_empty() => {
            Ok(OAuthToken::new(token, secret))
        }
        (None, _) => Err(OAuthError::TokenParse {
            reason: "missing oauth_token".to_string(),
        }),
        _ => Err(OAuthError::TokenParse {
            reason: "missing oauth_token_secret".to_string(),
        }),
    }
}
