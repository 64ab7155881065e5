//! OAuth-specific error types for the AWeber API client.
//!
//! # Example
//!
//! ```rust
//! use aweber_api::auth::oauth::OAuthError;
//!
//! let error = OAuthError::InvalidAuthorizationCode { parts: 3 };
//! assert!(error.to_string().contains("5"));
//! ```

use crate::clients::HttpError;
use crate::error::ConfigError;
use thiserror::Error;

/// Errors that can occur during the OAuth 1.0a token flow.
///
/// # Thread Safety
///
/// `OAuthError` is `Send + Sync`, making it safe to use across async boundaries.
#[derive(Debug, Error)]
pub enum OAuthError {
    /// The authorization code did not have the five `|`-separated parts.
    #[error("Invalid authorization code: expected 5 '|'-separated parts, found {parts}")]
    InvalidAuthorizationCode {
        /// Number of parts that were found.
        parts: usize,
    },

    /// A token endpoint answered with a body that is not a token pair.
    #[error("Could not parse token response: {reason}")]
    TokenParse {
        /// Description of what is missing from the response.
        reason: String,
    },

    /// An access token was requested before a request token was obtained.
    #[error("No request token available; call get_request_token first")]
    MissingRequestToken,

    /// An access token was requested without an OAuth verifier.
    #[error("No OAuth verifier available")]
    MissingVerifier,

    /// The credentials in an authorization code are not usable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Wrapped HTTP client error.
    #[error(transparent)]
    Http(#[from] HttpError),
}

// Verify OAuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OAuthError>();
};
