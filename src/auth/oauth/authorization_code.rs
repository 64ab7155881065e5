//! Parsing of AWeber's pasted authorization codes.
//!
//! Apps without a callback URL receive a single string from AWeber that
//! packs every credential needed to finish the OAuth flow:
//! `consumer_key|consumer_secret|request_token|token_secret|verifier`.

use std::fmt;
use std::str::FromStr;

use crate::auth::oauth::OAuthError;

/// Number of `|`-separated parts in an authorization code.
const PARTS: usize = 5;

/// The credentials carried by an authorization code.
///
/// # Example
///
/// ```rust
/// use aweber_api::auth::oauth::AuthorizationCode;
///
/// let code: AuthorizationCode = "key|secret|request|request-secret|verifier".parse().unwrap();
/// assert_eq!(code.consumer_key, "key");
/// assert_eq!(code.verifier, "verifier");
///
/// assert!("key|secret".parse::<AuthorizationCode>().is_err());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct AuthorizationCode {
    /// Application consumer key.
    pub consumer_key: String,
    /// Application consumer secret.
    pub consumer_secret: String,
    /// Request token issued for the authorization.
    pub request_token: String,
    /// Secret of the request token.
    pub token_secret: String,
    /// OAuth verifier.
    pub verifier: String,
}

impl AuthorizationCode {
    /// Splits an authorization code into its parts.
    ///
    /// Parts beyond the fifth are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::InvalidAuthorizationCode`] if the code has
    /// fewer than five parts.
    pub fn parse(code: &str) -> Result<Self, OAuthError> {
        let parts: Vec<&str> = code.trim().split('|').collect();
        if parts.len() < PARTS {
            return Err(OAuthError::InvalidAuthorizationCode { parts: parts.len() });
        }

        Ok(Self {
            consumer_key: parts[0].to_string(),
            consumer_secret: parts[1].to_string(),
            request_token: parts[2].to_string(),
            token_secret: parts[3].to_string(),
            verifier: parts[4].to_string(),
        })
    }
}

impl FromStr for AuthorizationCode {
    type Err = OAuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for AuthorizationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorizationCode")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"*****")
            .field("request_token", &self.request_token)
            .field("token_secret", &"*****")
            .field("verifier", &self.verifier)
            .finish()
    }
}
