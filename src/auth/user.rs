//! Per-user OAuth state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::auth::oauth::OAuthToken;

/// OAuth credentials accumulated while authorizing a user.
///
/// A fresh `AWeberUser` is empty. The request token and its secret are
/// filled in by `get_request_token`, the verifier comes back from AWeber's
/// redirect (or an authorization code), and the access token pair is set
/// once the exchange succeeds.
///
/// # Example
///
/// ```rust
/// use aweber_api::auth::AWeberUser;
///
/// let mut user = AWeberUser::default();
/// assert!(user.request_token().is_none());
///
/// user.request_token = Some("request".to_string());
/// user.token_secret = Some("secret".to_string());
/// assert_eq!(user.request_token().unwrap().token, "request");
/// ```
///
/// # Serialization
///
/// `AWeberUser` derives `Serialize` and `Deserialize` so web applications
/// can keep it in their session store between the redirect and the callback.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AWeberUser {
    /// Temporary request token.
    pub request_token: Option<String>,
    /// Secret of the request token.
    pub token_secret: Option<String>,
    /// Long-lived access token.
    pub access_token: Option<String>,
    /// Secret of the access token.
    pub access_token_secret: Option<String>,
    /// OAuth verifier returned after the user approves the app.
    pub verifier: Option<String>,
}

impl AWeberUser {
    /// Returns the request token pair, if both halves are known.
    #[must_use]
    pub fn request_token(&self) -> Option<OAuthToken> {
        self.request_token
            .as_ref()
            .zip(self.token_secret.as_ref())
            .map(|(token, secret)| OAuthToken::new(token.clone(), secret.clone()))
    }

    /// Returns the access token pair, if both halves are known.
    #[must_use]
    pub fn access_token(&self) -> Option<OAuthToken> {
        self.access_token
            .as_ref()
            .zip(self.access_token_secret.as_ref())
            .map(|(token, secret)| OAuthToken::new(token.clone(), secret.clone()))
    }
}

impl fmt::Debug for AWeberUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mask = |value: &Option<String>| value.as_ref().map(|_| "*****");
        f.debug_struct("AWeberUser")
            .field("request_token", &self.request_token)
            .field("token_secret", &mask(&self.token_secret))
            .field("access_token", &self.access_token)
            .field("access_token_secret", &mask(&self.access_token_secret))
            .field("verifier", &self.verifier)
            .finish()
    }
}
