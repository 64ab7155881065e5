//! OAuth 1.0a support for the AWeber API.
//!
//! AWeber authenticates every API call with OAuth 1.0a. This module covers
//! both halves of that:
//!
//! - [`signature`]: signing individual requests (used by
//!   [`OAuthAdapter`](crate::clients::OAuthAdapter))
//! - Token exchange: [`get_request_token`], [`authorize_url`] and
//!   [`get_access_token`] implement the three-legged flow
//! - [`AuthorizationCode`]: the pasted-code shortcut for apps without a
//!   callback URL
//!
//! # Example: Three-Legged Flow
//!
//! ```rust,ignore
//! use aweber_api::AWeberApi;
//!
//! let mut api = AWeberApi::new("consumer-key", "consumer-secret")?;
//!
//! // Step 1: obtain a request token and send the user to AWeber
//! api.get_request_token("https://your-app.com/callback").await?;
//! let url = api.authorize_url().unwrap();
//!
//! // Step 2: in the callback handler, record the verifier and finish
//! api.user_mut().verifier = Some(oauth_verifier);
//! let access = api.get_access_token().await?;
//!
//! let account = api.get_account(&access.token, &access.secret).await?;
//! ```
//!
//! # Example: Authorization Code
//!
//! ```rust,ignore
//! use aweber_api::AWeberApi;
//!
//! let (api, access) = AWeberApi::from_authorization_code(&pasted_code).await?;
//! ```

mod authorization_code;
mod error;
pub mod signature;
mod token_exchange;

pub use authorization_code::AuthorizationCode;
pub use error::OAuthError;
pub use signature::{OAuthParams, OAuthToken, SignatureMethod};
pub use token_exchange::{
    authorize_url, get_access_token, get_request_token, parse_token_response, AUTH_BASE,
};
