//! Configuration types for the AWeber API client.
//!
//! This module provides the core configuration types used to initialize
//! the client for API communication with AWeber.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`AWeberConfig`]: The main configuration struct holding all client settings
//! - [`AWeberConfigBuilder`]: A builder for constructing [`AWeberConfig`] instances
//! - [`ConsumerKey`] and [`ConsumerSecret`]: Validated app credentials
//! - [`AccessToken`] and [`TokenSecret`]: Validated user credentials
//! - [`ApiBase`]: The base URL resource paths are resolved against
//!
//! # Example
//!
//! ```rust
//! use aweber_api::{AWeberConfig, ConsumerKey, ConsumerSecret};
//!
//! let config = AWeberConfig::builder()
//!     .consumer_key(ConsumerKey::new("my-consumer-key").unwrap())
//!     .consumer_secret(ConsumerSecret::new("my-consumer-secret").unwrap())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::{AccessToken, ApiBase, ConsumerKey, ConsumerSecret, TokenSecret};

use crate::auth::oauth::SignatureMethod;
use crate::error::ConfigError;

/// Configuration for the AWeber API client.
///
/// Holds the OAuth 1.0a credentials of the app (consumer) and, once
/// authorized, of the user (access token). Credentials are always passed
/// explicitly; nothing is read from the environment.
///
/// # Thread Safety
///
/// `AWeberConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct AWeberConfig {
    consumer_key: ConsumerKey,
    consumer_secret: ConsumerSecret,
    access_token: Option<AccessToken>,
    token_secret: Option<TokenSecret>,
    api_base: ApiBase,
    signature_method: SignatureMethod,
    user_agent_prefix: Option<String>,
}

impl AWeberConfig {
    /// Creates a new builder for constructing an `AWeberConfig`.
    #[must_use]
    pub fn builder() -> AWeberConfigBuilder {
        AWeberConfigBuilder::new()
    }

    /// Returns the consumer key.
    #[must_use]
    pub const fn consumer_key(&self) -> &ConsumerKey {
        &self.consumer_key
    }

    /// Returns the consumer secret.
    #[must_use]
    pub const fn consumer_secret(&self) -> &ConsumerSecret {
        &self.consumer_secret
    }

    /// Returns the access token, if configured.
    #[must_use]
    pub const fn access_token(&self) -> Option<&AccessToken> {
        self.access_token.as_ref()
    }

    /// Returns the token secret, if configured.
    #[must_use]
    pub const fn token_secret(&self) -> Option<&TokenSecret> {
        self.token_secret.as_ref()
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn api_base(&self) -> &ApiBase {
        &self.api_base
    }

    /// Returns the OAuth signature method.
    #[must_use]
    pub const fn signature_method(&self) -> SignatureMethod {
        self.signature_method
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify AWeberConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AWeberConfig>();
};

/// Builder for constructing [`AWeberConfig`] instances.
///
/// Required fields are `consumer_key` and `consumer_secret`.
///
/// # Defaults
///
/// - `api_base`: `https://api.aweber.com/1.0`
/// - `signature_method`: HMAC-SHA1
/// - `access_token` / `token_secret`: `None`
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct AWeberConfigBuilder {
    consumer_key: Option<ConsumerKey>,
    consumer_secret: Option<ConsumerSecret>,
    access_token: Option<AccessToken>,
    token_secret: Option<TokenSecret>,
    api_base: Option<ApiBase>,
    signature_method: Option<SignatureMethod>,
    user_agent_prefix: Option<String>,
}

impl AWeberConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the consumer key (required).
    #[must_use]
    pub fn consumer_key(mut self, key: ConsumerKey) -> Self {
        self.consumer_key = Some(key);
        self
    }

    /// Sets the consumer secret (required).
    #[must_use]
    pub fn consumer_secret(mut self, secret: ConsumerSecret) -> Self {
        self.consumer_secret = Some(secret);
        self
    }

    /// Sets the user's access token and token secret.
    #[must_use]
    pub fn access_token(mut self, token: AccessToken, secret: TokenSecret) -> Self {
        self.access_token = Some(token);
        self.token_secret = Some(secret);
        self
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn api_base(mut self, api_base: ApiBase) -> Self {
        self.api_base = Some(api_base);
        self
    }

    /// Sets the OAuth signature method.
    #[must_use]
    pub const fn signature_method(mut self, method: SignatureMethod) -> Self {
        self.signature_method = Some(method);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`AWeberConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `consumer_key` or
    /// `consumer_secret` are not set.
    pub fn build(self) -> Result<AWeberConfig, ConfigError> {
        let consumer_key = self.consumer_key.ok_or(ConfigError::MissingRequiredField {
            field: "consumer_key",
        })?;
        let consumer_secret = self
            .consumer_secret
            .ok_or(ConfigError::MissingRequiredField {
                field: "consumer_secret",
            })?;

        Ok(AWeberConfig {
            consumer_key,
            consumer_secret,
            access_token: self.access_token,
            token_secret: self.token_secret,
            api_base: self.api_base.unwrap_or_default(),
            signature_method: self.signature_method.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_builder() -> AWeberConfigBuilder {
        AWeberConfig::builder()
            .consumer_key(ConsumerKey::new("key").unwrap())
            .consumer_secret(ConsumerSecret::new("secret").unwrap())
    }

    #[test]
    fn test_builder_requires_consumer_key() {
        let result = AWeberConfigBuilder::new()
            .consumer_secret(ConsumerSecret::new("secret").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "consumer_key"
            })
        ));
    }

    #[test]
    fn test_builder_requires_consumer_secret() {
        let result = AWeberConfigBuilder::new()
            .consumer_key(ConsumerKey::new("key").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "consumer_secret"
            })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = base_builder().build().unwrap();

        assert_eq!(config.api_base().as_ref(), ApiBase::DEFAULT);
        assert_eq!(config.signature_method(), SignatureMethod::HmacSha1);
        assert!(config.access_token().is_none());
        assert!(config.token_secret().is_none());
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = base_builder()
            .access_token(
                AccessToken::new("token").unwrap(),
                TokenSecret::new("token-secret").unwrap(),
            )
            .api_base(ApiBase::new("http://localhost:8080/1.0").unwrap())
            .signature_method(SignatureMethod::HmacSha256)
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();

        assert_eq!(config.access_token().unwrap().as_ref(), "token");
        assert_eq!(config.token_secret().unwrap().as_ref(), "token-secret");
        assert_eq!(config.api_base().as_ref(), "http://localhost:8080/1.0");
        assert_eq!(config.signature_method(), SignatureMethod::HmacSha256);
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
    }

    #[test]
    fn test_config_debug_masks_secrets() {
        let config = base_builder()
            .access_token(
                AccessToken::new("token").unwrap(),
                TokenSecret::new("hidden-token-secret").unwrap(),
            )
            .build()
            .unwrap();

        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("AWeberConfig"));
        assert!(!debug_str.contains("hidden-token-secret"));
    }

    #[test]
    fn test_config_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AWeberConfig>();
    }
}
