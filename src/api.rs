//! The API root: credentials, transport and entry points.
//!
//! [`AWeberApi`] owns the transport every resource uses and is where
//! navigation starts: load any resource by URL, list the accounts the
//! access token can see, or run the OAuth flow that produces that token.
//!
//! # Example
//!
//! ```rust,ignore
//! use aweber_api::AWeberApi;
//!
//! let mut api = AWeberApi::new("consumer-key", "consumer-secret")?;
//! let account = api.get_account("access-token", "token-secret").await?;
//!
//! let list = api.load_from_url("/accounts/1/lists/303449").await?;
//! let status = list.schedule_broadcast(2, "2014-09-06 18:55:00").await?;
//! assert_eq!(status, 201);
//! ```

use std::sync::Arc;

use crate::auth::oauth::{self, AuthorizationCode, OAuthError, OAuthToken};
use crate::auth::AWeberUser;
use crate::clients::{OAuthAdapter, Transport};
use crate::config::{AWeberConfig, AccessToken, ConsumerKey, ConsumerSecret, TokenSecret};
use crate::error::ConfigError;
use crate::resources::{Collection, Connection, Entry, ResourceError};

/// Resource URL of the accounts collection.
pub const ACCOUNTS_URL: &str = "/accounts";

/// Entry point to the AWeber API.
///
/// The transport is injectable: [`with_transport`](Self::with_transport) and
/// [`set_transport`](Self::set_transport) replace the default
/// [`OAuthAdapter`] with any [`Transport`]. Entries and collections created
/// afterwards use the new transport; existing ones keep the one they were
/// created with.
#[derive(Debug)]
pub struct AWeberApi {
    config: AWeberConfig,
    adapter: Option<Arc<OAuthAdapter>>,
    transport: Arc<dyn Transport>,
    user: AWeberUser,
}

impl AWeberApi {
    /// Creates a client for an application's consumer credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if either credential is empty.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created (see [`OAuthAdapter::new`]).
    pub fn new(consumer_key: &str, consumer_secret: &str) -> Result<Self, ConfigError> {
        let config = AWeberConfig::builder()
            .consumer_key(ConsumerKey::new(consumer_key)?)
            .consumer_secret(ConsumerSecret::new(consumer_secret)?)
            .build()?;
        Ok(Self::from_config(config))
    }

    /// Creates a client from a full configuration, using the [`OAuthAdapter`].
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created (see [`OAuthAdapter::new`]).
    #[must_use]
    pub fn from_config(config: AWeberConfig) -> Self {
        let adapter = Arc::new(OAuthAdapter::new(&config));
        let transport: Arc<dyn Transport> = adapter.clone();
        let mut api = Self::with_transport(config, transport);
        api.adapter = Some(adapter);
        api
    }

    /// Creates a client that sends every request through `transport`.
    #[must_use]
    pub fn with_transport(config: AWeberConfig, transport: Arc<dyn Transport>) -> Self {
        let user = AWeberUser {
            access_token: config.access_token().map(|t| t.as_ref().to_string()),
            access_token_secret: config.token_secret().map(|s| s.as_ref().to_string()),
            ..AWeberUser::default()
        };
        Self {
            config,
            adapter: None,
            transport,
            user,
        }
    }

    /// Replaces the transport used by resources created from now on.
    pub fn set_transport(&mut self, transport: Arc<dyn Transport>) {
        self.adapter = None;
        self.transport = transport;
    }

    /// Returns the transport in use.
    #[must_use]
    pub const fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &AWeberConfig {
        &self.config
    }

    /// Returns the OAuth state of the current user.
    #[must_use]
    pub const fn user(&self) -> &AWeberUser {
        &self.user
    }

    /// Returns the OAuth state of the current user for modification,
    /// e.g. to record the verifier from AWeber's redirect.
    pub fn user_mut(&mut self) -> &mut AWeberUser {
        &mut self.user
    }

    /// Sets the access token requests are signed with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if either value is empty.
    pub fn set_access_token(&mut self, token: &str, secret: &str) -> Result<(), ConfigError> {
        AccessToken::new(token)?;
        TokenSecret::new(secret)?;

        self.user.access_token = Some(token.to_string());
        self.user.access_token_secret = Some(secret.to_string());
        if let Some(adapter) = &self.adapter {
            adapter.set_token(Some(OAuthToken::new(token, secret)));
        }
        Ok(())
    }

    /// Loads the entry at `url`.
    ///
    /// `url` is a resource path (`/accounts/1/lists/303449`) or an absolute
    /// link under the API base. Every kind of resource is returned as an
    /// [`Entry`]; use [`load_collection`](Self::load_collection) for lists.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the request fails and
    /// [`ResourceError::UnexpectedResponse`] if the body is not an entry.
    pub async fn load_from_url(&self, url: &str) -> Result<Entry, ResourceError> {
        let conn = self.connection();
        let url = conn.resource_url(url);
        conn.load_entry(&url).await
    }

    /// Returns the collection at `url`; it loads on first access.
    #[must_use]
    pub fn load_collection(&self, url: &str) -> Collection {
        let conn = self.connection();
        let url = conn.resource_url(url);
        Collection::new(conn, url)
    }

    /// Returns the accounts visible to the current access token.
    #[must_use]
    pub fn accounts(&self) -> Collection {
        self.load_collection(ACCOUNTS_URL)
    }

    /// Sets the access token and returns the first account it can see.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if the accounts cannot be listed, or
    /// [`ResourceError::IndexOutOfRange`] if there are none.
    pub async fn get_account(&mut self, token: &str, secret: &str) -> Result<Entry, ResourceError> {
        if let Err(e) = self.set_access_token(token, secret) {
            tracing::warn!("Ignoring invalid access token: {}", e);
        }
        let mut accounts = self.accounts();
        Ok(accounts.get(0).await?.clone())
    }

    /// Requests an OAuth request token for `callback_url` and remembers it.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError`] if the request fails or the response is malformed.
    pub async fn get_request_token(&mut self, callback_url: &str) -> Result<OAuthToken, OAuthError> {
        let token = oauth::get_request_token(self.transport.as_ref(), callback_url).await?;
        self.user.request_token = Some(token.token.clone());
        self.user.token_secret = Some(token.secret.clone());
        Ok(token)
    }

    /// Returns the URL the user visits to authorize the current request token.
    #[must_use]
    pub fn authorize_url(&self) -> Option<String> {
        self.user.request_token.as_deref().map(oauth::authorize_url)
    }

    /// Exchanges the request token and verifier for an access token.
    ///
    /// On success the access token is stored and used for later requests.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::MissingRequestToken`] or
    /// [`OAuthError::MissingVerifier`] if the flow is incomplete, and
    /// [`OAuthError::Http`] if the exchange fails.
    pub async fn get_access_token(&mut self) -> Result<OAuthToken, OAuthError> {
        let request_token = self
            .user
            .request_token()
            .ok_or(OAuthError::MissingRequestToken)?;
        let verifier = self
            .user
            .verifier
            .clone()
            .ok_or(OAuthError::MissingVerifier)?;

        let access =
            oauth::get_access_token(self.transport.as_ref(), &request_token, &verifier).await?;
        self.set_access_token(&access.token, &access.secret)?;
        Ok(access)
    }

    /// Completes authorization with the credentials of an authorization code.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError`] if the exchange fails.
    pub async fn authorize_with_code(
        &mut self,
        code: &AuthorizationCode,
    ) -> Result<OAuthToken, OAuthError> {
        self.user.request_token = Some(code.request_token.clone());
        self.user.token_secret = Some(code.token_secret.clone());
        self.user.verifier = Some(code.verifier.clone());
        self.get_access_token().await
    }

    /// Creates a client from an authorization code and obtains its access token.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::InvalidAuthorizationCode`] for malformed codes
    /// and [`OAuthError`] if the exchange fails.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created (see [`OAuthAdapter::new`]).
    pub async fn from_authorization_code(code: &str) -> Result<(Self, OAuthToken), OAuthError> {
        let code = Self::parse_authorization_code(code)?;
        let mut api = Self::new(&code.consumer_key, &code.consumer_secret)?;
        let access = api.authorize_with_code(&code).await?;
        Ok((api, access))
    }

    /// Splits an authorization code into its credentials.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::InvalidAuthorizationCode`] if the code has
    /// fewer than five `|`-separated parts.
    pub fn parse_authorization_code(code: &str) -> Result<AuthorizationCode, OAuthError> {
        AuthorizationCode::parse(code)
    }

    fn connection(&self) -> Connection {
        Connection::new(Arc::clone(&self.transport), self.config.api_base().clone())
    }
}
