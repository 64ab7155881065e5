//! # AWeber API Rust Client
//!
//! An async Rust client for the AWeber email-marketing API. It maps the
//! API's hypermedia JSON resources onto two navigable types, tracks local
//! changes, and sends them back as OAuth 1.0a signed requests.
//!
//! ## Overview
//!
//! This crate provides:
//! - [`AWeberApi`]: the entry point; holds credentials and the transport
//! - [`Entry`]: any single resource (account, list, subscriber, ...), with
//!   change tracking and the service's custom actions
//! - [`Collection`]: a lazily fetched, paginated list of entries
//! - An injectable [`Transport`] with a default OAuth 1.0a
//!   [`OAuthAdapter`] over `reqwest`
//! - Type-safe configuration via [`AWeberConfig`] and [`AWeberConfigBuilder`]
//! - The OAuth 1.0a authorization flow via [`auth::oauth`]
//!
//! ## Quick Start
//!
//! ```rust
//! use aweber_api::{AWeberConfig, ConsumerKey, ConsumerSecret, AccessToken, TokenSecret};
//!
//! let config = AWeberConfig::builder()
//!     .consumer_key(ConsumerKey::new("consumer-key").unwrap())
//!     .consumer_secret(ConsumerSecret::new("consumer-secret").unwrap())
//!     .access_token(
//!         AccessToken::new("access-token").unwrap(),
//!         TokenSecret::new("token-secret").unwrap(),
//!     )
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Working With Resources
//!
//! ```rust,ignore
//! use aweber_api::{AWeberApi, AWeberConfig};
//! use serde_json::json;
//!
//! let api = AWeberApi::from_config(config);
//!
//! // Every resource loads as an Entry
//! let list = api.load_from_url("/accounts/1/lists/303449").await?;
//! println!("{} ({})", list.get("name")?, list.entry_type());
//!
//! // Child collections load lazily
//! let mut subscribers = list.collection("subscribers")?;
//! let subscriber = subscribers.get_mut(0).await?;
//!
//! // Changes are tracked per field and sent with PATCH
//! subscriber.set("name", json!("Randy Rhodes"));
//! subscriber.save().await?;
//!
//! // Custom actions
//! list.schedule_broadcast(2, "2014-09-06 18:55:00").await?;
//! ```
//!
//! ## Authorization
//!
//! ```rust,ignore
//! use aweber_api::AWeberApi;
//!
//! let mut api = AWeberApi::new("consumer-key", "consumer-secret")?;
//! api.get_request_token("https://your-app.com/callback").await?;
//! // Redirect the user to api.authorize_url(), then on callback:
//! api.user_mut().verifier = Some(oauth_verifier);
//! let access = api.get_access_token().await?;
//! ```
//!
//! ## Testing
//!
//! Any type implementing [`Transport`] can replace the network:
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use aweber_api::AWeberApi;
//!
//! let api = AWeberApi::with_transport(config, Arc::new(MyMockTransport::new()));
//! ```
//!
//! ## Design Principles
//!
//! - **One resource type**: behavior differs by the entry's type string and
//!   URL, not by Rust type; the service decides what is allowed
//! - **Explicit errors**: every failure is returned once, with no retries
//! - **Thread-safe**: all public types are `Send + Sync`
//! - **Async-first**: designed for use with the Tokio async runtime

pub mod api;
pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod resources;

// Re-export public types at crate root for convenience
pub use api::AWeberApi;
pub use auth::AWeberUser;
pub use config::{
    AWeberConfig, AWeberConfigBuilder, AccessToken, ApiBase, ConsumerKey, ConsumerSecret,
    TokenSecret,
};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiError, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    InvalidHttpRequestError, OAuthAdapter, Transport,
};

// Re-export resource types
pub use resources::{ChangeSet, Collection, Entry, ResourceError};

// Re-export OAuth types for convenience
pub use auth::oauth::{AuthorizationCode, OAuthError, OAuthToken, SignatureMethod};
