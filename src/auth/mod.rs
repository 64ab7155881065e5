//! Authentication types for the AWeber API client.
//!
//! - [`AWeberUser`]: OAuth tokens gathered while authorizing a user
//! - [`oauth`]: OAuth 1.0a request signing and token exchange
//!
//! Most applications drive the flow through [`AWeberApi`](crate::AWeberApi)
//! (`get_request_token`, `authorize_url`, `get_access_token`); the free
//! functions in [`oauth`] are available for callers that manage their own
//! transport.

pub mod oauth;
mod user;

pub use user::AWeberUser;
