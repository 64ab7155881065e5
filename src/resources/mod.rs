//! The AWeber resource model.
//!
//! The API is hypermedia: every resource is a JSON object with a
//! `self_link` and a `resource_type_link`, and related resources are found
//! by following links or extending URLs. This module maps that onto two
//! types:
//!
//! - **[`Entry`]**: one resource of any kind, with change tracking and the
//!   custom actions the service offers (move, schedule/cancel broadcast,
//!   searches)
//! - **[`Collection`]**: a lazily fetched, paginated list of entries
//!
//! Supporting pieces:
//!
//! - [`ChangeSet`]: loaded data plus unsaved changes
//! - [`path`]: URL helpers deriving ids, parents and children
//! - [`ResourceError`]: errors for resource operations
//!
//! # Example
//!
//! ```rust,ignore
//! use aweber_api::AWeberApi;
//!
//! let list = api.load_from_url("/accounts/1/lists/303449").await?;
//! assert_eq!(list.entry_type(), "list");
//! assert_eq!(list.id(), Some(303449));
//!
//! let mut subscribers = list.collection("subscribers")?;
//! println!("{} subscribers", subscribers.len().await?);
//!
//! let matches = subscribers.find(&[("email", "joe@example.com")]).await?;
//! ```

mod collection;
mod connection;
mod entry;
mod errors;
pub mod path;
mod tracking;

pub use collection::{Collection, DEFAULT_PAGE_SIZE};
pub(crate) use connection::Connection;
pub use entry::Entry;
pub use errors::ResourceError;
pub use tracking::ChangeSet;
