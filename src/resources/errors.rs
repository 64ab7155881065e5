//! Resource-specific error types.
//!
//! # Error Handling
//!
//! - [`ResourceError::Http`]: the service rejected a request (carries the
//!   [`ApiError`](crate::clients::ApiError) with status and message) or the
//!   request never reached it
//! - [`ResourceError::UnknownAttribute`]: a field lookup on an entry failed;
//!   raised locally, no request is made
//! - [`ResourceError::IndexOutOfRange`]: a collection index past its end
//! - [`ResourceError::UnexpectedResponse`]: a body that is not the expected
//!   resource shape
//!
//! # Example
//!
//! ```rust,ignore
//! use aweber_api::resources::ResourceError;
//!
//! match list.schedule_broadcast(3, "2014-09-06 18:55:00").await {
//!     Ok(status) => println!("Scheduled ({status})"),
//!     Err(e) if e.status().is_some() => println!("Rejected: {e}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use crate::clients::HttpError;
use thiserror::Error;

/// Error type for entry and collection operations.
///
/// # Example
///
/// ```rust
/// use aweber_api::resources::ResourceError;
///
/// let error = ResourceError::UnknownAttribute {
///     entry_type: "list".to_string(),
///     field: "colour".to_string(),
/// };
/// assert_eq!(error.to_string(), "list has no attribute 'colour'");
/// assert_eq!(error.status(), None);
/// ```
#[derive(Debug, Error)]
pub enum ResourceError {
    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The field is neither in the entry's data nor its pending changes.
    #[error("{entry_type} has no attribute '{field}'")]
    UnknownAttribute {
        /// The type of the entry (e.g. "list", "subscriber").
        entry_type: String,
        /// The field that was requested.
        field: String,
    },

    /// A collection was indexed past its end.
    #[error("Index {index} out of range for collection of length {len}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The length of the collection.
        len: usize,
    },

    /// A response body did not have the expected shape.
    #[error("Unexpected response from {url}: {reason}")]
    UnexpectedResponse {
        /// The URL that was requested.
        url: String,
        /// What was wrong with the body.
        reason: String,
    },
}

impl ResourceError {
    /// Returns the HTTP status code if the service rejected the request.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http(e) => e.status(),
            _ => None,
        }
    }

    pub(crate) fn unexpected(url: &str, reason: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};
