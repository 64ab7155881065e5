//! Resource URL helpers.
//!
//! Relationships between AWeber resources are expressed purely through URL
//! paths: `/accounts/1/lists/303449` is list `303449` of account `1`, its
//! subscribers live at `/accounts/1/lists/303449/subscribers`, and its
//! parent is found by dropping the last two segments.
//!
//! # Example
//!
//! ```rust
//! use aweber_api::resources::path::{child_url, entry_id, parent_url};
//!
//! assert_eq!(entry_id("/accounts/1/lists/303449"), Some(303449));
//! assert_eq!(parent_url("/accounts/1/lists/303449"), Some("/accounts/1".to_string()));
//! assert_eq!(parent_url("/accounts/1"), None);
//! assert_eq!(child_url("/accounts/1", "lists"), "/accounts/1/lists");
//! ```

use crate::clients::encode_query;

/// Suffix of the data keys that advertise child collections.
pub const COLLECTION_LINK_SUFFIX: &str = "_collection_link";

/// Suffix of the type discriminator for collection pages.
const PAGE_RESOURCE_SUFFIX: &str = "-page-resource";

/// Returns `url` without its query string.
#[must_use]
pub fn strip_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(path, _)| path)
}

/// Returns the non-empty path segments of `url`.
#[must_use]
pub fn segments(url: &str) -> Vec<&str> {
    strip_query(url)
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Returns the last positive-integer segment of `url`.
#[must_use]
pub fn entry_id(url: &str) -> Option<u64> {
    segments(url)
        .into_iter()
        .rev()
        .find_map(|segment| segment.parse::<u64>().ok().filter(|id| *id > 0))
}

/// Returns the URL of the parent entry, dropping the last two segments.
///
/// Returns `None` when fewer than two segments would remain; accounts
/// (`/accounts/1`) have no parent.
#[must_use]
pub fn parent_url(url: &str) -> Option<String> {
    let segments = segments(url);
    if segments.len() < 4 {
        return None;
    }
    Some(format!("/{}", segments[..segments.len() - 2].join("/")))
}

/// Returns the URL of the child collection `name` below `url`.
#[must_use]
pub fn child_url(url: &str, name: &str) -> String {
    format!("{}/{name}", strip_query(url).trim_end_matches('/'))
}

/// Returns the URL of the entry a collection belongs to.
///
/// `/accounts/1/lists/505454/subscribers` gives `/accounts/1/lists/505454`.
#[must_use]
pub fn owner_url(collection_url: &str) -> String {
    let segments = segments(collection_url);
    let keep = segments.len().saturating_sub(1);
    format!("/{}", segments[..keep].join("/"))
}

/// Appends form-encoded parameters to `url`, keeping their order.
#[must_use]
pub fn with_query<K: AsRef<str>, V: AsRef<str>>(url: &str, params: &[(K, V)]) -> String {
    if params.is_empty() {
        return url.to_string();
    }
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}{}", encode_query(params))
}

/// Extracts the resource type from a `resource_type_link`.
///
/// `https://api.aweber.com/1.0/#subscriber-page-resource` and
/// `https://api.aweber.com/1.0/#subscriber` both yield `subscriber`.
#[must_use]
pub fn resource_type(type_link: &str) -> &str {
    let fragment = type_link
        .rsplit_once('#')
        .map_or(type_link, |(_, fragment)| fragment);
    fragment
        .strip_suffix(PAGE_RESOURCE_SUFFIX)
        .unwrap_or(fragment)
}

/// Returns `true` if a `resource_type_link` names a collection page.
#[must_use]
pub fn is_page_resource(type_link: &str) -> bool {
    type_link.ends_with(PAGE_RESOURCE_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_id_uses_last_numeric_segment() {
        assert_eq!(entry_id("/accounts/1"), Some(1));
        assert_eq!(
            entry_id("/accounts/1/lists/303449/subscribers/2"),
            Some(2)
        );
        assert_eq!(entry_id("/accounts/1/lists"), Some(1));
        assert_eq!(entry_id("/accounts"), None);
        assert_eq!(entry_id("/accounts/0"), None);
    }

    #[test]
    fn test_entry_id_ignores_query() {
        assert_eq!(
            entry_id("/accounts/1/lists/303449/subscribers/1?ws.op=getActivity"),
            Some(1)
        );
    }

    #[test]
    fn test_parent_url() {
        assert_eq!(
            parent_url("/accounts/1/lists/303449/custom_fields/1"),
            Some("/accounts/1/lists/303449".to_string())
        );
        assert_eq!(
            parent_url("/accounts/1/lists/303449"),
            Some("/accounts/1".to_string())
        );
        assert_eq!(parent_url("/accounts/1"), None);
        assert_eq!(parent_url("/accounts"), None);
    }

    #[test]
    fn test_child_url_trims_slashes_and_query() {
        assert_eq!(
            child_url("/accounts/1/lists/303449/", "campaigns"),
            "/accounts/1/lists/303449/campaigns"
        );
        assert_eq!(
            child_url("/accounts/1?ws.op=getWebForms", "lists"),
            "/accounts/1/lists"
        );
    }

    #[test]
    fn test_owner_url_drops_collection_name() {
        assert_eq!(
            owner_url("/accounts/1/lists/505454/subscribers"),
            "/accounts/1/lists/505454"
        );
        assert_eq!(
            owner_url("/accounts/1/lists/505454/subscribers?ws.op=find&name=joe"),
            "/accounts/1/lists/505454"
        );
        assert_eq!(owner_url("/accounts"), "/");
    }

    #[test]
    fn test_with_query_appends_in_order() {
        assert_eq!(
            with_query("/accounts/1", &[("ws.op", "findSubscribers"), ("email", "joe@example.com")]),
            "/accounts/1?ws.op=findSubscribers&email=joe%40example.com"
        );
        assert_eq!(
            with_query("/accounts/1?ws.op=find", &[("name", "joe")]),
            "/accounts/1?ws.op=find&name=joe"
        );
        let empty: [(&str, &str); 0] = [];
        assert_eq!(with_query("/accounts/1", &empty), "/accounts/1");
    }

    #[test]
    fn test_resource_type() {
        assert_eq!(
            resource_type("https://api.aweber.com/1.0/#subscriber-page-resource"),
            "subscriber"
        );
        assert_eq!(resource_type("https://api.aweber.com/1.0/#list"), "list");
        assert_eq!(resource_type("account"), "account");
        assert!(is_page_resource("https://api.aweber.com/1.0/#list-page-resource"));
        assert!(!is_page_resource("https://api.aweber.com/1.0/#list"));
    }
}
