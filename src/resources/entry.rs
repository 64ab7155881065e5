//! A single AWeber resource.
//!
//! Every resource kind (account, list, subscriber, custom field, broadcast,
//! ...) is represented by the same [`Entry`] type. What an entry can do is
//! determined at runtime by its type string and URL, not by separate Rust
//! types: calling a list-only action such as
//! [`schedule_broadcast`](Entry::schedule_broadcast) on another kind of
//! entry still sends the request and lets the service decide.
//!
//! # Example
//!
//! ```rust,ignore
//! use aweber_api::AWeberApi;
//! use serde_json::json;
//!
//! let mut subscriber = api
//!     .load_from_url("/accounts/1/lists/303449/subscribers/1")
//!     .await?;
//!
//! subscriber.set("name", json!("Randy Rhodes"));
//! subscriber.get_mut_container("custom_fields")?["Color"] = json!("Red");
//! subscriber.save().await?;
//!
//! let list = subscriber.get_parent_entry().await?.unwrap();
//! assert_eq!(list.entry_type(), "list");
//! ```

use serde_json::{json, Map, Value};

use crate::clients::HttpMethod;
use crate::resources::collection::{Collection, TotalSize};
use crate::resources::connection::Connection;
use crate::resources::path::{self, COLLECTION_LINK_SUFFIX};
use crate::resources::tracking::ChangeSet;
use crate::resources::ResourceError;

/// A single hypermedia resource.
///
/// Field reads go through [`get`](Self::get), which prefers locally changed
/// values over loaded ones. Writes go through [`set`](Self::set) and are
/// only sent by [`save`](Self::save).
#[derive(Debug, Clone)]
pub struct Entry {
    conn: Connection,
    url: String,
    entry_type: String,
    changes: ChangeSet,
}

impl Entry {
    /// Builds an entry from a decoded resource body.
    ///
    /// The URL is taken from the body's `self_link` when present, otherwise
    /// `url` (the URL it was fetched from) is used.
    pub(crate) fn from_response(
        conn: Connection,
        url: &str,
        body: Value,
    ) -> Result<Self, ResourceError> {
        let Value::Object(data) = body else {
            return Err(ResourceError::unexpected(url, "body is not a JSON object"));
        };

        let type_link = data
            .get("resource_type_link")
            .and_then(Value::as_str)
            .ok_or_else(|| ResourceError::unexpected(url, "missing resource_type_link"))?;
        if path::is_page_resource(type_link) || data.contains_key("entries") {
            return Err(ResourceError::unexpected(
                url,
                "body is a collection, not an entry",
            ));
        }
        let entry_type = path::resource_type(type_link).to_string();

        let url = data
            .get("self_link")
            .and_then(Value::as_str)
            .map_or_else(
                || path::strip_query(url).to_string(),
                |link| conn.resource_url(link),
            );

        Ok(Self {
            conn,
            url,
            entry_type,
            changes: ChangeSet::new(data),
        })
    }

    /// Returns the resource URL (e.g. `/accounts/1/lists/303449`).
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the resource type (e.g. `list`).
    #[must_use]
    pub fn entry_type(&self) -> &str {
        &self.entry_type
    }

    /// Returns the numeric id: the last positive-integer segment of the URL.
    #[must_use]
    pub fn id(&self) -> Option<u64> {
        path::entry_id(&self.url)
    }

    /// Returns the absolute URL of this resource.
    #[must_use]
    pub fn self_link(&self) -> String {
        self.changes
            .data()
            .get("self_link")
            .and_then(Value::as_str)
            .map_or_else(|| self.conn.api_base().join(&self.url), String::from)
    }

    /// Returns the data as last loaded or saved, without pending changes.
    #[must_use]
    pub const fn data(&self) -> &Map<String, Value> {
        self.changes.data()
    }

    /// Returns the fields changed since the last load or save.
    #[must_use]
    pub const fn pending_diff(&self) -> &Map<String, Value> {
        self.changes.diff()
    }

    /// Returns `true` if there are unsaved changes.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.changes.is_dirty()
    }

    /// Returns the value of `field`, preferring unsaved changes.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnknownAttribute`] if the field is unknown.
    pub fn get(&self, field: &str) -> Result<&Value, ResourceError> {
        self.changes
            .get(field)
            .ok_or_else(|| self.unknown_attribute(field))
    }

    /// Records a new value for `field`; it is sent on the next [`save`](Self::save).
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.changes.set(field, value.into());
    }

    /// Returns a mutable handle to a structured field such as `custom_fields`.
    ///
    /// The field is marked as changed, and its whole value is sent on save.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnknownAttribute`] if the field is unknown.
    pub fn get_mut_container(&mut self, field: &str) -> Result<&mut Value, ResourceError> {
        let entry_type = &self.entry_type;
        self.changes
            .get_mut(field)
            .ok_or_else(|| ResourceError::UnknownAttribute {
                entry_type: entry_type.clone(),
                field: field.to_string(),
            })
    }

    /// Returns the names of the child collections this entry links to.
    #[must_use]
    pub fn child_collection_names(&self) -> Vec<String> {
        self.changes
            .data()
            .keys()
            .filter_map(|key| key.strip_suffix(COLLECTION_LINK_SUFFIX))
            .map(String::from)
            .collect()
    }

    /// Returns the child collection `name` (e.g. `subscribers`).
    ///
    /// No request is made; the collection loads on first access.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnknownAttribute`] if the entry does not link
    /// to a collection of that name.
    pub fn collection(&self, name: &str) -> Result<Collection, ResourceError> {
        let link = format!("{name}{COLLECTION_LINK_SUFFIX}");
        if !self.changes.data().contains_key(&link) {
            return Err(self.unknown_attribute(name));
        }
        Ok(Collection::new(
            self.conn.clone(),
            path::child_url(&self.url, name),
        ))
    }

    /// Sends the pending changes with a PATCH.
    ///
    /// Returns `true` without making a request when nothing changed. On
    /// failure the pending changes are kept so the save can be retried.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the service rejects the changes.
    pub async fn save(&mut self) -> Result<bool, ResourceError> {
        if !self.changes.is_dirty() {
            return Ok(true);
        }

        let diff = self.changes.diff().clone();
        self.conn
            .send(HttpMethod::Patch, &self.url, Some(diff))
            .await?;
        self.changes.commit();
        Ok(true)
    }

    /// Deletes the resource.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the service refuses the deletion.
    pub async fn delete(&self) -> Result<bool, ResourceError> {
        self.conn.send(HttpMethod::Delete, &self.url, None).await?;
        Ok(true)
    }

    /// Moves this entry into `target` and reloads it from its new location.
    ///
    /// `target` is the subscribers collection of the destination list. Sends
    /// `{"operation": "move", "list_link": <list self link>, ..extra}` to the
    /// entry's URL, then loads `<target url>/<id>`. Pending changes are
    /// discarded.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnexpectedResponse`] if the entry has no
    /// numeric id, and [`ResourceError::Http`] if either request fails.
    pub async fn move_to(
        &mut self,
        target: &Collection,
        extra: Option<Map<String, Value>>,
    ) -> Result<bool, ResourceError> {
        let id = self
            .id()
            .ok_or_else(|| ResourceError::unexpected(&self.url, "entry has no numeric id"))?;

        let mut data = Map::new();
        data.insert("operation".to_string(), json!("move"));
        let list_url = path::owner_url(target.url());
        data.insert(
            "list_link".to_string(),
            Value::String(self.conn.api_base().join(&list_url)),
        );
        data.extend(extra.unwrap_or_default());

        self.conn
            .send(HttpMethod::Post, &self.url, Some(data))
            .await?;

        let new_url = format!("{}/{id}", path::strip_query(target.url()));
        *self = self.conn.load_entry(&new_url).await?;
        Ok(true)
    }

    /// Loads the parent entry: a list for a subscriber, an account for a list.
    ///
    /// Returns `None` for accounts, which have no parent.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if loading the parent fails.
    pub async fn get_parent_entry(&self) -> Result<Option<Self>, ResourceError> {
        match path::parent_url(&self.url) {
            Some(url) => Ok(Some(self.conn.load_entry(&url).await?)),
            None => Ok(None),
        }
    }

    /// Schedules broadcast `bc_id` of this list.
    ///
    /// Returns the HTTP status of the response (201 on success).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the service rejects the schedule.
    pub async fn schedule_broadcast(
        &self,
        bc_id: u64,
        scheduled_for: &str,
    ) -> Result<u16, ResourceError> {
        self.expect_type("list", "schedule_broadcast");

        let mut data = Map::new();
        data.insert(
            "scheduled_for".to_string(),
            Value::String(scheduled_for.to_string()),
        );
        let url = format!("{}/broadcasts/{bc_id}/schedule", self.url);
        let response = self.conn.send(HttpMethod::Post, &url, Some(data)).await?;
        Ok(response.code)
    }

    /// Cancels scheduled broadcast `bc_id` of this list.
    ///
    /// Returns the HTTP status of the response (204 on success).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the service rejects the cancellation.
    pub async fn cancel_broadcast(&self, bc_id: u64) -> Result<u16, ResourceError> {
        self.expect_type("list", "cancel_broadcast");

        let url = format!("{}/broadcasts/{bc_id}/cancel", self.url);
        let response = self
            .conn
            .send(HttpMethod::Post, &url, Some(Map::new()))
            .await?;
        Ok(response.code)
    }

    /// Lists the broadcasts of this list with the given status
    /// (`draft`, `scheduled` or `sent`).
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if either the listing or its count fails.
    pub async fn get_broadcasts<K: AsRef<str>, V: AsRef<str>>(
        &self,
        status: &str,
        params: &[(K, V)],
    ) -> Result<Collection, ResourceError> {
        self.expect_type("list", "get_broadcasts");

        let mut query = vec![("status".to_string(), status.to_string())];
        query.extend(
            params
                .iter()
                .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string())),
        );

        let url = path::with_query(&path::child_url(&self.url, "broadcasts"), &query);
        let total_url = path::with_query(&format!("{}/broadcasts/total", self.url), &query);
        Collection::search(self.conn.clone(), url, TotalSize::Endpoint(total_url)).await
    }

    /// Searches the subscribers of this account.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the service rejects the search.
    pub async fn find_subscribers<K: AsRef<str>, V: AsRef<str>>(
        &self,
        criteria: &[(K, V)],
    ) -> Result<Collection, ResourceError> {
        self.expect_type("account", "find_subscribers");
        self.search("findSubscribers", criteria).await
    }

    /// Returns the activity of this subscriber.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the service rejects the request.
    pub async fn get_activity(&self) -> Result<Collection, ResourceError> {
        self.expect_type("subscriber", "get_activity");
        let criteria: [(&str, &str); 0] = [];
        self.search("getActivity", &criteria).await
    }

    /// Returns the web forms of every list in this account, list by list.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if any list or form page fails to load.
    pub async fn get_web_forms(&self) -> Result<Vec<Self>, ResourceError> {
        self.expect_type("account", "get_web_forms");
        self.list_children("web_forms").await
    }

    /// Returns the web form split tests of every list in this account, list by list.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if any list or split test page fails to load.
    pub async fn get_web_form_split_tests(&self) -> Result<Vec<Self>, ResourceError> {
        self.expect_type("account", "get_web_form_split_tests");
        self.list_children("web_form_split_tests").await
    }

    async fn search<K: AsRef<str>, V: AsRef<str>>(
        &self,
        operation: &str,
        criteria: &[(K, V)],
    ) -> Result<Collection, ResourceError> {
        let mut query = vec![("ws.op".to_string(), operation.to_string())];
        query.extend(
            criteria
                .iter()
                .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string())),
        );
        let url = path::with_query(&self.url, &query);
        Collection::search(self.conn.clone(), url, TotalSize::ShowParam).await
    }

    async fn list_children(&self, name: &str) -> Result<Vec<Self>, ResourceError> {
        let lists = Collection::new(self.conn.clone(), path::child_url(&self.url, "lists"))
            .into_entries()
            .await?;

        let mut children = Vec::new();
        for list in lists {
            let collection = Collection::new(self.conn.clone(), path::child_url(list.url(), name));
            children.extend(collection.into_entries().await?);
        }
        Ok(children)
    }

    fn expect_type(&self, expected: &str, operation: &str) {
        if self.entry_type != expected {
            tracing::debug!(
                "{} is normally called on a {} entry, not {}; sending anyway",
                operation,
                expected,
                self.entry_type
            );
        }
    }

    fn unknown_attribute(&self, field: &str) -> ResourceError {
        ResourceError::UnknownAttribute {
            entry_type: self.entry_type.clone(),
            field: field.to_string(),
        }
    }
}
