//! Paginated lists of entries.
//!
//! A [`Collection`] is created without touching the network. The first
//! call to [`len`](Collection::len), [`get`](Collection::get) or
//! [`entries`](Collection::entries) fetches the first page; later pages are
//! fetched only when an index falls inside them. Pages that have been
//! fetched are kept for the life of the collection.
//!
//! # Pagination
//!
//! The service returns pages of the form
//!
//! ```json
//! {
//!   "entries": [...],
//!   "start": 0,
//!   "total_size": 45,
//!   "next_collection_link": "https://api.aweber.com/1.0/accounts/1/lists?ws.start=20&ws.size=20",
//!   "resource_type_link": "https://api.aweber.com/1.0/#list-page-resource"
//! }
//! ```
//!
//! Entries are keyed by their absolute offset. The page size is read from
//! `next_collection_link` (100 when absent), and further pages are requested
//! with `ws.start` / `ws.size`.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use url::Url;

use crate::clients::HttpMethod;
use crate::resources::connection::Connection;
use crate::resources::path;
use crate::resources::{Entry, ResourceError};

/// Page size assumed until the service advertises one.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// How a search collection learns its total size when its first page
/// does not carry one.
#[derive(Debug, Clone)]
pub(crate) enum TotalSize {
    /// `GET <url>&ws.show=total_size`, answered with a bare integer.
    ShowParam,
    /// `GET <url>`, answered with `{"total_size": N}`.
    Endpoint(String),
}

/// A lazily fetched, paginated list of entries.
#[derive(Debug, Clone)]
pub struct Collection {
    conn: Connection,
    url: String,
    entries: BTreeMap<usize, Entry>,
    total_size: Option<usize>,
    page_size: usize,
    next_start: Option<usize>,
    entry_type: Option<String>,
    advertised_total: bool,
    loaded: bool,
}

impl Collection {
    pub(crate) fn new(conn: Connection, url: impl Into<String>) -> Self {
        Self {
            conn,
            url: url.into(),
            entries: BTreeMap::new(),
            total_size: None,
            page_size: DEFAULT_PAGE_SIZE,
            next_start: None,
            entry_type: None,
            advertised_total: false,
            loaded: false,
        }
    }

    /// Fetches the first page of a search URL and resolves its total size.
    pub(crate) async fn search(
        conn: Connection,
        url: String,
        total: TotalSize,
    ) -> Result<Self, ResourceError> {
        let mut collection = Self::new(conn, url);
        collection.ensure_loaded().await?;

        if !collection.advertised_total {
            let size = match total {
                TotalSize::ShowParam => {
                    let url = path::with_query(&collection.url, &[("ws.show", "total_size")]);
                    collection.conn.get(&url).await?
                }
                TotalSize::Endpoint(url) => {
                    let body = collection.conn.get(&url).await?;
                    body.get("total_size").cloned().unwrap_or(Value::Null)
                }
            };
            let size = size.as_u64().ok_or_else(|| {
                ResourceError::unexpected(&collection.url, "total size is not an integer")
            })?;
            let size = usize::try_from(size).unwrap_or(usize::MAX);
            match collection.total_size {
                // Everything arrived on the first page; that count wins.
                Some(end) if collection.next_start.is_none() => {
                    if end != size {
                        tracing::debug!(
                            "Search {} reported {} matches but returned {}",
                            collection.url,
                            size,
                            end
                        );
                    }
                }
                _ => collection.total_size = Some(size),
            }
        }
        Ok(collection)
    }

    /// Returns the collection URL, including any search query.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the absolute URL of this collection.
    #[must_use]
    pub fn self_link(&self) -> String {
        self.conn.api_base().join(&self.url)
    }

    /// Returns the type of the entries, once the first page is loaded.
    #[must_use]
    pub fn entry_type(&self) -> Option<&str> {
        self.entry_type.as_deref()
    }

    /// Returns `true` once the first page has been fetched.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Returns the number of entries.
    ///
    /// This is the advertised `total_size` when the service provides one,
    /// otherwise the number of entries across all pages.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if a page fails to load.
    pub async fn len(&mut self) -> Result<usize, ResourceError> {
        self.ensure_loaded().await?;
        while self.total_size.is_none() {
            match self.next_start {
                Some(start) => self.load_page(start).await?,
                None => self.total_size = Some(self.entries.len()),
            }
        }
        Ok(self.total_size.unwrap_or_default())
    }

    /// Returns `true` if the collection has no entries.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if a page fails to load.
    pub async fn is_empty(&mut self) -> Result<bool, ResourceError> {
        Ok(self.len().await? == 0)
    }

    /// Returns the entry at `index`, fetching its page if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::IndexOutOfRange`] if `index` is past the end,
    /// or [`ResourceError::Http`] if a page fails to load.
    pub async fn get(&mut self, index: usize) -> Result<&Entry, ResourceError> {
        self.fetch_index(index).await?;
        let len = self.total_size.unwrap_or_default();
        self.entries
            .get(&index)
            .ok_or(ResourceError::IndexOutOfRange { index, len })
    }

    /// Returns the entry at `index` for modification.
    ///
    /// # Errors
    ///
    /// See [`get`](Self::get).
    pub async fn get_mut(&mut self, index: usize) -> Result<&mut Entry, ResourceError> {
        self.fetch_index(index).await?;
        let len = self.total_size.unwrap_or_default();
        self.entries
            .get_mut(&index)
            .ok_or(ResourceError::IndexOutOfRange { index, len })
    }

    /// Returns every entry, fetching all remaining pages.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if a page fails to load.
    pub async fn entries(&mut self) -> Result<Vec<&Entry>, ResourceError> {
        self.load_all().await?;
        Ok(self.entries.values().collect())
    }

    /// Consumes the collection and returns every entry.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError`] if a page fails to load.
    pub async fn into_entries(mut self) -> Result<Vec<Entry>, ResourceError> {
        self.load_all().await?;
        Ok(self.entries.into_values().collect())
    }

    /// Loads the entry with the given id from this collection.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the entry does not exist.
    pub async fn get_by_id(&self, id: u64) -> Result<Entry, ResourceError> {
        let url = format!("{}/{id}", path::strip_query(&self.url));
        self.conn.load_entry(&url).await
    }

    /// Creates a new entry in this collection and loads it.
    ///
    /// Sends `{"ws.op": "create", ..params}`, then follows the `Location`
    /// header of the response.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the service rejects the entry, or
    /// [`ResourceError::UnexpectedResponse`] if no `Location` is returned.
    pub async fn create(&self, params: Map<String, Value>) -> Result<Entry, ResourceError> {
        let mut data = Map::new();
        data.insert("ws.op".to_string(), Value::String("create".to_string()));
        data.extend(params);

        let url = path::strip_query(&self.url);
        let response = self.conn.send(HttpMethod::Post, url, Some(data)).await?;
        let location = response
            .location()
            .ok_or_else(|| ResourceError::unexpected(url, "created without a Location header"))?;

        let new_url = self.conn.resource_url(location);
        self.conn.load_entry(&new_url).await
    }

    /// Searches this collection (`ws.op=find`) and returns the matches.
    ///
    /// The first page is fetched immediately.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Http`] if the service rejects the search.
    pub async fn find<K: AsRef<str>, V: AsRef<str>>(
        &self,
        criteria: &[(K, V)],
    ) -> Result<Self, ResourceError> {
        let mut query = vec![("ws.op".to_string(), "find".to_string())];
        query.extend(
            criteria
                .iter()
                .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string())),
        );
        let url = path::with_query(path::strip_query(&self.url), &query);
        Self::search(self.conn.clone(), url, TotalSize::ShowParam).await
    }

    async fn ensure_loaded(&mut self) -> Result<(), ResourceError> {
        if !self.loaded {
            self.load_page(0).await?;
        }
        Ok(())
    }

    async fn fetch_index(&mut self, index: usize) -> Result<(), ResourceError> {
        let len = self.len().await?;
        if index >= len {
            return Err(ResourceError::IndexOutOfRange { index, len });
        }
        if !self.entries.contains_key(&index) {
            let start = index - index % self.page_size;
            self.load_page(start).await?;
        }
        if !self.entries.contains_key(&index) {
            let len = self.total_size.unwrap_or(self.entries.len());
            return Err(ResourceError::IndexOutOfRange { index, len });
        }
        Ok(())
    }

    async fn load_all(&mut self) -> Result<(), ResourceError> {
        let len = self.len().await?;
        let mut index = 0;
        while index < self.total_size.unwrap_or(len) {
            if !self.entries.contains_key(&index) {
                let start = index - index % self.page_size;
                self.load_page(start).await?;
                if !self.entries.contains_key(&index) {
                    break;
                }
            }
            index += 1;
        }
        Ok(())
    }

    async fn load_page(&mut self, start: usize) -> Result<(), ResourceError> {
        let url = if start == 0 {
            self.url.clone()
        } else {
            path::with_query(
                &self.url,
                &[
                    ("ws.start", start.to_string()),
                    ("ws.size", self.page_size.to_string()),
                ],
            )
        };

        tracing::debug!("Loading collection page {}", url);
        let body = self.conn.get(&url).await?;
        self.loaded = true;

        let (raw_entries, page) = match body {
            Value::Array(items) => (items, Map::new()),
            Value::Object(mut page) => match page.remove("entries") {
                Some(Value::Array(items)) => (items, page),
                _ => return Err(ResourceError::unexpected(&url, "missing entries")),
            },
            _ => return Err(ResourceError::unexpected(&url, "body is not a collection")),
        };

        let start = page
            .get("start")
            .and_then(Value::as_u64)
            .and_then(|s| usize::try_from(s).ok())
            .unwrap_or(start);

        if let Some(type_link) = page.get("resource_type_link").and_then(Value::as_str) {
            self.entry_type = Some(path::resource_type(type_link).to_string());
        }
        if let Some(total) = page
            .get("total_size")
            .and_then(Value::as_u64)
            .and_then(|t| usize::try_from(t).ok())
        {
            self.total_size = Some(total);
            self.advertised_total = true;
        }

        let next = page
            .get("next_collection_link")
            .and_then(Value::as_str)
            .map(|link| self.conn.api_base().join(link))
            .and_then(|link| parse_next_link(&link));
        if let Some((next_start, size)) = next {
            if let Some(size) = size.filter(|s| *s > 0) {
                self.page_size = size;
            }
            self.next_start = next_start.filter(|s| *s > start);
        } else {
            self.next_start = None;
        }

        let count = raw_entries.len();
        for (offset, raw) in raw_entries.into_iter().enumerate() {
            let entry = Entry::from_response(self.conn.clone(), &self.url, raw)?;
            self.entries.insert(start + offset, entry);
        }

        // The last page fixes the length, whatever total_size claimed.
        if self.next_start.is_none() {
            let end = start + count;
            if self.total_size.is_some_and(|total| total != end) {
                tracing::debug!(
                    "Collection {} advertised {:?} entries but ends at {}",
                    self.url,
                    self.total_size,
                    end
                );
            }
            self.total_size = Some(end);
        }
        Ok(())
    }
}

/// Reads `ws.start` and `ws.size` from a `next_collection_link`.
fn parse_next_link(link: &str) -> Option<(Option<usize>, Option<usize>)> {
    let parsed = Url::parse(link).ok()?;
    let mut start = None;
    let mut size = None;
    for (key, value) in parsed.query_pairs() {
        match key.as_ref() {
            "ws.start" => start = value.parse().ok(),
            "ws.size" => size = value.parse().ok(),
            _ => {}
        }
    }
    Some((start, size))
}
