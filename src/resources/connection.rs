//! The transport handle shared by entries and collections.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::clients::{HttpError, HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::config::ApiBase;
use crate::resources::{Entry, ResourceError};

/// A transport plus the base URL its resources live under.
///
/// Every entry and collection holds a clone; cloning shares the transport.
#[derive(Clone, Debug)]
pub(crate) struct Connection {
    transport: Arc<dyn Transport>,
    api_base: ApiBase,
}

impl Connection {
    pub(crate) fn new(transport: Arc<dyn Transport>, api_base: ApiBase) -> Self {
        Self {
            transport,
            api_base,
        }
    }

    pub(crate) const fn api_base(&self) -> &ApiBase {
        &self.api_base
    }

    /// Converts an absolute link into a resource URL.
    pub(crate) fn resource_url(&self, link: &str) -> String {
        self.api_base.strip(link).to_string()
    }

    pub(crate) async fn send(
        &self,
        method: HttpMethod,
        url: &str,
        data: Option<Map<String, Value>>,
    ) -> Result<HttpResponse, ResourceError> {
        let mut builder = HttpRequest::builder(method, url);
        if let Some(data) = data {
            builder = builder.data(data);
        }
        let request = builder.build().map_err(HttpError::from)?;
        Ok(self.transport.send(request).await?)
    }

    pub(crate) async fn get(&self, url: &str) -> Result<Value, ResourceError> {
        Ok(self.send(HttpMethod::Get, url, None).await?.body)
    }

    /// Loads the entry at `url`.
    pub(crate) async fn load_entry(&self, url: &str) -> Result<Entry, ResourceError> {
        let body = self.get(url).await?;
        Entry::from_response(self.clone(), url, body)
    }
}
