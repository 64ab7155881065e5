//! Transport abstraction and the default OAuth 1.0a HTTP adapter.
//!
//! Every resource operation goes through a [`Transport`]. The production
//! implementation is [`OAuthAdapter`], which signs requests and sends them
//! with `reqwest`; tests substitute their own implementation.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use url::Url;

use crate::auth::oauth::{OAuthParams, OAuthToken, SignatureMethod};
use crate::clients::errors::{ApiError, HttpError, InvalidHttpRequestError};
use crate::clients::http_request::{encode_query, value_to_param, HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::{AWeberConfig, ApiBase, ConsumerKey, ConsumerSecret};

/// Library version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Sends requests to the AWeber API.
///
/// Implementations must report any non-2xx status as
/// [`HttpError::Response`]; a returned `Ok` always carries a 2xx response.
///
/// # Example
///
/// ```rust,ignore
/// use aweber_api::clients::{HttpRequest, HttpMethod, HttpResponse, HttpError, Transport};
///
/// #[derive(Debug)]
/// struct Offline;
///
/// #[async_trait::async_trait]
/// impl Transport for Offline {
///     async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
///         Ok(HttpResponse::new(200, Default::default(), serde_json::json!({})))
///     }
/// }
/// ```
#[async_trait]
pub trait Transport: std::fmt::Debug + Send + Sync {
    /// Sends a request and returns the decoded 2xx response.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

/// The default [`Transport`]: OAuth 1.0a signed requests over `reqwest`.
///
/// Relative resource paths are resolved against the configured
/// [`ApiBase`]. Data is carried per method:
/// - GET / DELETE: as query parameters (signed)
/// - POST: as a form-encoded body (signed)
/// - PATCH: as a JSON body
///
/// # Thread Safety
///
/// `OAuthAdapter` is `Send + Sync`; the access token can be swapped in
/// place after an OAuth exchange.
#[derive(Debug)]
pub struct OAuthAdapter {
    client: reqwest::Client,
    api_base: ApiBase,
    consumer_key: ConsumerKey,
    consumer_secret: ConsumerSecret,
    signature_method: SignatureMethod,
    token: RwLock<Option<OAuthToken>>,
    default_headers: HashMap<String, String>,
}

// Verify OAuthAdapter is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OAuthAdapter>();
};

impl OAuthAdapter {
    /// Creates a new adapter from the client configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(config: &AWeberConfig) -> Self {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}AWeber API Library v{SDK_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let token = config
            .access_token()
            .zip(config.token_secret())
            .map(|(token, secret)| OAuthToken::new(token.as_ref(), secret.as_ref()));

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_base: config.api_base().clone(),
            consumer_key: config.consumer_key().clone(),
            consumer_secret: config.consumer_secret().clone(),
            signature_method: config.signature_method(),
            token: RwLock::new(token),
            default_headers,
        }
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn api_base(&self) -> &ApiBase {
        &self.api_base
    }

    /// Returns the default headers for this adapter.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Returns the token requests are currently signed with.
    #[must_use]
    pub fn token(&self) -> Option<OAuthToken> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the token requests are signed with.
    pub fn set_token(&self, token: Option<OAuthToken>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    /// Splits a URL into its signing base and decoded query parameters.
    fn split_url(url: &str) -> Result<(String, Vec<(String, String)>), InvalidHttpRequestError> {
        let mut parsed = Url::parse(url).map_err(|_| InvalidHttpRequestError::InvalidUrl {
            url: url.to_string(),
        })?;
        let params = parsed
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        parsed.set_query(None);
        parsed.set_fragment(None);
        Ok((parsed.to_string(), params))
    }
}

#[async_trait]
impl Transport for OAuthAdapter {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let data_params: Vec<(String, String)> = request
            .data
            .iter()
            .flatten()
            .map(|(k, v)| (k.clone(), value_to_param(v)))
            .collect();

        let mut url = self.api_base.join(&request.full_url());
        if matches!(request.http_method, HttpMethod::Get | HttpMethod::Delete)
            && !data_params.is_empty()
        {
            let separator = if url.contains('?') { '&' } else { '?' };
            url = format!("{url}{separator}{}", encode_query(&data_params));
        }

        let (base_url, mut signed_params) = Self::split_url(&url)?;
        if request.http_method == HttpMethod::Post {
            signed_params.extend(data_params.iter().cloned());
        }

        let token = request.token.clone().or_else(|| self.token());
        let oauth = OAuthParams::new(
            self.consumer_key.as_ref(),
            token.as_ref().map(|t| t.token.clone()),
            self.signature_method,
        );
        let authorization = oauth.authorization_header(
            request.http_method.as_str(),
            &base_url,
            &signed_params,
            self.consumer_secret.as_ref(),
            token.as_ref().map(|t| t.secret.as_str()),
        );

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Patch => self.client.patch(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        req_builder = req_builder.header("Authorization", authorization);

        match request.http_method {
            HttpMethod::Post => {
                req_builder = req_builder
                    .header("Content-Type", "application/x-www-form-urlencoded")
                    .body(encode_query(&data_params));
            }
            HttpMethod::Patch => {
                let body = request.data.clone().unwrap_or_default();
                req_builder = req_builder.json(&body);
            }
            HttpMethod::Get | HttpMethod::Delete => {}
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let headers = parse_response_headers(res.headers());
        let body_text = res.text().await.unwrap_or_default();
        let response = HttpResponse::new(code, headers, HttpResponse::parse_body(&body_text));

        tracing::debug!(
            "{} {} -> {}",
            request.http_method.as_str(),
            url,
            response.code
        );

        if response.is_ok() {
            Ok(response)
        } else {
            Err(HttpError::Response(ApiError::from_response(
                response.code,
                &response.body,
            )))
        }
    }
}

/// Parses response headers into a `HashMap` keyed by lowercase name.
fn parse_response_headers(headers: &reqwest::header::HeaderMap) -> HashMap<String, Vec<String>> {
    let mut result: HashMap<String, Vec<String>> = HashMap::new();
    for (name, value) in headers {
        let key = name.as_str().to_lowercase();
        let value = value.to_str().unwrap_or_default().to_string();
        result.entry(key).or_default().push(value);
    }
    result
}
