//! Main client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::api::{
    AccountApi, AccountsApi, AttachmentsApi, ContactsApi, GroupsApi, IdentitiesApi, MessagesApi,
    ServiceApi,
};
use crate::error::{Error, ErrorResponse, Result};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// Environment variable read by [`SignalClient::from_env`].
pub const BASE_URL_ENV: &str = "SIGNAL_API_URL";

/// Query pairs appended to a request URL.
pub(crate) type Query<'a> = &'a [(&'a str, String)];

/// signal-cli REST API client.
///
/// Cheap to clone; clones share one connection pool.
///
/// # Example
///
/// ```no_run
/// use signalmgr_client::SignalClient;
///
/// # async fn example() -> signalmgr_client::Result<()> {
/// let client = SignalClient::builder()
///     .base_url("http://localhost:8080")
///     .build()?;
///
/// let groups = client.groups("+15550001111").list().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SignalClient {
    inner: Arc<ClientInner>,
}

/// Inner client state (shared across clones).
pub(crate) struct ClientInner {
    /// HTTP client.
    pub(crate) http: reqwest::Client,
    /// Base URL for API requests, always ending in `/`.
    pub(crate) base_url: Url,
    /// Per-request timeout; `None` leaves it to the HTTP client.
    pub(crate) timeout: Option<Duration>,
}

impl std::fmt::Debug for SignalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignalClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("timeout", &self.inner.timeout)
            .finish()
    }
}

impl SignalClient {
    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a client with default settings pointing to localhost.
    pub fn localhost() -> Result<Self> {
        Self::builder().base_url(DEFAULT_BASE_URL).build()
    }

    /// Create a client from `SIGNAL_API_URL`, falling back to localhost.
    pub fn from_env() -> Result<Self> {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::builder().base_url(url.trim()).build(),
            _ => Self::localhost(),
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    // ─────────────────────────────────────────────────────────────────────────
    // API accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Service-wide endpoints (about, health, configuration, search).
    pub fn service(&self) -> ServiceApi {
        ServiceApi::new(self.clone())
    }

    /// Downloaded attachments.
    pub fn attachments(&self) -> AttachmentsApi {
        AttachmentsApi::new(self.clone())
    }

    /// Registered and linked accounts.
    pub fn accounts(&self) -> AccountsApi {
        AccountsApi::new(self.clone())
    }

    /// Settings, registration and profile of one account.
    pub fn account(&self, number: impl Into<String>) -> AccountApi {
        AccountApi::new(self.clone(), number.into())
    }

    /// Groups of one account.
    pub fn groups(&self, number: impl Into<String>) -> GroupsApi {
        GroupsApi::new(self.clone(), number.into())
    }

    /// Sending and receiving messages for one account.
    pub fn messages(&self, number: impl Into<String>) -> MessagesApi {
        MessagesApi::new(self.clone(), number.into())
    }

    /// Contacts of one account.
    pub fn contacts(&self, number: impl Into<String>) -> ContactsApi {
        ContactsApi::new(self.clone(), number.into())
    }

    /// Identities known to one account.
    pub fn identities(&self, number: impl Into<String>) -> IdentitiesApi {
        IdentitiesApi::new(self.clone(), number.into())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transport
    // ─────────────────────────────────────────────────────────────────────────

    /// Issue an arbitrary request and decode the response.
    ///
    /// `path` is relative to the base URL and already interpolated, e.g.
    /// `/v1/groups/+15550001111`. Useful for endpoints without a wrapper.
    pub async fn request<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let bytes = self.execute(method, path, &[], body).await?;
        decode(&bytes)
    }

    /// Build a URL for an API path.
    pub(crate) fn url(&self, path: &str) -> Result<Url> {
        let path = path.trim_start_matches('/');
        self.inner.base_url.join(path).map_err(Error::from)
    }

    /// Build the WebSocket URL for an API path.
    pub(crate) fn ws_url(&self, path: &str) -> Result<Url> {
        let mut url = self.url(path)?;
        let scheme = match url.scheme() {
            "http" => "ws",
            "https" => "wss",
            other => {
                return Err(Error::Config(format!("Unsupported URL scheme: {}", other)));
            }
        };
        url.set_scheme(scheme)
            .map_err(|_| Error::Config(format!("Failed to set scheme {}", scheme)))?;
        Ok(url)
    }

    /// Make a GET request.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let bytes = self.execute(Method::GET, path, &[], NO_BODY).await?;
        decode(&bytes)
    }

    /// Make a GET request with query parameters.
    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Query<'_>,
    ) -> Result<T> {
        let bytes = self.execute(Method::GET, path, query, NO_BODY).await?;
        decode(&bytes)
    }

    /// Make a GET request and return the body untouched.
    pub(crate) async fn get_raw(&self, path: &str) -> Result<Vec<u8>> {
        self.execute(Method::GET, path, &[], NO_BODY).await
    }

    /// Make a GET request with query parameters and return the body untouched.
    pub(crate) async fn get_raw_with_query(&self, path: &str, query: Query<'_>) -> Result<Vec<u8>> {
        self.execute(Method::GET, path, query, NO_BODY).await
    }

    /// Make a POST request.
    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let bytes = self.execute(Method::POST, path, &[], Some(body)).await?;
        decode(&bytes)
    }

    /// Make a POST request whose response carries nothing of interest.
    pub(crate) async fn post_unit<B>(&self, path: &str, body: Option<&B>) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.execute(Method::POST, path, &[], body).await.map(drop)
    }

    /// Make a PUT request.
    pub(crate) async fn put<B>(&self, path: &str, body: Option<&B>) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.execute(Method::PUT, path, &[], body).await.map(drop)
    }

    /// Make a DELETE request.
    pub(crate) async fn delete<B>(&self, path: &str, body: Option<&B>) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        self.execute(Method::DELETE, path, &[], body).await.map(drop)
    }

    /// Run one request/response round trip and classify the outcome.
    async fn execute<B>(
        &self,
        method: Method,
        path: &str,
        query: Query<'_>,
        body: Option<&B>,
    ) -> Result<Vec<u8>>
    where
        B: Serialize + ?Sized,
    {
        let body = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(Error::Encoding)?;

        let url = self.url(path)?;
        tracing::debug!(%method, %url, "Sending request");

        let mut request = self.inner.http.request(method, url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(body);
        }
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        tracing::debug!(status, len = bytes.len(), "Received response");

        check_response(status, bytes.to_vec())
    }
}

/// Placeholder for requests without a body.
pub(crate) const NO_BODY: Option<&()> = None;

/// Classify a completed response.
///
/// An `error` field in the body wins over the status code.
pub(crate) fn check_response(status: u16, body: Vec<u8>) -> Result<Vec<u8>> {
    if let Some(message) = ErrorResponse::message(&body) {
        return Err(Error::Server(message));
    }

    if !(200..=299).contains(&status) {
        return Err(Error::HttpStatus {
            status,
            body: String::from_utf8_lossy(&body).into_owned(),
        });
    }

    Ok(body)
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(Error::Decoding)
}

/// Builder for creating a SignalClient.
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            base_url: None,
            timeout: None,
            user_agent: None,
        }
    }

    /// Set the base URL for the server (default `http://127.0.0.1:8080`).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<SignalClient> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        // Parse and normalize base URL
        let mut base_url = Url::parse(&base_url)?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "base_url must be http or https, got {}",
                base_url.scheme()
            )));
        }
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("signalmgr-client/{}", env!("CARGO_PKG_VERSION")));

        let http = reqwest::Client::builder().user_agent(user_agent).build()?;

        Ok(SignalClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
