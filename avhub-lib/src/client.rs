//! Main HubClient

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use log::warn;
use reqwest::Client;
use reqwest::Method;
use reqwest::RequestBuilder;
use reqwest::Response;
use serde::de::DeserializeOwned;
use url::Url;

use crate::RetryConfig;
use crate::api::DashboardSummary;
use crate::api::RowSource;
use crate::api::RowsEnvelope;
use crate::error::ApiError;
use crate::error::AuthError;
use crate::error::Error;
use crate::model::Record;
use crate::resource::ResourceKind;
use crate::session::AdminSession;
use crate::view::FilterSet;

/// Client for the hub's REST API.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely.
///
/// # Example
///
/// ```ignore
/// use avhub_lib::{HubClient, FilterSet, resource::ResourceKind};
///
/// let client = HubClient::builder()
///     .url("http://localhost:8000")
///     .build()?;
///
/// let active = FilterSet::new().with("status", "Active");
/// let rows = client.list(ResourceKind::Deployments, &active).await?;
/// ```
#[derive(Clone)]
pub struct HubClient {
    inner: Arc<HubClientInner>,
}

struct HubClientInner {
    base_url: Url,
    http_client: Client,
    timeout: Option<Duration>,
    retry: RetryConfig,
}

impl HubClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> HubClientBuilder<Missing> {
        HubClientBuilder::new()
    }

    /// Returns the base URL of the hub.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Lists the records of `kind` matching `filters`.
    ///
    /// Filters are sent as query parameters; the server applies them.
    pub async fn list(
        &self,
        kind: ResourceKind,
        filters: &FilterSet,
    ) -> Result<Vec<Record>, ApiError> {
        let mut url = self.endpoint(&["api", kind.path()])?;
        append_query(&mut url, filters);
        let envelope: RowsEnvelope = self.get_json(url).await?;
        Ok(envelope.into_rows())
    }

    /// Fetches a single record by id.
    pub async fn get(&self, kind: ResourceKind, id: &str) -> Result<Record, ApiError> {
        let url = self.endpoint(&["api", kind.path(), id])?;
        self.get_json(url).await
    }

    /// Fetches the home page summary: counts per kind and the newest records.
    pub async fn dashboard(&self) -> Result<DashboardSummary, ApiError> {
        let url = self.endpoint(&["api", "dashboard"])?;
        self.get_json(url).await
    }

    /// Builds the CSV export link for `kind` under the current filters.
    ///
    /// The link is not fetched; front ends hand it to a browser or downloader.
    pub fn export_csv_url(&self, kind: ResourceKind, filters: &FilterSet) -> Result<Url, ApiError> {
        let mut url = self.endpoint(&["api", kind.path(), "export", "csv"])?;
        append_query(&mut url, filters);
        Ok(url)
    }

    // =========================================================================
    // Admin writes
    // =========================================================================

    /// Creates a record. Returns the stored record as echoed by the server.
    pub async fn create(
        &self,
        kind: ResourceKind,
        record: &Record,
        session: &AdminSession,
    ) -> Result<Record, Error> {
        let url = self.endpoint(&["api", "admin", kind.path()])?;
        let response = self.send_admin(Method::POST, url, Some(record), session).await?;
        Ok(decode(response).await?)
    }

    /// Replaces the fields of record `id`.
    pub async fn update(
        &self,
        kind: ResourceKind,
        id: &str,
        record: &Record,
        session: &AdminSession,
    ) -> Result<Record, Error> {
        let url = self.endpoint(&["api", "admin", kind.path(), id])?;
        let response = self.send_admin(Method::PUT, url, Some(record), session).await?;
        Ok(decode(response).await?)
    }

    /// Deletes record `id`.
    pub async fn delete(
        &self,
        kind: ResourceKind,
        id: &str,
        session: &AdminSession,
    ) -> Result<(), Error> {
        let url = self.endpoint(&["api", "admin", kind.path(), id])?;
        self.send_admin(Method::DELETE, url, None, session).await?;
        Ok(())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Joins path segments onto the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let request = self.inner.http_client.request(method, url);
        match self.inner.timeout {
            Some(timeout) => request.timeout(timeout),
            None => request,
        }
    }

    /// GETs and decodes `url`, retrying transient failures.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let retry = &self.inner.retry;
        let mut attempt = 0;

        loop {
            debug!("GET {url}");
            let result = match self.request(Method::GET, url.clone()).send().await {
                Ok(response) => decode(response).await,
                Err(e) => Err(ApiError::from(e)),
            };

            match result {
                Err(e) if retry.should_retry(&e, attempt) => {
                    let delay = retry.delay_for(attempt);
                    warn!("GET {url} failed ({e}); retrying in {delay:?}");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }

    /// Sends an authenticated admin request. Never retried.
    async fn send_admin(
        &self,
        method: Method,
        url: Url,
        body: Option<&Record>,
        session: &AdminSession,
    ) -> Result<Response, Error> {
        debug!("{method} {url} as {}", session.username());
        let mut request = self
            .request(method, url)
            .basic_auth(session.username(), Some(session.password()));
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(ApiError::from)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AuthError::InvalidCredentials.into());
        }
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Could not read the {status} response body: {e}");
                String::new()
            }
        };
        Err(ApiError::from_body(status.as_u16(), &body).into())
    }
}

#[async_trait]
impl RowSource for HubClient {
    async fn fetch_rows(
        &self,
        kind: ResourceKind,
        filters: &FilterSet,
    ) -> Result<Vec<Record>, Error> {
        Ok(self.list(kind, filters).await?)
    }
}

impl std::fmt::Debug for HubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HubClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("timeout", &self.inner.timeout)
            .field("retry", &self.inner.retry)
            .finish()
    }
}

fn append_query(url: &mut Url, filters: &FilterSet) {
    let pairs = filters.query_pairs();
    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(pairs);
    }
}

/// Reads a response body, turning non-success statuses into errors.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ApiError::from_body(status.as_u16(), &body));
    }
    serde_json::from_str(&body).map_err(|e| ApiError::parse_with_body(e.to_string(), body))
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`HubClient`].
///
/// Uses the typestate pattern so `build` is only reachable once `url` is set.
///
/// # Example
///
/// ```ignore
/// let client = HubClient::builder()
///     .url("http://localhost:8000")
///     .timeout(Duration::from_secs(30))
///     .retry(RetryConfig::no_retry())
///     .build()?;
/// ```
pub struct HubClientBuilder<U> {
    url: U,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    retry: RetryConfig,
    http_client: Option<Client>,
}

impl HubClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            timeout: None,
            connect_timeout: None,
            retry: RetryConfig::default(),
            http_client: None,
        }
    }

    /// Sets the hub's base URL, e.g. `http://localhost:8000`.
    pub fn url(self, url: impl Into<String>) -> HubClientBuilder<Set<String>> {
        HubClientBuilder {
            url: Set(url.into()),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            retry: self.retry,
            http_client: self.http_client,
        }
    }
}

impl Default for HubClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U> HubClientBuilder<U> {
    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the request timeout if one is given.
    pub fn timeout_opt(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets the retry behaviour for reads.
    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl HubClientBuilder<Set<String>> {
    /// Builds the [`HubClient`].
    ///
    /// Fails if the URL does not parse or cannot carry a path.
    pub fn build(self) -> Result<HubClient, ApiError> {
        let raw = self.url.0;
        let base_url =
            Url::parse(raw.trim()).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(raw));
        }

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(HubClient {
            inner: Arc::new(HubClientInner {
                base_url,
                http_client,
                timeout: self.timeout,
                retry: self.retry,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(url: &str) -> HubClient {
        HubClient::builder().url(url).build().unwrap()
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert!(matches!(
            HubClient::builder().url("not a url").build(),
            Err(ApiError::InvalidUrl(_))
        ));
        assert!(matches!(
            HubClient::builder().url("mailto:admin@example.org").build(),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let hub = client("http://localhost:8000/");
        let url = hub.endpoint(&["api", "admin", "policies", "12"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/admin/policies/12");

        let nested = client("https://example.org/hub");
        let url = nested.endpoint(&["api", "safety", "a b"]).unwrap();
        assert_eq!(url.as_str(), "https://example.org/hub/api/safety/a%20b");
    }

    #[test]
    fn test_export_csv_url() {
        let hub = client("http://localhost:8000");

        let url = hub
            .export_csv_url(ResourceKind::Policies, &FilterSet::new())
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/policies/export/csv");

        let filters = FilterSet::new()
            .with("state_code", "CA")
            .with("status", "Enacted")
            .with_search("robo taxi");
        let url = hub.export_csv_url(ResourceKind::Policies, &filters).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/policies/export/csv?state_code=CA&status=Enacted&search=robo+taxi"
        );
    }
}
