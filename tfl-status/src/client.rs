//! TfL line-status HTTP client.
//!
//! Provides the [`StatusClient`] capability trait and the direct HTTP
//! implementation against the TfL Unified API.

use async_trait::async_trait;
use tracing::warn;

use crate::error::TflError;
use crate::types::{Report, decode_reports};

/// Default base URL for the TfL Unified API.
const DEFAULT_BASE_URL: &str = "https://api.tfl.gov.uk/";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Modes covered by every status request.
const STATUS_MODES: &str = "tube,dlr,overground,tflrail";

/// Something that can report the current status of the watched lines.
///
/// Implemented by [`TflClient`] (direct HTTP fetch), by
/// [`CachedTflClient`](crate::CachedTflClient) (which wraps any other
/// implementer, so decorators can be chained), and by the scripted
/// [`MockStatusClient`](crate::mock::MockStatusClient).
#[async_trait]
pub trait StatusClient: Send + Sync {
    /// Retrieve the current status of every watched line.
    ///
    /// An empty vector is a valid result: the API reported no lines.
    async fn line_status(&self) -> Result<Vec<Report>, TflError>;

    /// Replace the base URL used by subsequent requests.
    ///
    /// The URL is not validated here; a bad value surfaces as an HTTP
    /// error on the next fetch. It is expected to end with `/`.
    fn set_base_url(&mut self, base_url: String);
}

/// Configuration for the TfL client.
///
/// All transport state is carried here explicitly; there are no
/// process-wide defaults.
#[derive(Debug, Clone)]
pub struct TflConfig {
    /// Base URL for the API, including the trailing slash.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl TflConfig {
    /// Create a config pointing at the production TfL API.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for TflConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Direct HTTP client for the TfL line-status endpoint.
///
/// Performs one GET per call, with no caching, retries or rate limiting.
#[derive(Debug, Clone)]
pub struct TflClient {
    http: reqwest::Client,
    base_url: String,
}

impl TflClient {
    /// Create a new client with the given configuration.
    pub fn new(config: TflConfig) -> Result<Self, TflError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self::with_http_client(http, config))
    }

    /// Build a client around a caller-supplied `reqwest::Client`.
    ///
    /// The supplied client's own timeout and connection settings apply;
    /// `config.timeout_secs` is ignored on this path.
    pub fn with_http_client(http: reqwest::Client, config: TflConfig) -> Self {
        Self {
            http,
            base_url: config.base_url,
        }
    }

    /// The base URL currently in use.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl StatusClient for TflClient {
    async fn line_status(&self) -> Result<Vec<Report>, TflError> {
        let url = format!("{}Line/Mode/{}/Status/", self.base_url, STATUS_MODES);

        let response = self.http.get(&url).send().await.map_err(|e| {
            warn!(error = %e, "could not reach the TfL API");
            e
        })?;

        // Whatever the status code, the body is decoded as-is; an error
        // page that isn't a JSON array surfaces as a decode failure.
        let body = response.text().await?;

        decode_reports(&body)
    }

    fn set_base_url(&mut self, base_url: String) {
        self.base_url = base_url;
    }
}
