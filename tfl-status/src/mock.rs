//! Mock status client for testing without network access.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::client::StatusClient;
use crate::error::TflError;
use crate::types::{Report, decode_reports};

/// Scripted in-memory [`StatusClient`].
///
/// Serves a fixed set of reports, or a fixed failure, and counts how many
/// times `line_status` is invoked. The scripted response can be swapped at
/// runtime to exercise refresh behavior.
pub struct MockStatusClient {
    response: tokio::sync::RwLock<Result<Vec<Report>, String>>,
    calls: AtomicUsize,
    base_url: String,
}

impl MockStatusClient {
    /// A client that serves the given reports on every fetch.
    pub fn with_reports(reports: Vec<Report>) -> Self {
        Self {
            response: tokio::sync::RwLock::new(Ok(reports)),
            calls: AtomicUsize::new(0),
            base_url: "mock://tfl/".to_string(),
        }
    }

    /// A client whose every fetch fails with a decode error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            response: tokio::sync::RwLock::new(Err(message.into())),
            calls: AtomicUsize::new(0),
            base_url: "mock://tfl/".to_string(),
        }
    }

    /// Build a mock from a canned JSON response body, decoded through the
    /// same path as the real client.
    pub fn from_json(body: &str) -> Result<Self, TflError> {
        Ok(Self::with_reports(decode_reports(body)?))
    }

    /// Replace the scripted response with the given reports.
    pub async fn serve_reports(&self, reports: Vec<Report>) {
        *self.response.write().await = Ok(reports);
    }

    /// Make every subsequent fetch fail.
    pub async fn fail_from_now_on(&self, message: impl Into<String>) {
        *self.response.write().await = Err(message.into());
    }

    /// How many times `line_status` has been called.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    /// The base URL most recently set, for asserting propagation.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl StatusClient for MockStatusClient {
    async fn line_status(&self) -> Result<Vec<Report>, TflError> {
        self.calls.fetch_add(1, Ordering::Relaxed);

        match &*self.response.read().await {
            Ok(reports) => Ok(reports.clone()),
            Err(message) => Err(TflError::Json {
                message: message.clone(),
            }),
        }
    }

    fn set_base_url(&mut self, base_url: String) {
        self.base_url = base_url;
    }
}
