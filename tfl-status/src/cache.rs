//! In-memory caching decorator for line status.
//!
//! Wraps any [`StatusClient`] and serves the last fetched reports while
//! they are within a freshness window, so repeated callers don't hit the
//! network more than once per interval.

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use crate::client::{StatusClient, TflClient, TflConfig};
use crate::error::TflError;
use crate::types::Report;

/// The cached reports plus the instant they were last refreshed.
#[derive(Debug, Default)]
struct CacheState {
    reports: Vec<Report>,
    refreshed_at: Option<Instant>,
}

impl CacheState {
    /// A cache is stale once its age strictly exceeds the freshness
    /// interval. A cache that has never been refreshed is always stale,
    /// as is any cache with a zero or negative interval.
    fn is_stale(&self, interval_secs: i64) -> bool {
        match self.refreshed_at {
            None => true,
            Some(at) => at.elapsed().as_secs_f64() > interval_secs as f64,
        }
    }
}

/// Caching decorator over any [`StatusClient`].
///
/// The freshness interval is fixed at construction. Within the interval,
/// `line_status` returns the cached reports without touching the inner
/// client; once the interval has lapsed, the next call delegates to the
/// inner client and the result replaces the cache as a whole.
pub struct CachedTflClient<C> {
    inner: C,
    interval_secs: i64,
    state: Mutex<CacheState>,
}

impl<C: StatusClient> CachedTflClient<C> {
    /// Wrap `inner` with a freshness window of `interval_secs` seconds.
    ///
    /// A zero or negative interval means every call refreshes. The first
    /// call after construction always performs a real fetch.
    pub fn new(inner: C, interval_secs: i64) -> Self {
        Self {
            inner,
            interval_secs,
            state: Mutex::new(CacheState::default()),
        }
    }

    /// Access the wrapped client, e.g. for operations that bypass the cache.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// The freshness interval in seconds.
    pub fn interval_secs(&self) -> i64 {
        self.interval_secs
    }
}

impl CachedTflClient<TflClient> {
    /// Convenience constructor wrapping a fresh [`TflClient`].
    pub fn with_config(config: TflConfig, interval_secs: i64) -> Result<Self, TflError> {
        Ok(Self::new(TflClient::new(config)?, interval_secs))
    }
}

#[async_trait]
impl<C: StatusClient> StatusClient for CachedTflClient<C> {
    async fn line_status(&self) -> Result<Vec<Report>, TflError> {
        // The lock is held across check, fetch and update, so concurrent
        // stale-triggering callers serialize and at most one of them
        // performs the network fetch per window.
        let mut state = self.state.lock().await;

        if !state.is_stale(self.interval_secs) {
            debug!("serving line status from cache");
            return Ok(state.reports.clone());
        }

        debug!("cache is stale, refreshing line status");
        let result = self.inner.line_status().await;

        // A failed refresh overwrites the cache with the empty result and
        // still consumes the window: the upstream is re-polled once per
        // interval, not on every call until it recovers.
        state.reports = match &result {
            Ok(reports) => reports.clone(),
            Err(_) => Vec::new(),
        };
        state.refreshed_at = Some(Instant::now());

        result
    }

    fn set_base_url(&mut self, base_url: String) {
        // Forwarded unchanged; reports cached from the previous endpoint
        // keep being served until the window lapses.
        self.inner.set_base_url(base_url);
    }
}
