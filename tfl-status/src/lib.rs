//! TfL line-status client.
//!
//! Retrieves the current status of London transit lines (tube, DLR,
//! Overground, TfL Rail) from the TfL Unified API, with an optional
//! in-memory caching decorator that bounds how often the network is hit.
//!
//! The [`StatusClient`] trait is the capability boundary: [`TflClient`]
//! performs the HTTP fetch, [`CachedTflClient`] wraps any other
//! implementer and serves cached reports within a freshness window, and
//! [`mock::MockStatusClient`] serves scripted data for tests.

mod cache;
mod client;
mod error;
mod types;

pub mod mock;

pub use cache::CachedTflClient;
pub use client::{StatusClient, TflClient, TflConfig};
pub use error::TflError;
pub use types::{LineStatus, Report, reports_by_name};
