//! Result cache for fetched record sets
//!
//! Host pages keep the last record set of each list query here so that
//! revisiting a page does not refetch it. Collaborators announce writes as
//! [`Mutation`]s, which drop every cached query of the written resource.

mod config;
mod key;
mod memory;

pub use config::*;
pub use key::*;
pub use memory::*;

use std::sync::Arc;
use std::time::Duration;

use chrono::DateTime;
use chrono::Utc;

/// A cached record set with metadata about when it was cached and when it expires.
#[derive(Debug)]
pub struct CachedRecords<R> {
    /// The record set, shared with every reader.
    pub records: Arc<Vec<R>>,
    /// When this set was cached.
    pub created_at: DateTime<Utc>,
    /// When this set expires and should no longer be returned.
    pub expires_at: DateTime<Utc>,
}

impl<R> CachedRecords<R> {
    /// Creates a cached record set with a TTL from now.
    pub fn with_ttl(records: Vec<R>, ttl: Duration) -> Self {
        let now = Utc::now();
        let expires_at = now + chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::zero());
        Self {
            records: Arc::new(records),
            created_at: now,
            expires_at,
        }
    }

    /// Returns `true` if this record set has expired.
    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

impl<R> Clone for CachedRecords<R> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
            created_at: self.created_at,
            expires_at: self.expires_at,
        }
    }
}

/// A write to a backend resource, announced by whoever performed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    resource: String,
}

impl Mutation {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
        }
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }
}
