//! Cache configuration

use std::time::Duration;

/// Configuration for how long fetched record sets stay cached.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use tabula_lib::cache::CacheConfig;
///
/// let config = CacheConfig::default().with_query_ttl(Duration::from_secs(60));
/// assert_eq!(config.query_ttl, Duration::from_secs(60));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// TTL for list query results.
    ///
    /// Default: 5 minutes
    pub query_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            query_ttl: Duration::from_secs(300), // 5 minutes
        }
    }
}

impl CacheConfig {
    /// Creates a new cache config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the query TTL.
    pub fn with_query_ttl(mut self, ttl: Duration) -> Self {
        self.query_ttl = ttl;
        self
    }

    /// Creates a config with no caching (zero TTL).
    pub fn no_cache() -> Self {
        Self {
            query_ttl: Duration::ZERO,
        }
    }

    /// Returns `true` when nothing would ever be served from the cache.
    pub fn is_disabled(&self) -> bool {
        self.query_ttl.is_zero()
    }
}
