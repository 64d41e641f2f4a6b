//! In-memory result cache using DashMap

use std::sync::Arc;

use dashmap::DashMap;
use log::debug;

use super::CacheConfig;
use super::CachedRecords;
use super::Mutation;
use super::QueryKey;

/// An in-memory cache of record sets backed by a concurrent hash map.
///
/// Expired entries are never returned; they are dropped on access or by
/// [`gc`](ResultCache::gc).
///
/// # Example
///
/// ```
/// use tabula_lib::cache::{Mutation, QueryKey, ResultCache};
/// use tabula_lib::model::Record;
///
/// let cache: ResultCache<Record> = ResultCache::new();
/// let key = QueryKey::new("members");
///
/// cache.insert(key.clone(), vec![Record::new().set("name", "Ada")]);
/// assert_eq!(cache.get(&key).map(|r| r.len()), Some(1));
///
/// cache.invalidate(&Mutation::new("members"));
/// assert!(cache.get(&key).is_none());
/// ```
#[derive(Debug)]
pub struct ResultCache<R> {
    store: DashMap<QueryKey, CachedRecords<R>>,
    config: CacheConfig,
}

impl<R> Default for ResultCache<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> ResultCache<R> {
    /// Creates a new empty cache with the default TTL.
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Creates a new empty cache with the given configuration.
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            store: DashMap::new(),
            config,
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Returns the number of entries in the cache (including expired ones).
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Returns the cached record set for a query, unless missing or expired.
    pub fn get(&self, key: &QueryKey) -> Option<Arc<Vec<R>>> {
        let entry = self.store.get(key)?;

        if entry.value().is_expired() {
            drop(entry);
            self.store.remove(key);
            debug!("Cache expired: {}", key);
            None
        } else {
            Some(Arc::clone(&entry.value().records))
        }
    }

    /// Stores the record set fetched for a query, replacing any previous one.
    pub fn insert(&self, key: QueryKey, records: Vec<R>) {
        if self.config.is_disabled() {
            return;
        }
        debug!("Cache store: {} ({} records)", key, records.len());
        self.store
            .insert(key, CachedRecords::with_ttl(records, self.config.query_ttl));
    }

    /// Removes one query's record set.
    pub fn remove(&self, key: &QueryKey) {
        self.store.remove(key);
    }

    /// Drops every query of the mutated resource.
    ///
    /// Returns the number of entries removed.
    pub fn invalidate(&self, mutation: &Mutation) -> usize {
        let mut removed = 0;
        self.store.retain(|key, _| {
            if key.resource() == mutation.resource() {
                removed += 1;
                false
            } else {
                true
            }
        });
        debug!("Cache invalidated {} entries of '{}'", removed, mutation.resource());
        removed
    }

    /// Clears all entries.
    pub fn clear(&self) {
        self.store.clear();
    }

    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn gc(&self) -> usize {
        let mut removed = 0;
        self.store.retain(|_, value| {
            if value.is_expired() {
                removed += 1;
                false
            } else {
                true
            }
        });
        removed
    }
}
