//! Tests for the result cache.

use std::sync::Arc;
use std::time::Duration;

use tabula_lib::cache::{CacheConfig, Mutation, QueryKey, ResultCache};
use tabula_lib::model::Record;
use tabula_lib::view::Direction;

fn members(n: usize) -> Vec<Record> {
    (0..n)
        .map(|i| Record::new().set("name", format!("m{i}")))
        .collect()
}

#[test]
fn test_get_returns_shared_records() {
    let cache = ResultCache::new();
    let key = QueryKey::new("members").select(&["name"]);
    cache.insert(key.clone(), members(3));

    let first = cache.get(&key).unwrap();
    let second = cache.get(&key).unwrap();
    assert_eq!(first.len(), 3);
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_keys_differ_by_params() {
    let cache = ResultCache::new();
    let by_name = QueryKey::new("payments").order_by("name", Direction::Ascending);
    let by_date = QueryKey::new("payments").order_by("date", Direction::Descending);
    cache.insert(by_name.clone(), members(1));

    assert!(cache.get(&by_name).is_some());
    assert!(cache.get(&by_date).is_none());
}

#[test]
fn test_mutation_invalidates_resource_only() {
    let cache = ResultCache::new();
    cache.insert(QueryKey::new("payments"), members(1));
    cache.insert(QueryKey::new("payments").select(&["amount"]), members(2));
    cache.insert(QueryKey::new("members"), members(3));

    assert_eq!(cache.invalidate(&Mutation::new("payments")), 2);
    assert_eq!(cache.len(), 1);
    assert!(cache.get(&QueryKey::new("members")).is_some());
    assert_eq!(cache.invalidate(&Mutation::new("payments")), 0);
}

#[test]
fn test_expired_entries_are_not_returned() {
    let cache = ResultCache::with_config(CacheConfig::new().with_query_ttl(Duration::from_millis(1)));
    let key = QueryKey::new("members");
    cache.insert(key.clone(), members(1));
    std::thread::sleep(Duration::from_millis(10));

    assert!(cache.get(&key).is_none());
    assert!(cache.is_empty());
}

#[test]
fn test_gc_removes_expired() {
    let cache = ResultCache::with_config(CacheConfig::new().with_query_ttl(Duration::from_millis(1)));
    cache.insert(QueryKey::new("a"), members(1));
    cache.insert(QueryKey::new("b"), members(1));
    std::thread::sleep(Duration::from_millis(10));

    assert_eq!(cache.gc(), 2);
    assert!(cache.is_empty());
}

#[test]
fn test_no_cache_config_stores_nothing() {
    let cache = ResultCache::with_config(CacheConfig::no_cache());
    cache.insert(QueryKey::new("members"), members(2));
    assert!(cache.is_empty());
}

#[test]
fn test_remove_and_clear() {
    let cache = ResultCache::new();
    cache.insert(QueryKey::new("a"), members(1));
    cache.insert(QueryKey::new("b"), members(1));

    cache.remove(&QueryKey::new("a"));
    assert_eq!(cache.len(), 1);
    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn test_query_key_display() {
    assert_eq!(QueryKey::new("members").to_string(), "members");
    let key = QueryKey::new("payments")
        .order_by("date", Direction::Descending)
        .order_by("name", Direction::Ascending);
    assert_eq!(key.to_string(), "payments?order_by=date desc,name asc");
}
