//! Integration tests for the single-level cache over both storage backends.

use strata::{Cache, FileStorage, MemoryStorage, RecencyStrategy};
use tempfile::tempdir;

fn memory_lru(capacity: usize) -> Cache<i32, String> {
    Cache::new(
        Box::new(MemoryStorage::new()),
        Box::new(RecencyStrategy::lru()),
        capacity,
    )
    .unwrap()
}

#[test]
fn test_put_get_round_trip() {
    let mut cache = memory_lru(4);
    for i in 0..4 {
        cache.put(i, format!("value-{i}")).unwrap();
    }
    for i in 0..4 {
        assert_eq!(cache.get(&i).unwrap(), Some(format!("value-{i}")));
    }
}

#[test]
fn test_size_never_exceeds_capacity() {
    let mut cache = memory_lru(3);
    for i in 0..50 {
        cache.put(i % 7, i.to_string()).unwrap();
        if i % 3 == 0 {
            cache.get(&(i % 5)).unwrap();
        }
        if i % 11 == 0 {
            cache.remove(&(i % 7)).unwrap();
        }
        assert!(cache.len() <= cache.capacity());
    }
}

#[test]
fn test_evictions_drain_in_recency_order() {
    let mut cache = memory_lru(3);
    cache.put(1, "1".to_string()).unwrap();
    cache.put(2, "2".to_string()).unwrap();
    cache.put(3, "3".to_string()).unwrap();
    cache.get(&1).unwrap();

    assert_eq!(cache.evict().unwrap(), Some((2, "2".to_string())));
    assert_eq!(cache.evict().unwrap(), Some((3, "3".to_string())));
    assert_eq!(cache.evict().unwrap(), Some((1, "1".to_string())));
    assert_eq!(cache.evict().unwrap(), None);
}

#[test]
fn test_file_backed_cache_capacity_eviction() {
    let dir = tempdir().unwrap();
    let storage: FileStorage<i32, String> = FileStorage::open(dir.path()).unwrap();
    let mut cache = Cache::new(
        Box::new(storage),
        Box::new(RecencyStrategy::lru()),
        2,
    )
    .unwrap();

    cache.put(1, "1".to_string()).unwrap();
    cache.put(2, "2".to_string()).unwrap();
    cache.get(&1).unwrap();

    let evicted = cache.put(3, "3".to_string()).unwrap();
    assert_eq!(evicted, Some((2, "2".to_string())));
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.get(&1).unwrap(), Some("1".to_string()));
    assert_eq!(cache.get(&3).unwrap(), Some("3".to_string()));
}

#[test]
fn test_file_backed_cache_mru_eviction() {
    let dir = tempdir().unwrap();
    let storage: FileStorage<i32, String> = FileStorage::open(dir.path()).unwrap();
    let mut cache = Cache::new(
        Box::new(storage),
        Box::new(RecencyStrategy::mru()),
        2,
    )
    .unwrap();

    cache.put(1, "1".to_string()).unwrap();
    cache.put(2, "2".to_string()).unwrap();
    cache.get(&1).unwrap();

    // key 1 is the most recently used and is sacrificed first
    let evicted = cache.put(3, "3".to_string()).unwrap();
    assert_eq!(evicted, Some((1, "1".to_string())));
    assert_eq!(cache.get(&2).unwrap(), Some("2".to_string()));
}
