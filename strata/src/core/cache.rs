//! Single-level capacity-bounded cache

use std::fmt;

use tracing::debug;

use crate::core::error::{CacheError, Result};
use crate::policy::Strategy;
use crate::storage::Storage;

/// Hit/miss/eviction counters for one cache. Observational only; counters
/// never influence behavior.
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub inserts: u64,
}

impl CacheStats {
    /// Hit rate as a fraction [0.0, 1.0]. Returns 0.0 before any lookup.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Capacity-bounded cache coupling a storage backend to an eviction
/// strategy.
///
/// The strategy is told about every hit and insert, so its recency order
/// mirrors the storage contents; overflow evicts the strategy's candidate.
/// Invariant between operations: the storage and the strategy track the
/// same key set, never larger than `capacity`.
pub struct Cache<K, V> {
    storage: Box<dyn Storage<K, V>>,
    strategy: Box<dyn Strategy<K>>,
    capacity: usize,
    stats: CacheStats,
}

impl<K: fmt::Debug, V> Cache<K, V> {
    /// Builds a cache holding at most `capacity` entries; zero is rejected.
    pub fn new(
        storage: Box<dyn Storage<K, V>>,
        strategy: Box<dyn Strategy<K>>,
        capacity: usize,
    ) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity);
        }
        Ok(Self {
            storage,
            strategy,
            capacity,
            stats: CacheStats::default(),
        })
    }

    /// Looks up `key`, refreshing its recency on a hit.
    pub fn get(&mut self, key: &K) -> Result<Option<V>> {
        let value = self.storage.get(key)?;
        // a miss must not pollute the recency order
        if value.is_some() {
            self.strategy.touch(key);
            self.stats.hits += 1;
            debug!("cache HIT: {:?}", key);
        } else {
            self.stats.misses += 1;
            debug!("cache MISS: {:?}", key);
        }
        Ok(value)
    }

    /// Inserts `key`, evicting first when the cache is full and the key is
    /// new. Returns the entry evicted to make room, if any; the replaced
    /// value of an overwritten key is discarded, not returned.
    pub fn put(&mut self, key: K, value: V) -> Result<Option<(K, V)>> {
        let evicted = if self.is_full() && !self.storage.contains(&key)? {
            self.evict()?
        } else {
            None
        };
        self.strategy.touch(&key);
        self.storage.put(key, value)?;
        self.stats.inserts += 1;
        Ok(evicted)
    }

    /// Removes and returns the strategy's eviction candidate, or `None` on
    /// an empty cache.
    pub fn evict(&mut self) -> Result<Option<(K, V)>> {
        let Some(key) = self.strategy.evict() else {
            return Ok(None);
        };
        match self.storage.remove(&key)? {
            Some(value) => {
                self.stats.evictions += 1;
                debug!("cache EVICT: {:?}", key);
                Ok(Some((key, value)))
            }
            // the strategy tracked a key the storage never held; the
            // collaborators are out of sync and the cache is unreliable
            None => Err(CacheError::Inconsistency(format!("{key:?}"))),
        }
    }

    /// Removes `key`, untracking it from the strategy as well.
    pub fn remove(&mut self, key: &K) -> Result<Option<V>> {
        let removed = self.storage.remove(key)?;
        if removed.is_some() {
            self.strategy.remove(key);
            debug!("cache REMOVE: {:?}", key);
        }
        Ok(removed)
    }

    pub fn contains(&self, key: &K) -> Result<bool> {
        Ok(self.storage.contains(key)?)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Maximum number of entries; fixed at construction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.len() == self.capacity
    }

    /// Counters since construction.
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}
