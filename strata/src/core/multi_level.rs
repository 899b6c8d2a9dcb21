//! Multi-level cache hierarchy
//!
//! Levels are ordered hottest first. An insert into one level may displace
//! that level's eviction candidate into the next, cascading until an entry
//! comes to rest or falls out past the coldest level.

use std::fmt;

use tracing::debug;

use crate::core::cache::Cache;
use crate::core::error::{CacheError, Result};

/// Ordered sequence of caches with cascading overflow.
///
/// Invariant: a key lives in the storage of at most one level at any time.
pub struct MultiLevelCache<K, V> {
    levels: Vec<Cache<K, V>>,
}

impl<K: fmt::Debug, V> MultiLevelCache<K, V> {
    /// Builds a hierarchy from `levels`, ordered hottest first; an empty
    /// sequence is rejected.
    pub fn new(levels: Vec<Cache<K, V>>) -> Result<Self> {
        if levels.is_empty() {
            return Err(CacheError::NoLevels);
        }
        Ok(Self { levels })
    }

    /// Returns the value from the first level holding `key`. A hit stays in
    /// the level that served it; there is no promotion toward level 0.
    pub fn get(&mut self, key: &K) -> Result<Option<V>> {
        for level in &mut self.levels {
            if let Some(value) = level.get(key)? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    pub fn contains(&self, key: &K) -> Result<bool> {
        for level in &self.levels {
            if level.contains(key)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Removes `key` from the level holding it and returns its value.
    pub fn remove(&mut self, key: &K) -> Result<Option<V>> {
        for level in &mut self.levels {
            if let Some(value) = level.remove(key)? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    /// Inserts at the hottest level, cascading displaced entries downward.
    /// Returns the entry that fell out past the coldest level, if any.
    pub fn put(&mut self, key: K, value: V) -> Result<Option<(K, V)>> {
        // a key may live in at most one level; drop any current copy first
        self.remove(&key)?;
        self.cascade_put(key, value, 0)
    }

    /// Evicts the hottest level's candidate and cascades it downward.
    pub fn evict(&mut self) -> Result<Option<(K, V)>> {
        match self.levels[0].evict()? {
            Some((key, value)) => self.cascade_put(key, value, 1),
            None => Ok(None),
        }
    }

    /// Walks levels from `start`, feeding each level's evicted entry into
    /// the next. The cascade stops at the first level whose put evicts
    /// nothing; an entry still displaced past the last level is returned.
    fn cascade_put(&mut self, key: K, value: V, start: usize) -> Result<Option<(K, V)>> {
        let mut displaced = Some((key, value));
        for level in self.levels.iter_mut().skip(start) {
            match displaced.take() {
                Some((key, value)) => displaced = level.put(key, value)?,
                None => break,
            }
        }
        if let Some((key, _)) = &displaced {
            debug!("cascade dropped entry past last level: {:?}", key);
        }
        Ok(displaced)
    }

    /// Entries across all levels.
    pub fn len(&self) -> usize {
        self.levels.iter().map(Cache::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.iter().all(Cache::is_empty)
    }

    /// Total capacity across all levels.
    pub fn capacity(&self) -> usize {
        self.levels.iter().map(Cache::capacity).sum()
    }

    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }
}
