//! In-memory storage backend
//!
//! Plain hash-map pass-through: no capacity, no failure paths.

use std::collections::HashMap;
use std::hash::Hash;

use super::{Result, Storage};

/// Hash-map backed storage.
#[derive(Debug)]
pub struct MemoryStorage<K, V> {
    map: HashMap<K, V>,
}

impl<K, V> MemoryStorage<K, V> {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }
}

impl<K, V> Default for MemoryStorage<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, V: Clone> Storage<K, V> for MemoryStorage<K, V> {
    fn get(&self, key: &K) -> Result<Option<V>> {
        Ok(self.map.get(key).cloned())
    }

    fn put(&mut self, key: K, value: V) -> Result<Option<V>> {
        Ok(self.map.insert(key, value))
    }

    fn remove(&mut self, key: &K) -> Result<Option<V>> {
        Ok(self.map.remove(key))
    }

    fn contains(&self, key: &K) -> Result<bool> {
        Ok(self.map.contains_key(key))
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}
