//! Eviction strategies
//!
//! A strategy tracks which keys were recently used and names the next
//! eviction candidate. LRU and MRU share one recency structure and differ
//! only in which end `evict` reads from.

mod recency;

use std::fmt;
use std::hash::Hash;

use tracing::debug;

use recency::RecencyList;

/// Which end of the recency order is evicted first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvictionPolicy {
    /// Least recently used: evict the key untouched for the longest.
    Lru,
    /// Most recently used: evict the key touched last.
    Mru,
}

/// Tracks key usage for a cache and selects eviction candidates.
pub trait Strategy<K> {
    /// Records a use of `key`, making it the most recently used.
    /// Returns whether the key was already tracked (`false` for new keys).
    fn touch(&mut self, key: &K) -> bool;

    /// Untracks `key` without declaring it an eviction target; used when a
    /// cache entry is removed directly. Returns whether it was tracked.
    fn remove(&mut self, key: &K) -> bool;

    /// Selects, untracks and returns the next eviction candidate, or `None`
    /// when nothing is tracked.
    fn evict(&mut self) -> Option<K>;
}

/// Recency-based strategy shared by LRU and MRU.
///
/// `touch` always refreshes a key to the front of one shared list; the
/// policy only decides whether `evict` pops the back (LRU) or the front
/// (MRU). All three operations are O(1) amortized.
pub struct RecencyStrategy<K> {
    queue: RecencyList<K>,
    policy: EvictionPolicy,
}

impl<K: Eq + Hash + Clone> RecencyStrategy<K> {
    /// Least-recently-used strategy.
    pub fn lru() -> Self {
        Self::with_policy(EvictionPolicy::Lru)
    }

    /// Most-recently-used strategy.
    pub fn mru() -> Self {
        Self::with_policy(EvictionPolicy::Mru)
    }

    pub fn with_policy(policy: EvictionPolicy) -> Self {
        Self {
            queue: RecencyList::new(),
            policy,
        }
    }

    /// Policy this strategy evicts by.
    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }
}

impl<K: Eq + Hash + Clone + fmt::Debug> Strategy<K> for RecencyStrategy<K> {
    fn touch(&mut self, key: &K) -> bool {
        self.queue.touch(key)
    }

    fn remove(&mut self, key: &K) -> bool {
        self.queue.remove(key)
    }

    fn evict(&mut self) -> Option<K> {
        let candidate = match self.policy {
            EvictionPolicy::Lru => self.queue.pop_back(),
            EvictionPolicy::Mru => self.queue.pop_front(),
        };
        if let Some(key) = &candidate {
            debug!("strategy evict candidate ({:?}): {:?}", self.policy, key);
        }
        candidate
    }
}
