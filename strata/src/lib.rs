//! Strata - Layered key-value cache
//!
//! A capacity-bounded cache built from two pluggable collaborators: a
//! storage backend ([`Storage`]) and an eviction strategy ([`Strategy`]).
//! Caches compose into a [`MultiLevelCache`] where overflow from one level
//! cascades into the next, hottest level first.
//!
//! The design is deliberately single-threaded: no internal locking, no
//! background eviction. Callers needing concurrent access serialize around
//! the whole instance.
//!
//! # Example
//!
//! ```
//! use strata::{Cache, MemoryStorage, RecencyStrategy};
//!
//! let mut cache: Cache<u64, String> = Cache::new(
//!     Box::new(MemoryStorage::new()),
//!     Box::new(RecencyStrategy::lru()),
//!     2,
//! )?;
//!
//! cache.put(1, "one".to_string())?;
//! cache.put(2, "two".to_string())?;
//! assert_eq!(cache.get(&1)?, Some("one".to_string()));
//!
//! // the cache is full; inserting a third key evicts the LRU key 2
//! let evicted = cache.put(3, "three".to_string())?;
//! assert_eq!(evicted, Some((2, "two".to_string())));
//! # Ok::<(), strata::CacheError>(())
//! ```

pub mod core;
pub mod policy;
pub mod storage;

// Re-export commonly used types
pub use crate::core::{Cache, CacheError, CacheStats, MultiLevelCache, Result};
pub use crate::policy::{EvictionPolicy, RecencyStrategy, Strategy};
pub use crate::storage::{FileStorage, MemoryStorage, Storage, StorageError};
