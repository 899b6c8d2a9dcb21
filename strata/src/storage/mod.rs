//! Storage backends
//!
//! A storage is a capacity-agnostic keyed container; capacity is enforced
//! one layer up, by the cache. Two backends: an in-memory map and a
//! hash-bucketed file store.

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Storage failure. Every I/O or encoding problem a backend hits is wrapped
/// here with its cause attached; nothing is swallowed.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<bincode::Error> for StorageError {
    fn from(e: bincode::Error) -> Self {
        StorageError::Serialization(e.to_string())
    }
}

/// Result type alias for storage operations
pub type Result<T> = std::result::Result<T, StorageError>;

/// Keyed container consumed by the cache.
///
/// `put` on an existing key replaces the value and returns the prior one;
/// on a new key it returns `None` and grows the size by one. `remove` on an
/// absent key is a no-op returning `None`. Operations are fallible because
/// the file backend does I/O; the memory backend never fails.
pub trait Storage<K, V> {
    fn get(&self, key: &K) -> Result<Option<V>>;

    fn put(&mut self, key: K, value: V) -> Result<Option<V>>;

    fn remove(&mut self, key: &K) -> Result<Option<V>>;

    fn contains(&self, key: &K) -> Result<bool>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
