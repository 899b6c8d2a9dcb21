use thiserror::Error;

use crate::storage::StorageError;

/// Main error type for cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    /// Capacity is validated at construction; a cache must hold at least
    /// one entry.
    #[error("capacity must be positive")]
    InvalidCapacity,

    /// A multi-level cache cannot be built from zero levels.
    #[error("multi-level cache requires at least one level")]
    NoLevels,

    /// The storage backend failed; the underlying cause is attached.
    #[error("storage failure: {0}")]
    Storage(#[from] StorageError),

    /// The eviction strategy named a candidate the storage does not hold.
    /// The two collaborators have drifted out of sync and the cache state
    /// is no longer trustworthy; not recoverable by the caller.
    #[error("internal error: eviction candidate {0} missing from storage")]
    Inconsistency(String),
}

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, CacheError>;
