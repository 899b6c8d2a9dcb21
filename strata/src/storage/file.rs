//! File-backed storage
//!
//! One file per entry, named `<hash>-<position>.bin`, where `hash` is the
//! CRC32 of the bincode-encoded key and `position` is the entry's slot in
//! its hash bucket. Distinct keys may share a hash, so a bucket holds every
//! entry for one hash and lookups disambiguate by full key equality after
//! deserializing. The in-memory bucket index is rebuilt by scanning the
//! directory at open time; the filenames are the only manifest.

use std::collections::HashMap;
use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{Result, Storage};

const FILE_SUFFIX: &str = ".bin";

/// Persistent storage with a hash-bucketed file index.
///
/// Each instance owns its in-memory index; two live instances over one
/// directory will not see each other's writes.
pub struct FileStorage<K, V> {
    dir: PathBuf,
    /// Key hash to the entry files for that hash, ordered by position.
    buckets: HashMap<u32, Vec<PathBuf>>,
    _marker: PhantomData<fn() -> (K, V)>,
}

/// Parses `<hash>-<position>.bin`; anything else is not an entry file.
fn parse_entry_name(name: &str) -> Option<(u32, u64)> {
    let stem = name.strip_suffix(FILE_SUFFIX)?;
    let (hash, position) = stem.split_once('-')?;
    Some((hash.parse().ok()?, position.parse().ok()?))
}

/// Rebuilds the bucket index from the entry files under `dir`.
fn scan_dir(dir: &Path) -> Result<HashMap<u32, Vec<PathBuf>>> {
    let mut found: Vec<(u32, u64, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if let Some((hash, position)) = parse_entry_name(name) {
            found.push((hash, position, entry.path()));
        }
    }

    // bucket order must mirror write order so position assignment stays stable
    found.sort_by_key(|entry| (entry.0, entry.1));
    let mut buckets: HashMap<u32, Vec<PathBuf>> = HashMap::new();
    for (hash, _position, path) in found {
        buckets.entry(hash).or_default().push(path);
    }
    Ok(buckets)
}

impl<K, V> FileStorage<K, V>
where
    K: Serialize + DeserializeOwned + Eq,
    V: Serialize + DeserializeOwned,
{
    /// Opens storage in the process temp directory.
    pub fn new() -> Result<Self> {
        Self::open(std::env::temp_dir().join("strata"))
    }

    /// Opens storage rooted at `dir`, creating the directory if missing and
    /// rebuilding the bucket index from the files already there.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        let buckets = scan_dir(&dir)?;
        debug!("file storage opened at {:?}: {} buckets", dir, buckets.len());
        Ok(Self {
            dir,
            buckets,
            _marker: PhantomData,
        })
    }

    /// Stable key hash: CRC32 over the encoded key bytes.
    fn key_hash(key: &K) -> Result<u32> {
        let bytes = bincode::serialize(key)?;
        Ok(crc32fast::hash(&bytes))
    }

    fn read_entry(path: &Path) -> Result<(K, V)> {
        let bytes = fs::read(path)?;
        Ok(bincode::deserialize(&bytes)?)
    }

    /// Finds the bucket slot holding `key`, comparing keys by equality, not
    /// hash: several distinct keys may live in the same bucket.
    fn find_in_bucket(&self, hash: u32, key: &K) -> Result<Option<(usize, V)>> {
        let Some(bucket) = self.buckets.get(&hash) else {
            return Ok(None);
        };
        for (slot, path) in bucket.iter().enumerate() {
            let (stored_key, value) = Self::read_entry(path)?;
            if stored_key == *key {
                return Ok(Some((slot, value)));
            }
        }
        Ok(None)
    }

    /// Next filename position for a bucket: one past the highest position
    /// still live, so a removed slot never resurrects a live name.
    fn next_position(bucket: &[PathBuf]) -> u64 {
        bucket
            .iter()
            .filter_map(|path| path.file_name()?.to_str())
            .filter_map(parse_entry_name)
            .map(|(_, position)| position)
            .max()
            .map_or(0, |max| max + 1)
    }
}

impl<K, V> Storage<K, V> for FileStorage<K, V>
where
    K: Serialize + DeserializeOwned + Eq,
    V: Serialize + DeserializeOwned,
{
    fn get(&self, key: &K) -> Result<Option<V>> {
        let hash = Self::key_hash(key)?;
        Ok(self.find_in_bucket(hash, key)?.map(|(_, value)| value))
    }

    /// Update is delete + append, never an in-place file rewrite.
    fn put(&mut self, key: K, value: V) -> Result<Option<V>> {
        let previous = self.remove(&key)?;
        let hash = Self::key_hash(&key)?;
        let bytes = bincode::serialize(&(key, value))?;

        let position = self
            .buckets
            .get(&hash)
            .map_or(0, |bucket| Self::next_position(bucket));
        let path = self.dir.join(format!("{}-{}{}", hash, position, FILE_SUFFIX));
        fs::write(&path, bytes)?;
        // index the new file only once it exists on disk
        self.buckets.entry(hash).or_default().push(path);

        debug!("file storage put: hash={} position={}", hash, position);
        Ok(previous)
    }

    fn remove(&mut self, key: &K) -> Result<Option<V>> {
        let hash = Self::key_hash(key)?;
        let Some((slot, value)) = self.find_in_bucket(hash, key)? else {
            return Ok(None);
        };
        let mut bucket_emptied = false;
        if let Some(bucket) = self.buckets.get_mut(&hash) {
            // the file and its index slot go together
            fs::remove_file(&bucket[slot])?;
            bucket.remove(slot);
            bucket_emptied = bucket.is_empty();
        }
        if bucket_emptied {
            // no empty buckets retained
            self.buckets.remove(&hash);
        }
        debug!("file storage remove: hash={}", hash);
        Ok(Some(value))
    }

    fn contains(&self, key: &K) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Entries across all buckets, not the number of distinct hashes.
    fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_entry_name() {
        assert_eq!(parse_entry_name("17-0.bin"), Some((17, 0)));
        assert_eq!(parse_entry_name("4026301856-12.bin"), Some((4026301856, 12)));
        assert_eq!(parse_entry_name("17-0.ser"), None);
        assert_eq!(parse_entry_name("somefile.bin"), None);
        assert_eq!(parse_entry_name("a-1.bin"), None);
        assert_eq!(parse_entry_name("17-b.bin"), None);
    }

    #[test]
    fn test_put_get_remove_roundtrip() {
        let dir = tempdir().unwrap();
        let mut storage: FileStorage<i32, String> = FileStorage::open(dir.path()).unwrap();

        assert_eq!(storage.put(1, "1".to_string()).unwrap(), None);
        assert_eq!(storage.put(2, "2".to_string()).unwrap(), None);
        assert_eq!(storage.len(), 2);
        assert_eq!(storage.get(&1).unwrap(), Some("1".to_string()));
        assert_eq!(storage.get(&3).unwrap(), None);

        assert_eq!(storage.remove(&1).unwrap(), Some("1".to_string()));
        assert_eq!(storage.remove(&1).unwrap(), None);
        assert_eq!(storage.len(), 1);
        assert!(!storage.contains(&1).unwrap());
    }

    #[test]
    fn test_put_existing_key_replaces_value() {
        let dir = tempdir().unwrap();
        let mut storage: FileStorage<i32, String> = FileStorage::open(dir.path()).unwrap();

        storage.put(1, "1".to_string()).unwrap();
        assert_eq!(storage.put(1, "3".to_string()).unwrap(), Some("1".to_string()));
        assert_eq!(storage.len(), 1);
        assert_eq!(storage.get(&1).unwrap(), Some("3".to_string()));

        // delete + append leaves exactly one entry file behind
        let files = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(files, 1);
    }

    #[test]
    fn test_reopen_rebuilds_index_from_filenames() {
        let dir = tempdir().unwrap();
        {
            let mut storage: FileStorage<String, u64> = FileStorage::open(dir.path()).unwrap();
            storage.put("alpha".to_string(), 1).unwrap();
            storage.put("beta".to_string(), 2).unwrap();
        }

        let storage: FileStorage<String, u64> = FileStorage::open(dir.path()).unwrap();
        assert_eq!(storage.len(), 2);
        assert_eq!(storage.get(&"alpha".to_string()).unwrap(), Some(1));
        assert_eq!(storage.get(&"beta".to_string()).unwrap(), Some(2));
    }
}
