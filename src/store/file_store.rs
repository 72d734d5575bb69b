//! Directory-backed object store, one file per key
//!
//! Layout:
//! ```text
//! <root>/
//!   <key>        - bincode-encoded Record { type_tag, payload }
//!   <dir>/<key>  - keys containing '/' nest into subdirectories
//! ```
//!
//! Every call is a single blocking read or write; nothing is cached and no
//! file handle outlives the call that opened it.

use crate::config::StoreConfig;
use crate::model::{Key, Storable};
use crate::store::record::Record;
use crate::{Error, Result};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// A persistent object store rooted at a directory
#[derive(Clone, Debug)]
pub struct ObjectStore {
    config: StoreConfig,
}

impl Default for ObjectStore {
    /// Store rooted at `./data`
    fn default() -> Self {
        ObjectStore::with_config(StoreConfig::default())
    }
}

impl ObjectStore {
    /// Create a store rooted at the given directory
    ///
    /// The directory is not touched until the first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ObjectStore::with_config(StoreConfig::new(root))
    }

    pub fn with_config(config: StoreConfig) -> Self {
        ObjectStore { config }
    }

    /// The storage root
    pub fn root(&self) -> &Path {
        &self.config.root
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Where the record for `key` lives on disk
    ///
    /// Always under the root: a leading `/` (or drive prefix) in the key is
    /// dropped rather than replacing the root.
    pub fn path_for(&self, key: impl AsRef<str>) -> PathBuf {
        let mut path = self.config.root.clone();
        for component in Path::new(key.as_ref()).components() {
            match component {
                Component::Prefix(_) | Component::RootDir => {}
                other => path.push(other),
            }
        }
        path
    }

    /// Check whether a record exists for the key
    pub fn contains(&self, key: impl AsRef<str>) -> bool {
        self.path_for(key).is_file()
    }

    // === Save ===

    /// Save a value under a freshly generated key, returning the key
    pub fn save<T: Storable>(&self, value: &T) -> Result<Key> {
        self.save_as(Key::generate(), value)
    }

    /// Save a value under the given key, replacing any previous record
    ///
    /// Returns the key unchanged. The write is not atomic: a failure part way
    /// through can leave a truncated file behind.
    pub fn save_as<T: Storable>(&self, key: impl Into<Key>, value: &T) -> Result<Key> {
        let key = key.into();
        let path = self.path_for(&key);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let record = Record::from_value(value)?;
        let bytes = record.to_bytes()?;

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)?;
        file.write_all(&bytes)?;
        if self.config.sync_writes {
            file.sync_all()?;
        }

        debug!(
            key = %key,
            bytes = bytes.len(),
            type_tag = %record.type_tag,
            "record saved"
        );
        Ok(key)
    }

    // === Load ===

    /// Load the value stored under the key
    ///
    /// Fails with [`Error::NotFound`] if nothing was ever saved there and with
    /// [`Error::TypeMismatch`] if it holds a different type.
    pub fn load<T: Storable>(&self, key: impl AsRef<str>) -> Result<T> {
        let key = key.as_ref();
        self.try_load(key)?.ok_or_else(|| Error::NotFound(key.to_string()))
    }

    /// Like [`load`](Self::load), but a missing record yields `None`
    pub fn try_load<T: Storable>(&self, key: impl AsRef<str>) -> Result<Option<T>> {
        let key = key.as_ref();
        let path = self.path_for(key);

        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let record = Record::from_bytes(&data)?;
        debug!(key, bytes = data.len(), type_tag = %record.type_tag, "record loaded");

        match record.into_value(key) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                if let Error::TypeMismatch { expected, found, .. } = &e {
                    warn!(key, %expected, %found, "stored type does not match requested type");
                }
                Err(e)
            }
        }
    }

    /// Like [`load`](Self::load), but a missing record yields `default`
    ///
    /// Only the missing case is replaced; corrupt records and I/O errors
    /// still fail.
    pub fn load_or<T: Storable>(&self, key: impl AsRef<str>, default: T) -> Result<T> {
        let key = key.as_ref();
        match self.try_load(key)? {
            Some(value) => Ok(value),
            None => {
                debug!(key, "no record, using default");
                Ok(default)
            }
        }
    }

    /// Like [`load_or`](Self::load_or) with `T::default()`
    pub fn load_or_default<T: Storable + Default>(&self, key: impl AsRef<str>) -> Result<T> {
        self.load_or(key, T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_root_created_lazily() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("data");
        let store = ObjectStore::new(&root);
        assert!(!root.exists());

        store.save(&"first".to_string()).unwrap();
        assert!(root.is_dir());
    }

    #[test]
    fn test_record_file_layout() {
        let dir = tempdir().unwrap();
        let store = ObjectStore::new(dir.path());

        let key = store.save_as("answer", &42u64).unwrap();
        let bytes = fs::read(dir.path().join("answer")).unwrap();
        let record = Record::from_bytes(&bytes).unwrap();

        assert_eq!(key, "answer");
        assert_eq!(record.type_tag, "u64");
        assert_eq!(record.size(), 8);
    }

    #[test]
    fn test_nested_key_creates_directories() {
        let dir = tempdir().unwrap();
        let store = ObjectStore::new(dir.path());

        store.save_as("users/42/profile", &"Ann".to_string()).unwrap();
        assert!(dir.path().join("users/42/profile").is_file());

        let name: String = store.load("users/42/profile").unwrap();
        assert_eq!(name, "Ann");
    }

    #[test]
    fn test_shorter_overwrite_truncates() {
        let dir = tempdir().unwrap();
        let store = ObjectStore::new(dir.path());

        store.save_as("k", &"a much longer first value".to_string()).unwrap();
        store.save_as("k", &"short".to_string()).unwrap();

        let loaded: String = store.load("k").unwrap();
        assert_eq!(loaded, "short");
    }

    #[test]
    fn test_sync_writes() {
        let dir = tempdir().unwrap();
        let store = ObjectStore::with_config(StoreConfig::new(dir.path()).with_sync_writes(true));

        let key = store.save(&vec![1u8, 2, 3]).unwrap();
        assert_eq!(store.load::<Vec<u8>>(&key).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_contains() {
        let dir = tempdir().unwrap();
        let store = ObjectStore::new(dir.path());

        assert!(!store.contains("k"));
        store.save_as("k", &true).unwrap();
        assert!(store.contains("k"));
    }

    #[test]
    fn test_key_naming_a_directory_is_io_error() {
        let dir = tempdir().unwrap();
        let store = ObjectStore::new(dir.path());
        store.save_as("a/b", &1i32).unwrap();

        assert!(matches!(store.save_as("a", &2i32), Err(Error::Io(_))));
        assert!(matches!(store.load::<i32>("a"), Err(Error::Io(_))));
    }

    #[test]
    fn test_absolute_key_stays_under_root() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("data");
        let outside = dir.path().join("outside");
        let store = ObjectStore::new(&root);

        let key = format!("{}/victim", outside.display());
        let path = store.path_for(&key);
        assert!(path.starts_with(store.root()));
        assert_eq!(store.path_for("/abs/k"), root.join("abs").join("k"));

        store.save_as(key.as_str(), &1u32).unwrap();
        assert!(path.is_file());
        assert!(!outside.exists());
        assert_eq!(store.load::<u32>(&key).unwrap(), 1);
    }

    #[test]
    fn test_root_blocked_by_file_is_io_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"not a directory").unwrap();

        let store = ObjectStore::new(&blocker);
        assert!(matches!(store.save(&1u8), Err(Error::Io(_))));

        let nested = ObjectStore::new(blocker.join("data"));
        assert!(matches!(nested.save_as("k", &1u8), Err(Error::Io(_))));
        assert!(!nested.contains("k"));
    }

    #[test]
    fn test_default_store_uses_data_dir() {
        let store = ObjectStore::default();
        assert_eq!(store.root(), Path::new("data"));
        assert_eq!(store.path_for("k"), PathBuf::from("data").join("k"));
    }
}
