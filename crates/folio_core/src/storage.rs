//! Persistent key/value storage
//!
//! The page keeps a single persisted flag (the theme) across sessions. Hosts
//! implement [`Storage`] over `localStorage`; [`MemoryStorage`] keeps the
//! values in a map for tests and headless runs.
//!
//! # Example
//!
//! ```
//! use folio_core::storage::{MemoryStorage, Storage, StorageExt};
//!
//! let mut storage = MemoryStorage::new();
//! storage.set_item("visits", "3");
//! assert_eq!(storage.get_parsed::<u32>("visits"), Some(3));
//! ```

use rustc_hash::FxHashMap;
use std::str::FromStr;

/// String key/value storage that survives page loads
pub trait Storage {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&mut self, key: &str, value: &str);

    fn remove_item(&mut self, key: &str);
}

/// Typed helpers over any [`Storage`]
pub trait StorageExt: Storage {
    /// Read and parse a value, `None` if missing or unparseable
    fn get_parsed<T: FromStr>(&self, key: &str) -> Option<T> {
        let raw = self.get_item(key)?;
        match raw.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::debug!("Ignoring unparseable stored value for {}: {:?}", key, raw);
                None
            }
        }
    }

    /// Store a value through its `Display` form
    fn set_display<T: std::fmt::Display>(&mut self, key: &str, value: &T) {
        self.set_item(key, &value.to_string());
    }
}

impl<S: Storage + ?Sized> StorageExt for S {}

/// In-memory storage
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    values: FxHashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove_item(&mut self, key: &str) {
        self.values.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_basic() {
        let mut storage = MemoryStorage::new();
        assert!(storage.is_empty());

        storage.set_item("theme", "dark");
        assert_eq!(storage.get_item("theme"), Some("dark".to_string()));
        assert!(storage.contains("theme"));

        storage.set_item("theme", "light");
        assert_eq!(storage.get_item("theme"), Some("light".to_string()));
        assert_eq!(storage.len(), 1);

        storage.remove_item("theme");
        assert_eq!(storage.get_item("theme"), None);
    }

    #[test]
    fn test_typed_helpers() {
        let mut storage = MemoryStorage::new();
        storage.set_display("count", &42);
        assert_eq!(storage.get_parsed::<i32>("count"), Some(42));

        storage.set_item("count", "forty-two");
        assert_eq!(storage.get_parsed::<i32>("count"), None);
        assert_eq!(storage.get_parsed::<i32>("missing"), None);
    }
}
