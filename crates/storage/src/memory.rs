use std::{cell::RefCell, collections::BTreeMap};

use r7_domain::StorageError;

/// Volatile store, used where browser storage is unavailable and in tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<BTreeMap<String, String>>,
    read_only: bool,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store rejecting every write as if its quota was exhausted.
    #[must_use]
    pub fn read_only(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            entries: RefCell::new(entries.into_iter().collect()),
            read_only: true,
        }
    }
}

impl super::KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::QuotaExceeded);
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
