use std::collections::BTreeMap;

use super::KeyValueStore;
use crate::ClientResult;

/// In-process store for tests and embedders that do not need durability.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: BTreeMap<String, String>,
    writes: usize,
}

impl MemoryKeyValueStore {
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::default();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }

    /// Number of successful `put` calls since creation.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> ClientResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
        Ok(())
    }

    fn with_write_lock<T, F>(&mut self, operation: F) -> ClientResult<T>
    where
        F: FnOnce(&mut Self) -> ClientResult<T>,
    {
        let snapshot = self.entries.clone();
        let result = operation(self);
        if result.is_err() {
            self.entries = snapshot;
        }
        result
    }
}
