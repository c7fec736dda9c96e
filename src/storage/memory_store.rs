use std::collections::{BTreeSet, HashMap};
use std::sync::RwLock;

use crate::error::AppError;

use super::KeyValueStore;

/// Process-lifetime store, used in tests and when no config directory exists.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sets: RwLock<HashMap<String, BTreeSet<String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_set(&self, key: &str) -> Result<BTreeSet<String>, AppError> {
        let sets = self.sets.read().unwrap_or_else(|e| e.into_inner());
        Ok(sets.get(key).cloned().unwrap_or_default())
    }

    fn put_set(&self, key: &str, values: &BTreeSet<String>) -> Result<(), AppError> {
        let mut sets = self.sets.write().unwrap_or_else(|e| e.into_inner());
        sets.insert(key.to_string(), values.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_empty() {
        let store = MemoryStore::new();
        assert!(store.get_set("nothing").unwrap().is_empty());
    }

    #[test]
    fn test_put_replaces_whole_set() {
        let store = MemoryStore::new();
        store
            .put_set("k", &BTreeSet::from(["a".to_string(), "b".to_string()]))
            .unwrap();
        store.put_set("k", &BTreeSet::from(["c".to_string()])).unwrap();
        assert_eq!(store.get_set("k").unwrap(), BTreeSet::from(["c".to_string()]));
    }
}
