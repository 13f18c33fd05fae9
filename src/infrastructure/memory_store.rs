// In-memory key-value store
use crate::application::storage::{KeyValueStore, StorageError};
use std::collections::HashMap;
use std::sync::RwLock;

/// Map-backed store with an optional per-value size quota.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
    quota: RwLock<Option<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: Option<usize>) -> Self {
        Self {
            values: RwLock::default(),
            quota: RwLock::new(quota),
        }
    }

    pub fn set_quota(&self, quota: Option<usize>) {
        // A poisoned lock still holds a valid Option.
        *self.quota.write().unwrap_or_else(|e| e.into_inner()) = quota;
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.read().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let quota = *self.quota.read().unwrap_or_else(|e| e.into_inner());
        if let Some(limit) = quota {
            if value.len() > limit {
                return Err(StorageError::Rejected {
                    key: key.to_string(),
                    reason: format!(
                        "value of {} bytes exceeds quota of {} bytes",
                        value.len(),
                        limit
                    ),
                });
            }
        }

        let mut values = self.values.write().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set() {
        let store = MemoryStore::new();
        assert!(store.get("k").unwrap().is_none());

        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
    }

    #[test]
    fn test_quota_rejects_without_touching_slot() {
        let store = MemoryStore::with_quota(Some(4));
        store.set("k", "abc").unwrap();

        let err = store.set("k", "abcdef").unwrap_err();

        assert!(matches!(err, StorageError::Rejected { .. }));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("abc"));
    }
}
