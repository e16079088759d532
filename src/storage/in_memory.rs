//! In-memory key-value backend for testing and development

use crate::core::KeyValueBackend;
use crate::core::error::StorageError;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

const NAME: &str = "in_memory";

/// In-memory key-value backend
///
/// Clones share the same map, so a test can keep a handle on the contents
/// while a store writes through another. Uses RwLock for thread-safe access.
#[derive(Clone)]
pub struct InMemoryBackend {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueBackend for InMemoryBackend {
    fn name(&self) -> &'static str {
        NAME
    }

    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self.entries.read().map_err(|e| {
            StorageError::operation(NAME, "get", key, format!("failed to acquire read lock: {}", e))
        })?;

        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|e| {
            StorageError::operation(
                NAME,
                "set",
                key,
                format!("failed to acquire write lock: {}", e),
            )
        })?;

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().map_err(|e| {
            StorageError::operation(
                NAME,
                "delete",
                key,
                format!("failed to acquire write lock: {}", e),
            )
        })?;

        entries.remove(key);
        Ok(())
    }
}
