//! Memory storage adapter

use crate::storage::adapter::StorageAdapter;
use crate::error::{StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// In-memory storage adapter
#[derive(Debug, Clone)]
pub struct MemoryAdapter {
    data: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl Default for MemoryAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAdapter {
    /// Create a new memory adapter
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of stored entries
    pub fn len(&self) -> StorageResult<usize> {
        let storage = self.data.read().map_err(poisoned("len"))?;
        Ok(storage.len())
    }

    /// Whether nothing is stored
    pub fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.len()? == 0)
    }
}

fn poisoned<T>(operation: &'static str) -> impl FnOnce(PoisonError<T>) -> StorageError {
    move |_| StorageError::OperationFailed {
        operation: operation.to_string(),
        reason: "memory storage lock poisoned".to_string(),
    }
}

impl StorageAdapter for MemoryAdapter {
    fn store(&self, key: &str, data: &[u8]) -> StorageResult<()> {
        let mut storage = self.data.write().map_err(poisoned("store"))?;
        storage.insert(key.to_string(), data.to_vec());
        Ok(())
    }

    fn retrieve(&self, key: &str) -> StorageResult<Vec<u8>> {
        let storage = self.data.read().map_err(poisoned("retrieve"))?;
        storage.get(key).cloned().ok_or_else(|| StorageError::ResourceNotFound {
            resource: key.to_string(),
        })
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        let mut storage = self.data.write().map_err(poisoned("delete"))?;
        storage.remove(key);
        Ok(())
    }

    fn exists(&self, key: &str) -> StorageResult<bool> {
        let storage = self.data.read().map_err(poisoned("exists"))?;
        Ok(storage.contains_key(key))
    }
}
