//! In-memory session store.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use async_trait::async_trait;
use auth_client_core::traits::{SessionStore, StoreError};

/// In-memory store implementation.
///
/// Useful for tests and single-process use. Data is lost on restart; clones
/// share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create a new in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .entries
            .read()
            .map_err(|e| StoreError::Internal(e.to_string()))?
            .get(key)
            .cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .map_err(|e| StoreError::Internal(e.to_string()))?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_all(&self, keys: &[&str]) {
        if let Ok(mut entries) = self.entries.write() {
            for key in keys {
                entries.remove(*key);
            }
        }
    }
}
