//! JSON-file session store.

use std::{
    collections::HashMap,
    io::ErrorKind,
    path::PathBuf,
};

use async_trait::async_trait;
use auth_client_core::traits::{SessionStore, StoreError};

/// Durable store backed by a single JSON object file.
///
/// The file holds only the session layer's entries, so whole-file
/// read-modify-write per operation is fine. A missing file reads as empty;
/// an unparsable file surfaces as a storage error and is deleted by the next
/// `remove_all`, which is how a corrupt install recovers.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Conventional location under the platform data directory.
    #[must_use]
    pub fn default_path(app_name: &str) -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join(app_name).join("session.json"))
    }

    async fn read_entries(&self) -> Result<HashMap<String, String>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn write_entries(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let encoded = serde_json::to_string(entries)?;
        tokio::fs::write(&self.path, encoded).await?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_entries().await?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.read_entries().await?;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries).await
    }

    async fn remove_all(&self, keys: &[&str]) {
        let mut entries = match self.read_entries().await {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(error = %err, "session file unreadable, deleting it");
                let _ = tokio::fs::remove_file(&self.path).await;
                return;
            }
        };

        let before = entries.len();
        for key in keys {
            entries.remove(*key);
        }
        if entries.len() == before {
            // nothing to remove; a pristine install stays file-free
            return;
        }

        if let Err(err) = self.write_entries(&entries).await {
            tracing::warn!(error = %err, "could not clear session entries");
        }
    }
}
