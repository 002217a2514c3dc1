//! # Key-value storage backends
//!
//! [`KeyValueStorage`] is the small string-to-string store behind UI preferences.
//!
//! - [`FileStorage`] keeps a single JSON object on disk and survives restarts.
//! - [`MemoryStorage`] is process-local, for tests and headless runs.
//! - [`UnavailableStorage`] fails every call, standing in for a disabled or
//!   inaccessible store.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrefsError {
    #[error("Preference storage unavailable: {0}")]
    Unavailable(String),

    #[error("Preference file is corrupt: {0}")]
    Corrupt(String),
}

impl From<std::io::Error> for PrefsError {
    fn from(e: std::io::Error) -> Self {
        PrefsError::Unavailable(e.to_string())
    }
}

#[async_trait]
pub trait KeyValueStorage: Send + Sync + 'static {
    async fn get(&self, key: &str) -> Result<Option<String>, PrefsError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), PrefsError>;
}

/// JSON map persisted at `path`. A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    // serializes read-modify-write cycles within this process
    lock: Arc<Mutex<()>>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    async fn read_map(&self) -> Result<BTreeMap<String, String>, PrefsError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => serde_json::from_str(&text).map_err(|e| PrefsError::Corrupt(e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl KeyValueStorage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, PrefsError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_map().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PrefsError> {
        let _guard = self.lock.lock().await;
        // corrupt contents are discarded on write
        let mut map = match self.read_map().await {
            Err(PrefsError::Corrupt(reason)) => {
                tracing::warn!(path = %self.path.display(), %reason, "Overwriting corrupt preference file");
                BTreeMap::new()
            }
            other => other?,
        };
        map.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let text = serde_json::to_string_pretty(&map)
            .map_err(|e| PrefsError::Unavailable(e.to_string()))?;
        tokio::fs::write(&self.path, text).await?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, PrefsError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStorage;

#[async_trait]
impl KeyValueStorage for UnavailableStorage {
    async fn get(&self, _key: &str) -> Result<Option<String>, PrefsError> {
        Err(PrefsError::Unavailable("storage disabled".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), PrefsError> {
        Err(PrefsError::Unavailable("storage disabled".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_storage_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        let storage = FileStorage::new(&path);
        assert_eq!(storage.get("theme").await.unwrap(), None);
        storage.set("theme", "dark").await.unwrap();
        storage.set("lang", "de").await.unwrap();

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get("theme").await.unwrap(), Some("dark".to_string()));
        assert_eq!(reopened.get("lang").await.unwrap(), Some("de".to_string()));
    }

    #[tokio::test]
    async fn corrupt_file_reports_then_recovers_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        tokio::fs::write(&path, "{not json").await.unwrap();

        let storage = FileStorage::new(&path);
        assert!(matches!(storage.get("k").await, Err(PrefsError::Corrupt(_))));

        storage.set("k", "v").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap(), Some("v".to_string()));
    }

    #[tokio::test]
    async fn memory_storage_shares_state_between_clones() {
        let a = MemoryStorage::new();
        let b = a.clone();
        a.set("k", "1").await.unwrap();
        assert_eq!(b.get("k").await.unwrap(), Some("1".to_string()));
    }

    #[tokio::test]
    async fn unavailable_storage_always_errors() {
        assert!(UnavailableStorage.get("k").await.is_err());
        assert!(UnavailableStorage.set("k", "v").await.is_err());
    }
}
