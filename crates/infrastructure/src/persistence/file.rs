//! File-backed session storage.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use gatehouse_application::{SessionStorage, StorageError};

/// Session storage persisted as a single JSON file.
///
/// Gives embedded hosts the reload-survival semantics of browser session
/// storage: a new instance over the same path sees the previous values.
/// Writes go to a sibling temp file first and are renamed into place.
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    /// Creates a store backed by the given file. The file is created on
    /// first write; a missing file reads as empty.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn load(&self) -> Result<HashMap<String, String>, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => {
                serde_json::from_str(&raw).map_err(|e| StorageError::Corrupt(e.to_string()))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(err) => Err(StorageError::Io(err.to_string())),
        }
    }

    async fn save(&self, values: &HashMap<String, String>) -> Result<(), StorageError> {
        let raw =
            serde_json::to_string_pretty(values).map_err(|e| StorageError::Corrupt(e.to_string()))?;
        let tmp = tmp_path(&self.path);
        tokio::fs::write(&tmp, raw)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

#[async_trait]
impl SessionStorage for FileSessionStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load().await?.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.load().await?;
        values.insert(key.to_string(), value.to_string());
        self.save(&values).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut values = self.load().await?;
        if values.remove(key).is_some() {
            self.save(&values).await?;
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Io(err.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_values_survive_a_new_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let storage = FileSessionStorage::new(&path);
        storage.put("token", "abc").await.unwrap();

        // Simulated reload: a fresh instance over the same file.
        let reloaded = FileSessionStorage::new(&path);
        assert_eq!(reloaded.get("token").await.unwrap().as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileSessionStorage::new(dir.path().join("nothing.json"));
        assert!(storage.get("token").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let storage = FileSessionStorage::new(&path);

        storage.put("token", "abc").await.unwrap();
        storage.put("menuList", "[]").await.unwrap();

        storage.remove("token").await.unwrap();
        assert!(storage.get("token").await.unwrap().is_none());
        assert_eq!(storage.get("menuList").await.unwrap().as_deref(), Some("[]"));

        storage.clear().await.unwrap();
        assert!(storage.get("menuList").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        tokio::fs::write(&path, "not json").await.unwrap();

        let storage = FileSessionStorage::new(&path);
        assert!(matches!(
            storage.get("token").await,
            Err(StorageError::Corrupt(_))
        ));
    }
}
