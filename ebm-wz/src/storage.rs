//! File-backed draft store
//!
//! Drafts live as pretty-printed JSON under `<root>/drafts/<key>.json`.
//! Loads are best-effort: a missing or unreadable draft is `None`, never a
//! hard failure.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use ebm_common::config::DRAFTS_DIR;
use ebm_common::domain::DraftStore;
use ebm_common::{Error, Result};

/// Draft storage rooted in the per-device data folder
#[derive(Debug, Clone)]
pub struct FileDraftStore {
    dir: PathBuf,
}

impl FileDraftStore {
    pub fn new(root: &Path) -> Self {
        FileDraftStore { dir: root.join(DRAFTS_DIR) }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(Error::Storage(format!("Invalid draft key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

fn map_write_error(e: std::io::Error) -> Error {
    if matches!(e.kind(), ErrorKind::StorageFull | ErrorKind::QuotaExceeded) {
        Error::StorageQuota("Draft storage is full. Please clear some space.".to_string())
    } else {
        Error::Storage(e.to_string())
    }
}

#[async_trait]
impl DraftStore for FileDraftStore {
    async fn save(&self, key: &str, data: &Value) -> Result<()> {
        let path = self.path_for(key)?;
        let serialized = serde_json::to_vec_pretty(data)
            .map_err(|e| Error::Storage(e.to_string()))?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(map_write_error)?;
        tokio::fs::write(&path, serialized)
            .await
            .map_err(map_write_error)
    }

    async fn load(&self, key: &str) -> Result<Option<Value>> {
        let path = self.path_for(key)?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                warn!("Failed to read draft {:?}: {}", key, e);
                return Ok(None);
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!("Discarding corrupt draft {:?}: {}", key, e);
                Ok(None)
            }
        }
    }

    async fn clear(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Storage(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store() -> (tempfile::TempDir, FileDraftStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileDraftStore::new(dir.path());
        (dir, store)
    }

    #[tokio::test]
    async fn save_load_clear_round_trip() {
        let (_dir, store) = store();
        let data = json!({"habits": "lights out at 10:30", "rating": 7});

        store.save("energy_audit", &data).await.unwrap();
        assert_eq!(store.load("energy_audit").await.unwrap(), Some(data));

        store.clear("energy_audit").await.unwrap();
        assert_eq!(store.load("energy_audit").await.unwrap(), None);
        // Clearing again is a no-op
        store.clear("energy_audit").await.unwrap();
    }

    #[tokio::test]
    async fn missing_key_loads_as_none() {
        let (_dir, store) = store();
        assert_eq!(store.load("energy_drains").await.unwrap(), None);
    }

    #[tokio::test]
    async fn corrupt_draft_loads_as_none() {
        let (dir, store) = store();
        let drafts = dir.path().join(DRAFTS_DIR);
        std::fs::create_dir_all(&drafts).unwrap();
        std::fs::write(drafts.join("energy_audit.json"), b"{not json").unwrap();

        assert_eq!(store.load("energy_audit").await.unwrap(), None);
    }

    #[tokio::test]
    async fn rejects_path_traversal_keys() {
        let (_dir, store) = store();
        let err = store.save("../escape", &json!({})).await.unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
        assert!(store.load("a/b").await.is_err());
    }

    #[tokio::test]
    async fn save_overwrites_previous_draft() {
        let (_dir, store) = store();
        store.save("energy_audit", &json!({"v": 1})).await.unwrap();
        store.save("energy_audit", &json!({"v": 2})).await.unwrap();
        assert_eq!(store.load("energy_audit").await.unwrap(), Some(json!({"v": 2})));
    }
}
