use std::path::PathBuf;

use async_trait::async_trait;
use models::Dataset;
use tokio::fs;

use crate::errors::ServiceError;
use crate::storage::Storage;

/// Dataset persisted as a single pretty-printed JSON document on disk.
///
/// Every save rewrites the whole file; there is no append log and no
/// partial write. Record key order is kept as loaded.
#[derive(Clone, Debug)]
pub struct FsStorage {
    path: PathBuf,
}

impl FsStorage {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Storage for FsStorage {
    async fn load(&self) -> Result<Dataset, ServiceError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ServiceError::StoreMissing)
            }
            Err(e) => return Err(ServiceError::Storage(e.to_string())),
        };
        serde_json::from_slice(&bytes).map_err(|e| ServiceError::Storage(e.to_string()))
    }

    async fn save(&self, dataset: &Dataset) -> Result<(), ServiceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.ok();
        }
        let data =
            serde_json::to_vec_pretty(dataset).map_err(|e| ServiceError::Storage(e.to_string()))?;
        fs::write(&self.path, data)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("fs_store_{}.json", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn missing_file_is_store_missing() {
        let storage = FsStorage::new(temp_path());
        assert!(matches!(storage.load().await, Err(ServiceError::StoreMissing)));
    }

    #[tokio::test]
    async fn save_writes_pretty_json_and_round_trips() -> anyhow::Result<()> {
        let path = temp_path();
        let storage = FsStorage::new(&path);
        let ds = Dataset { next_id: 2, files: vec![json!({"id": 1, "name": "a.txt"})] };
        storage.save(&ds).await?;

        // pretty-printed with 2-space indentation, no trailing newline
        let text = fs::read_to_string(&path).await?;
        assert_eq!(
            text,
            "{\n  \"nextId\": 2,\n  \"files\": [\n    {\n      \"id\": 1,\n      \"name\": \"a.txt\"\n    }\n  ]\n}"
        );

        assert_eq!(storage.load().await?, ds);
        let _ = fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_file_is_storage_error() -> anyhow::Result<()> {
        let path = temp_path();
        fs::write(&path, b"not json").await?;
        let storage = FsStorage::new(&path);
        assert!(matches!(storage.load().await, Err(ServiceError::Storage(_))));
        let _ = fs::remove_file(&path).await;
        Ok(())
    }
}
