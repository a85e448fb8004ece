use async_trait::async_trait;
use models::Dataset;
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use crate::storage::Storage;

/// In-memory `Storage` fake; `None` models a data file that was never
/// written. Mostly useful in tests.
#[derive(Default)]
pub struct InMemoryStorage {
    inner: RwLock<Option<Dataset>>,
}

impl InMemoryStorage {
    /// Storage whose backing document does not exist yet.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_dataset(dataset: Dataset) -> Self {
        Self { inner: RwLock::new(Some(dataset)) }
    }

    /// Snapshot of the persisted dataset, if any.
    pub async fn snapshot(&self) -> Option<Dataset> {
        self.inner.read().await.clone()
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn load(&self) -> Result<Dataset, ServiceError> {
        self.inner.read().await.clone().ok_or(ServiceError::StoreMissing)
    }

    async fn save(&self, dataset: &Dataset) -> Result<(), ServiceError> {
        *self.inner.write().await = Some(dataset.clone());
        Ok(())
    }
}
