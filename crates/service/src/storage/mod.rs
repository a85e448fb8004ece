//! Storage abstractions for the record store.
//!
//! The store never touches the filesystem directly; it goes through the
//! `Storage` trait so tests can substitute an in-memory fake.

mod fs_store;
mod in_memory;

pub use fs_store::FsStorage;
pub use in_memory::InMemoryStorage;

use async_trait::async_trait;
use models::Dataset;

use crate::errors::ServiceError;

/// Load/save access to the persisted dataset.
///
/// `load` must fail with `ServiceError::StoreMissing` when the backing
/// document does not exist; any other failure maps to `Storage`.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn load(&self) -> Result<Dataset, ServiceError>;
    async fn save(&self, dataset: &Dataset) -> Result<(), ServiceError>;
}
