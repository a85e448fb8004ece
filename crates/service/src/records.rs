//! The record store: a read-modify-write cycle over the whole persisted
//! dataset, with schema validation gating every mutation.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;

use models::{dataset, Dataset, FileSummary};

use crate::errors::ServiceError;
use crate::storage::Storage;
use crate::validate::Validator;

/// Outcome of an update or delete addressed at an id that may be absent.
///
/// A missing id is not an error for these operations; the HTTP layer
/// surfaces it as an informational message with a 200 status.
#[derive(Clone, Debug, PartialEq)]
pub enum MutationOutcome {
    Applied(Value),
    NoEntry(u64),
}

/// Record store service over injected storage and validator.
///
/// Each operation loads the dataset fresh from storage, works on it in
/// memory and, for mutations, persists the whole document back. The write
/// lock serializes the read-modify-write cycle so overlapping mutations
/// cannot lose updates.
pub struct RecordStore {
    storage: Arc<dyn Storage>,
    validator: Arc<dyn Validator>,
    write_lock: Mutex<()>,
}

impl RecordStore {
    pub fn new(storage: Arc<dyn Storage>, validator: Arc<dyn Validator>) -> Arc<Self> {
        Arc::new(Self { storage, validator, write_lock: Mutex::new(()) })
    }

    /// `{id, name}` projections of every record, in file order.
    pub async fn list(&self) -> Result<Vec<FileSummary>, ServiceError> {
        let ds = self.storage.load().await?;
        Ok(ds.summaries())
    }

    /// Full record by id; a linear scan over the files.
    pub async fn get(&self, id: u64) -> Result<Value, ServiceError> {
        let ds = self.storage.load().await?;
        ds.find(id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found(&format!("record {id}")))
    }

    /// Assign the next id, validate, append and persist.
    ///
    /// A rejected candidate leaves the file untouched; the id counter
    /// increment only ever lived in the in-memory copy.
    pub async fn create(&self, mut candidate: Value) -> Result<Value, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut ds = self.storage.load().await?;

        let id = ds.next_id;
        dataset::assign_id(&mut candidate, id)?;
        ds.next_id += 1;

        self.validator.validate(&candidate)?;

        ds.files.push(candidate.clone());
        self.storage.save(&ds).await?;
        debug!(id, "record created");
        Ok(candidate)
    }

    /// Full replacement of the record with the given id; the id in the body
    /// is overwritten by the path id.
    ///
    /// Validation runs before the dataset is even loaded, so an invalid
    /// body never touches storage.
    pub async fn update(
        &self,
        id: u64,
        mut replacement: Value,
    ) -> Result<MutationOutcome, ServiceError> {
        dataset::assign_id(&mut replacement, id)?;
        self.validator.validate(&replacement)?;

        let _guard = self.write_lock.lock().await;
        let mut ds = self.storage.load().await?;
        match ds.position_of(id) {
            Some(pos) => {
                ds.files[pos] = replacement.clone();
                self.storage.save(&ds).await?;
                debug!(id, "record replaced");
                Ok(MutationOutcome::Applied(replacement))
            }
            None => Ok(MutationOutcome::NoEntry(id)),
        }
    }

    /// Remove the record with the given id and return it. The id counter is
    /// never reset, so the freed id is not reused.
    pub async fn delete(&self, id: u64) -> Result<MutationOutcome, ServiceError> {
        let _guard = self.write_lock.lock().await;
        let mut ds = self.storage.load().await?;
        match ds.find(id).cloned() {
            Some(removed) => {
                ds.files.retain(|f| dataset::record_id(f) != Some(id));
                self.storage.save(&ds).await?;
                debug!(id, "record deleted");
                Ok(MutationOutcome::Applied(removed))
            }
            None => Ok(MutationOutcome::NoEntry(id)),
        }
    }
}
