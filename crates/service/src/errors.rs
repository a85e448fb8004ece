use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The backing data file has never been written.
    #[error("data store missing")]
    StoreMissing,
    /// Record rejected by the schema validator; `data_path` points at the
    /// offending location inside the document.
    #[error("validation error: {message} at {data_path:?}")]
    Validation { message: String, data_path: String },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self {
        Self::NotFound(format!("{} not found", entity))
    }
}
