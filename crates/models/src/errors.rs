use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("record must be a JSON object")]
    NotAnObject,
}
