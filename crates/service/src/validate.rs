use serde_json::Value;

use crate::errors::ServiceError;

/// Schema validation as an injected capability, decoupling the record store
/// from any particular validation library.
pub trait Validator: Send + Sync {
    fn validate(&self, record: &Value) -> Result<(), ServiceError>;
}

/// `Validator` backed by a compiled JSON Schema document.
pub struct SchemaValidator {
    compiled: jsonschema::Validator,
}

impl SchemaValidator {
    pub fn new(schema: &Value) -> Result<Self, ServiceError> {
        let compiled = jsonschema::validator_for(schema)
            .map_err(|e| ServiceError::Storage(format!("invalid schema: {e}")))?;
        Ok(Self { compiled })
    }

    /// Read and compile the schema from a JSON file on disk.
    pub async fn from_file(path: &str) -> Result<Self, ServiceError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ServiceError::Storage(format!("cannot read schema {path}: {e}")))?;
        let schema: Value =
            serde_json::from_slice(&bytes).map_err(|e| ServiceError::Storage(e.to_string()))?;
        Self::new(&schema)
    }
}

impl Validator for SchemaValidator {
    fn validate(&self, record: &Value) -> Result<(), ServiceError> {
        match self.compiled.validate(record) {
            Ok(()) => Ok(()),
            // first violation only, mirroring single-error reporting
            Err(err) => Err(ServiceError::Validation {
                message: err.to_string(),
                data_path: err.instance_path.to_string(),
            }),
        }
    }
}
