//! Service layer providing the record store on top of models.
//! - Separates the read-modify-write cycle from HTTP concerns.
//! - Storage and schema validation are injected capabilities.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod records;
pub mod runtime;
pub mod storage;
pub mod validate;
