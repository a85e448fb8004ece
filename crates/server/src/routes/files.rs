use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};

use models::FileSummary;
use service::records::{MutationOutcome, RecordStore};

use crate::errors::ApiError;

/// List `{id, name}` projections of every record, in storage order.
pub async fn list_files(
    State(store): State<Arc<RecordStore>>,
) -> Result<Json<Vec<FileSummary>>, ApiError> {
    Ok(Json(store.list().await?))
}

/// Fetch the full record by id.
pub async fn get_file(
    State(store): State<Arc<RecordStore>>,
    Path(id): Path<u64>,
) -> Result<Json<serde_json::Value>, ApiError> {
    Ok(Json(store.get(id).await?))
}

/// Validate and append a new record; the id is assigned by the store.
pub async fn create_file(
    State(store): State<Arc<RecordStore>>,
    Json(candidate): Json<serde_json::Value>,
) -> Result<Json<serde_json::Value>, ApiError> {
    Ok(Json(store.create(candidate).await?))
}

/// Replace the record with the given id wholesale.
///
/// An absent id yields a 200 informational string rather than a 404,
/// consistent with delete below.
pub async fn update_file(
    State(store): State<Arc<RecordStore>>,
    Path(id): Path<u64>,
    Json(replacement): Json<serde_json::Value>,
) -> Result<Response, ApiError> {
    Ok(mutation_response(store.update(id, replacement).await?))
}

/// Remove the record with the given id and return it.
pub async fn delete_file(
    State(store): State<Arc<RecordStore>>,
    Path(id): Path<u64>,
) -> Result<Response, ApiError> {
    Ok(mutation_response(store.delete(id).await?))
}

fn mutation_response(outcome: MutationOutcome) -> Response {
    match outcome {
        MutationOutcome::Applied(record) => Json(record).into_response(),
        MutationOutcome::NoEntry(id) => format!("no entry with id {id}").into_response(),
    }
}
