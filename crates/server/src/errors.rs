use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use service::errors::ServiceError;

/// Service error carried to the HTTP surface.
///
/// - missing data file or unknown id -> 404 with empty body
/// - schema violation -> 400 with `{"error": {"message", "dataPath"}}`
/// - anything else -> 500 with `{"error": "..."}`
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0 {
            ServiceError::StoreMissing | ServiceError::NotFound(_) => {
                StatusCode::NOT_FOUND.into_response()
            }
            ServiceError::Validation { message, data_path } => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({"error": {"message": message, "dataPath": data_path}})),
            )
                .into_response(),
            // a non-object body fails before the schema ever runs
            ServiceError::Model(e) => (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({"error": {"message": e.to_string(), "dataPath": ""}})),
            )
                .into_response(),
            other => {
                error!(error = %other, "unhandled service error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({"error": other.to_string()})),
                )
                    .into_response()
            }
        }
    }
}
