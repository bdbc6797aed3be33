use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use clockpoint_core::error::CoreError;
use clockpoint_db::error::StoreError;
use serde_json::json;

/// Body text for every 5xx response. Details go to the log only.
pub const PROCESSING_FAILURE: &str = "Processing failure";

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce consistent `{ error, code }` JSON
/// bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `clockpoint_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Any failure reading or writing persistent state.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::PerimeterViolation => (
                    StatusCode::FORBIDDEN,
                    "PERIMETER_VIOLATION",
                    core.to_string(),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            },

            AppError::Store(err) => {
                tracing::error!(error = %err, "Store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    PROCESSING_FAILURE.to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
