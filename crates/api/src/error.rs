use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use movies_core::error::CoreError;
use movies_db::StoreError;

use crate::response::{json_response, ErrorResponse};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`StoreError`] and adds a bad-request variant for rejected input.
/// Every variant renders as `{"error": "<message>"}`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A failure reported by the movie store.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Store(StoreError::Core(core)) => classify_core_error(core),
            AppError::Store(StoreError::Backend(err)) => {
                tracing::error!(error = %err, "Store error");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        };

        json_response(status, &ErrorResponse { error: message })
    }
}

fn classify_core_error(err: &CoreError) -> (StatusCode, String) {
    match err {
        CoreError::InvalidIdentifier { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            format!("{entity} with id {id} not found"),
        ),
    }
}
