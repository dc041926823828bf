use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use bookshelf_core::validation::ValidationError;
use bookshelf_db::StoreError;

use crate::auth::AuthError;

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to keep the response shapes this API has
/// always produced: read misses answer in plain text, everything else
/// in a JSON envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Lookup of a book that does not exist.
    #[error("Not found")]
    NotFound,

    /// Write against a book id that does not exist. Echoes the original
    /// path segment verbatim, even when it never parsed as a number.
    #[error("No book with id {0} was found.")]
    NoSuchBook(String),

    /// A request payload that failed a field rule.
    #[error("{0}")]
    Validation(String),

    /// A request body that could not be read or decoded.
    #[error("Bad request: {0}")]
    BadPayload(String),

    /// A missing, malformed, or rejected bearer token.
    #[error(transparent)]
    Unauthorized(#[from] AuthError),

    /// A storage failure. Details are logged, never returned.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // --- Plain text responses ---
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            AppError::NoSuchBook(id) => (
                StatusCode::BAD_REQUEST,
                format!("No book with id {id} was found."),
            )
                .into_response(),

            // --- JSON envelope responses ---
            AppError::Validation(message) => json_error(StatusCode::BAD_REQUEST, &message),
            AppError::BadPayload(message) => json_error(StatusCode::BAD_REQUEST, &message),
            AppError::Unauthorized(err) => {
                json_error(StatusCode::UNAUTHORIZED, &err.to_string())
            }
            AppError::Store(err) => {
                tracing::error!(error = %err, "Store error");
                json_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred",
                )
            }
        }
    }
}

/// Build the JSON error envelope `{"error": {"code": ..., "message": ...}}`.
fn json_error(status: StatusCode, message: &str) -> Response {
    let body = json!({
        "error": {
            "code": status.as_u16(),
            "message": message,
        }
    });

    (status, axum::Json(body)).into_response()
}
