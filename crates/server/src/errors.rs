use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use knowledgebot::{StorageError, TemplateError};
use serde_json::json;
use tracing::error;

/// A custom error type for the server application.
///
/// This enum encapsulates the errors that can surface from a request,
/// allowing them to be converted into appropriate HTTP responses.
/// Provider failures never reach this type; the resolver absorbs them
/// into the mock fallback.
pub enum AppError {
    /// A prompt template could not be loaded.
    Template(TemplateError),
    /// The interaction log failed.
    Storage(StorageError),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<TemplateError> for AppError {
    fn from(err: TemplateError) -> Self {
        AppError::Template(err)
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        AppError::Storage(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::Template(err) => {
                error!("Template error: {:?}", err);
                match err {
                    TemplateError::NotFound(name) => (
                        StatusCode::NOT_FOUND,
                        format!("Unknown prompt type '{name}'."),
                    ),
                    other => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Failed to load prompt template: {other}"),
                    ),
                }
            }
            AppError::Storage(err) => {
                error!("Storage error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Interaction log failure: {err}"),
                )
            }
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
