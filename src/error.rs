use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures raised below the HTTP layer. Every one of them comes from the
/// data store; none is retried or partially recovered.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Attach the operation-level message shown to API callers.
    pub fn with_message(self, message: &'static str) -> ApiError {
        ApiError {
            message,
            source: self,
        }
    }
}

/// Operation-boundary error. Always rendered as HTTP 500 with the
/// `{success: false, message, error}` envelope and no `data` key.
#[derive(Debug, Error)]
#[error("{message}: {source}")]
pub struct ApiError {
    pub message: &'static str,
    #[source]
    pub source: AppError,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let detail = self.source.to_string();
        tracing::error!(operation = self.message, error = %detail, "Request failed");

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "success": false,
                "message": self.message,
                "error": detail,
            })),
        )
            .into_response()
    }
}
