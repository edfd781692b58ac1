use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// `axum::Json` with its rejection funneled through [`AppError`], so a
/// malformed body gets the standard `{"error": …}` envelope instead of
/// axum's plain-text parser output.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

impl<T: serde::Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedBody(rejection.body_text())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid id given {0}")]
    InvalidId(String),

    #[error("malformed request body")]
    MalformedBody(String),

    #[error("not authenticated")]
    NotAuthenticated,

    #[error("permission denied")]
    PermissionDenied,

    #[error("account not found")]
    AccountNotFound,

    #[error("account number collision")]
    DuplicateNumber,

    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error("token signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            AppError::InvalidId(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::MalformedBody(detail) => {
                // Parser internals stay in the logs, never in the response.
                tracing::debug!("request body rejected: {}", detail);
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            AppError::NotAuthenticated => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::PermissionDenied => (StatusCode::FORBIDDEN, self.to_string()),
            AppError::AccountNotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::DuplicateNumber => {
                tracing::error!("account number collision not resolved by retries");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            AppError::PasswordHash(e) => {
                tracing::error!("password hashing error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            AppError::Signing(e) => {
                tracing::error!("token signing error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("internal error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        // Every error body carries a single "error" field; internal detail
        // stays in the logs.
        let body = Json(json!({ "error": msg }));
        (status, body).into_response()
    }
}
