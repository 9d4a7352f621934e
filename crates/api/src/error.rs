//! Unified error handling for the HTTP boundary.
//!
//! Provides a unified `ApiError` type mapping the error taxonomy onto HTTP
//! statuses. All route handlers return `Result<T, ApiError>`. Uncategorized
//! failures default to 500 and surface the uniform `{message, statusCode}`
//! body; validation failures surface `{errors}` with the full violation list.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::services::auth::AuthError;
use crate::services::cart::CartError;
use crate::store::StoreError;

/// Application-level error type for the marketplace service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input validation failed; carries every violated rule.
    #[error("validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// Missing or invalid credential.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Referenced entity absent.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Cart synchronization failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Document store operation failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// One-shot constructor for a single validation violation.
    #[must_use]
    pub fn invalid(rule: impl Into<String>) -> Self {
        Self::Validation(vec![rule.into()])
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Auth(err) => match err {
                AuthError::UnknownUser => StatusCode::NOT_FOUND,
                AuthError::InvalidCredentials
                | AuthError::MissingCredentials
                | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
                AuthError::PasswordHash | AuthError::TokenSigning | AuthError::Store(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Cart(err) => match err {
                CartError::ProductUnavailable | CartError::UnknownUser | CartError::NotInCart => {
                    StatusCode::NOT_FOUND
                }
                CartError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Store(err) => match err {
                StoreError::NotFound => StatusCode::NOT_FOUND,
                StoreError::Conflict(_) => StatusCode::BAD_REQUEST,
            },
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request error");
        }

        match self {
            Self::Validation(errors) => {
                (status, Json(json!({ "errors": errors }))).into_response()
            }
            other => {
                // Don't expose internal error details to clients
                let message = if status.is_server_error() {
                    "Internal server error".to_string()
                } else {
                    match &other {
                        Self::Auth(err) => err.to_string(),
                        Self::Cart(err) => err.to_string(),
                        Self::Store(err) => err.to_string(),
                        Self::Unauthorized(msg) | Self::NotFound(msg) => msg.clone(),
                        _ => other.to_string(),
                    }
                };

                (
                    status,
                    Json(json!({
                        "message": message,
                        "statusCode": status.as_u16(),
                    })),
                )
                    .into_response()
            }
        }
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;
