//! Unified error handling
//!
//! Application-level error type and its HTTP mapping:
//!
//! | Variant | Status |
//! |---------|--------|
//! | `Validation` | 400 |
//! | `Unauthorized` / `TokenExpired` / `InvalidToken` / `InvalidCredentials` | 401 |
//! | `Forbidden` | 403 |
//! | `NotFound` | 404 |
//! | `Conflict` | 409 |
//! | `Database` / `Internal` | 500 |
//!
//! Every error renders as the standard envelope; database and internal
//! messages are logged but never sent to the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use shared::ApiResponse;
use tracing::error;

use crate::db::repository::RepoError;
use crate::pricing::PricingError;

/// Application-level error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Authentication Errors ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Permission denied: {0}")]
    Forbidden(String),

    // ========== Business Logic Errors ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {message}")]
    Conflict {
        message: String,
        details: Option<Value>,
    },

    #[error("Validation failed")]
    Validation(Vec<String>),

    // ========== System Errors ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Create a Forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    /// Create a NotFound error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    /// Create a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
            details: None,
        }
    }

    /// Create a Conflict error carrying a detail payload (e.g. the orders
    /// blocking a product deletion)
    pub fn conflict_with_details(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details: Some(details),
        }
    }

    /// Create a Validation error with a single message
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(vec![message.into()])
    }

    /// Create a Database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ApiResponse::error("Access token missing"),
            ),
            AppError::TokenExpired => (StatusCode::UNAUTHORIZED, ApiResponse::error("Token expired")),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, ApiResponse::error("Invalid token")),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ApiResponse::error("Invalid credentials"),
            ),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, ApiResponse::error(msg)),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiResponse::error(msg)),
            AppError::Conflict { message, details } => {
                let mut body = ApiResponse::error(message);
                body.data = details;
                (StatusCode::CONFLICT, body)
            }
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ApiResponse::error_with_details("Validation errors", errors),
            ),
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::error("Server Error"),
                )
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::error("Server Error"),
                )
            }
        };

        (status, Json::<ApiResponse<Value>>(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::InvalidId(id) => AppError::validation(format!("Invalid ID format: {id}")),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::UnknownProduct(id) => {
                AppError::not_found(format!("Product with ID {id} not found"))
            }
            PricingError::Lookup(e) => e.into(),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(crate::utils::validation::collect_messages(&errors))
    }
}
