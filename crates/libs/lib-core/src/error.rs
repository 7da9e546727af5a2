//! # Centralized Error Handling
//!
//! This module defines the application-wide error type [`AppError`] used by the
//! service layer and HTTP handlers. It follows the `thiserror` pattern.
//!
//! ## Error Categories
//!
//! 1. **Client Errors** (4xx) - fixable input problems
//!    - [`Validation`](AppError::Validation) → 400 Bad Request, every violated field listed
//!    - [`NotFound`](AppError::NotFound) → 404 Not Found
//!
//! 2. **Server Errors** (5xx) - infrastructure faults, safe to retry
//!    - [`SaveFailed`](AppError::SaveFailed) / [`FetchFailed`](AppError::FetchFailed) → 500
//!    - [`Config`](AppError::Config) → 500
//!
//! Server errors never expose their cause to the caller; the full error goes to the
//! log and the response carries a generic message.
//!
//! ## Wire Format
//!
//! ```text
//! 400 {"message": "Validation failed", "errors": ["companyName is required", ...]}
//! 500 {"message": "Error saving form"}
//! ```

use crate::model::store::StoreError;
use crate::model::validate::ValidationErrors;
use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use shared::{ErrorResponse, ValidationErrorResponse};
use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application-wide error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error during startup or environment loading.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Submitted form violates one or more field rules.
    ///
    /// **HTTP Status**: 400 Bad Request
    #[error("Invalid submission: {0}")]
    Validation(#[from] ValidationErrors),

    /// Store rejected or could not complete a write.
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Failed to save submission: {0}")]
    SaveFailed(#[source] StoreError),

    /// Store could not complete a read.
    ///
    /// **HTTP Status**: 500 Internal Server Error
    #[error("Failed to fetch submissions: {0}")]
    FetchFailed(#[source] StoreError),

    /// Requested resource not found.
    ///
    /// **HTTP Status**: 404 Not Found
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::SaveFailed(_)
            | AppError::FetchFailed(_)
            | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-friendly error message.
    ///
    /// For server errors, returns a generic message to avoid exposing implementation details.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(_) => "Validation failed".to_string(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::SaveFailed(_) => "Error saving form".to_string(),
            AppError::FetchFailed(_) => "Error fetching forms".to_string(),
            AppError::Config(_) => "An internal error occurred".to_string(),
        }
    }
}

/// Implement Axum's `IntoResponse` for automatic error handling.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.user_message();

        // Log error details (full error message for server logs)
        if status.is_server_error() {
            tracing::error!("Server error: {}", self);
        } else {
            tracing::debug!("Client error: {}", self);
        }

        match self {
            AppError::Validation(errors) => (
                status,
                Json(ValidationErrorResponse {
                    message,
                    errors: errors.messages(),
                }),
            )
                .into_response(),
            _ => (status, Json(ErrorResponse { message })).into_response(),
        }
    }
}
