//! Error handler for converting AppError to HTTP responses.
//!
//! Implements the IntoResponse trait for AppError, providing consistent
//! error response formatting across the API. Precondition failures keep
//! their specific statuses; store, mail and unexpected failures collapse
//! into one generic 500 body. The underlying cause is logged server-side
//! and never included in the client-visible response.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    /// Converts an AppError into an HTTP response.
    ///
    /// # Status Code Mapping
    /// - NotFound → 404 NOT_FOUND
    /// - Validation → 400 BAD_REQUEST
    /// - BadRequest → 400 BAD_REQUEST
    /// - Database → 500 INTERNAL_SERVER_ERROR
    /// - ConnectionPool → 500 INTERNAL_SERVER_ERROR
    /// - Configuration → 500 INTERNAL_SERVER_ERROR
    /// - MailDispatch → 500 INTERNAL_SERVER_ERROR
    /// - Internal → 500 INTERNAL_SERVER_ERROR
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);

        // The specific cause stays server-side only.
        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed");
        } else {
            tracing::warn!(error = %self, "request rejected");
        }

        let error_response = match &self {
            AppError::NotFound {
                entity,
                field,
                value,
            } => ErrorResponse::not_found_error(entity, field, value),
            AppError::Validation { field, reason } => {
                ErrorResponse::validation_error(field, reason)
            }
            AppError::BadRequest { message } => ErrorResponse::new("BAD_REQUEST", message),
            AppError::Database { .. }
            | AppError::ConnectionPool { .. }
            | AppError::Configuration { .. }
            | AppError::MailDispatch { .. }
            | AppError::Internal { .. } => {
                ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred")
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Maps an AppError variant to its corresponding HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Validation { .. } => StatusCode::BAD_REQUEST,
        AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::ConnectionPool { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::MailDispatch { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps an AppError variant to its error code string.
pub fn error_to_code(error: &AppError) -> &'static str {
    match error {
        AppError::NotFound { .. } => "NOT_FOUND",
        AppError::Validation { .. } => "VALIDATION_ERROR",
        AppError::BadRequest { .. } => "BAD_REQUEST",
        AppError::Database { .. }
        | AppError::ConnectionPool { .. }
        | AppError::Configuration { .. }
        | AppError::MailDispatch { .. }
        | AppError::Internal { .. } => "INTERNAL_ERROR",
    }
}
