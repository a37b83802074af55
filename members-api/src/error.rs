/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers should return `Result<T, ApiError>` which automatically
/// converts to appropriate HTTP status codes.
///
/// Registration failures arrive as an [`ErrorMap`]; the conversion below
/// turns field violations into a 422 with one detail per rule and an
/// `exception` entry into a 500 whose diagnostic stays in the logs.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use members_shared::validation::ErrorMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Unprocessable entity (422) - validation errors
    ValidationError(Vec<ValidationErrorDetail>),

    /// Internal server error (500)
    InternalError(String),
}

/// Validation error detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Violated rule code (e.g. "required", "isUniqueHobby")
    pub rule: String,

    /// Error message
    pub message: String,
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "validation_error", "internal_error")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::ValidationError(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                "Request validation failed".to_string(),
                Some(errors),
            ),
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Convert registration error maps to API errors
impl From<ErrorMap> for ApiError {
    fn from(errors: ErrorMap) -> Self {
        if errors.is_exception() {
            let diagnostic = errors
                .iter()
                .map(|entry| entry.message.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return ApiError::InternalError(diagnostic);
        }

        ApiError::ValidationError(
            errors
                .iter()
                .map(|entry| ValidationErrorDetail {
                    field: entry.field.to_string(),
                    rule: entry.code.to_string(),
                    message: entry.message.to_string(),
                })
                .collect(),
        )
    }
}
