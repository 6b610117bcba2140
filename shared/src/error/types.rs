//! Error types and API response structures

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// Every failure that reaches the HTTP boundary is expressed as an `AppError`:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details (offending field, resource id)
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a missing-field error naming the field
    pub fn required(field: &str) -> Self {
        Self::with_message(ErrorCode::RequiredField, format!("{field} is required"))
            .with_detail("field", field)
    }

    /// Create a not authenticated error
    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }
}

/// Error body returned by every failing endpoint
///
/// - `code`: Error code
/// - `message`: Human-readable message
/// - `details`: Additional error details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl ApiResponse {
    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            code: err.code.code(),
            message: err.message.clone(),
            details: err.details.clone(),
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ApiResponse::error(&self);

        // Log system errors
        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::OrderNotFound);
        assert_eq!(err.code, ErrorCode::OrderNotFound);
        assert_eq!(err.message, "Order not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::new(ErrorCode::ConfirmationInvalid)
            .with_detail("order_ref", "ord_abc")
            .with_detail("reason", "signature");

        let details = err.details.unwrap();
        assert_eq!(details.get("order_ref").unwrap(), "ord_abc");
        assert_eq!(details.get("reason").unwrap(), "signature");
    }

    #[test]
    fn test_required_names_field() {
        let err = AppError::required("gatewaySignature");
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.message, "gatewaySignature is required");
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.details.unwrap().get("field").unwrap(),
            "gatewaySignature"
        );
    }

    #[test]
    fn test_database_error_is_system() {
        let err = AppError::database("commit failed");
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_api_response_error() {
        let err = AppError::with_message(ErrorCode::UserNotFound, "User 42 not found")
            .with_detail("id", 42);
        let response = ApiResponse::error(&err);

        assert_eq!(response.code, 1001);
        assert_eq!(response.message, "User 42 not found");
        assert!(response.details.is_some());
    }

    #[test]
    fn test_api_response_serialize() {
        let response = ApiResponse::error(&AppError::new(ErrorCode::OrderNotFound));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["code"], 4001);
        assert_eq!(json["message"], "Order not found");
        assert!(json.get("details").is_none());
        assert!(json.get("data").is_none());
    }
}
