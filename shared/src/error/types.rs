//! Application error type with structured error codes

use super::codes::ErrorCode;
use crate::response::ApiResponse;
use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// The primary error type of the backend:
/// - standardized codes via [`ErrorCode`]
/// - human-readable messages
/// - optional structured details for debugging
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

    /// Create a not found error
    pub fn not_found(resource: impl Into<String>) -> Self {
        let r = resource.into();
        Self::with_message(ErrorCode::NotFound, format!("{} not found", r))
            .with_detail("resource", r)
    }

    /// Create an invalid format error (bad date, week identifier, time label)
    pub fn invalid_format(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidFormat, msg)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create an upstream (record store) error
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::UpstreamError, msg)
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::NetworkError, msg)
    }

    /// Create a timeout error
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TimeoutError, msg)
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ConfigError, msg)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        let body = ApiResponse::<()>::error(self.code.code(), self.message);
        (status, Json(body)).into_response()
    }
}

/// Result type for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_message_from_code() {
        let err = AppError::new(ErrorCode::TrafficUnavailable);
        assert_eq!(err.message, "No traffic data available");
        assert_eq!(err.code, ErrorCode::TrafficUnavailable);
    }

    #[test]
    fn test_custom_message_and_detail() {
        let err = AppError::validation("desired_attention must be positive")
            .with_detail("field", "desired_attention");

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, "desired_attention must be positive");
        let details = err.details.unwrap();
        assert_eq!(details["field"], "desired_attention");
    }

    #[test]
    fn test_not_found_records_resource() {
        let err = AppError::not_found("Store T042");
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Store T042 not found");
    }

    #[test]
    fn test_http_status_passthrough() {
        assert_eq!(
            AppError::validation("x").http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::upstream("x").http_status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
