//! Unified error codes for the Cuadrante backend
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 3xxx: Store errors
//! - 4xxx: Schedule errors
//! - 5xxx: Traffic and staffing errors
//! - 9xxx: System errors

use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Codes are represented as u16 values for efficient serialization and
/// cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format (dates, week identifiers, time labels)
    InvalidFormat = 6,

    // ==================== 3xxx: Store ====================
    /// Store not found in the record store
    StoreNotFound = 3001,
    /// Store parameters are unusable (e.g. non-positive attention level)
    StoreParamsInvalid = 3002,

    // ==================== 4xxx: Schedule ====================
    /// Slot label does not belong to the store's grid
    SlotUnknown = 4001,
    /// Employee not found for this store/day
    EmployeeNotFound = 4002,
    /// Activity slot update was rejected by the record store
    ActivityUpdateFailed = 4003,

    // ==================== 5xxx: Traffic & Staffing ====================
    /// No traffic data could be aggregated for the requested period
    TrafficUnavailable = 5001,
    /// Historical comparison configuration is malformed
    HistoryConfigInvalid = 5002,
    /// Desired attention level must be positive
    AttentionInvalid = 5101,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Record store returned an unusable response
    UpstreamError = 9002,
    /// Network error reaching the record store
    NetworkError = 9003,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",

            // Store
            ErrorCode::StoreNotFound => "Store not found",
            ErrorCode::StoreParamsInvalid => "Store parameters are invalid",

            // Schedule
            ErrorCode::SlotUnknown => "Slot does not belong to the store's grid",
            ErrorCode::EmployeeNotFound => "Employee not found",
            ErrorCode::ActivityUpdateFailed => "Activity update failed",

            // Traffic & Staffing
            ErrorCode::TrafficUnavailable => "No traffic data available",
            ErrorCode::HistoryConfigInvalid => "Historical configuration is malformed",
            ErrorCode::AttentionInvalid => "Desired attention level must be positive",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::UpstreamError => "Record store returned an unusable response",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }

    /// Get the HTTP status code for this error
    pub const fn http_status(&self) -> StatusCode {
        match self {
            ErrorCode::Success => StatusCode::OK,
            ErrorCode::ValidationFailed
            | ErrorCode::InvalidRequest
            | ErrorCode::InvalidFormat => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound
            | ErrorCode::StoreNotFound
            | ErrorCode::EmployeeNotFound
            | ErrorCode::SlotUnknown => StatusCode::NOT_FOUND,
            ErrorCode::StoreParamsInvalid
            | ErrorCode::HistoryConfigInvalid
            | ErrorCode::AttentionInvalid => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::TrafficUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::UpstreamError
            | ErrorCode::NetworkError
            | ErrorCode::TimeoutError => StatusCode::BAD_GATEWAY,
            ErrorCode::Unknown
            | ErrorCode::ActivityUpdateFailed
            | ErrorCode::InternalError
            | ErrorCode::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),

            // Store
            3001 => Ok(ErrorCode::StoreNotFound),
            3002 => Ok(ErrorCode::StoreParamsInvalid),

            // Schedule
            4001 => Ok(ErrorCode::SlotUnknown),
            4002 => Ok(ErrorCode::EmployeeNotFound),
            4003 => Ok(ErrorCode::ActivityUpdateFailed),

            // Traffic & Staffing
            5001 => Ok(ErrorCode::TrafficUnavailable),
            5002 => Ok(ErrorCode::HistoryConfigInvalid),
            5101 => Ok(ErrorCode::AttentionInvalid),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::UpstreamError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
