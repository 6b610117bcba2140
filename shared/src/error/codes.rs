//! Unified error codes for the storefront
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: User errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Course errors
//! - 7xxx: Referral errors
//! - 8xxx: Entitlement errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the storefront client can
/// switch on them without parsing messages.
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
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: User ====================
    /// User not found
    UserNotFound = 1001,
    /// Email already registered
    UserEmailExists = 1002,
    /// External identity already registered
    UserUidExists = 1003,

    // ==================== 2xxx: Permission ====================
    /// Caller is not authenticated
    NotAuthenticated = 2001,
    /// Admin key required
    AdminRequired = 2002,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has already failed and cannot be settled
    OrderFailed = 4002,

    // ==================== 5xxx: Payment ====================
    /// Gateway confirmation does not match the order
    ConfirmationInvalid = 5001,
    /// Payment gateway rejected the request
    GatewayError = 5002,
    /// Payment gateway did not answer in time
    GatewayTimeout = 5003,

    // ==================== 6xxx: Course ====================
    /// Course not found
    CourseNotFound = 6001,
    /// Course slug already exists
    CourseSlugExists = 6002,
    /// Course has invalid price
    CourseInvalidPrice = 6003,
    /// Another content item already holds this position
    CourseContentOrderExists = 6004,
    /// No course matches the quiz answers
    RecommendationUnavailable = 6101,

    // ==================== 7xxx: Referral ====================
    /// Referral code not found
    ReferralNotFound = 7001,
    /// Could not allocate a unique referral code
    ReferralCodeExhausted = 7002,

    // ==================== 8xxx: Entitlement ====================
    /// Entitlement not found
    EntitlementNotFound = 8001,
    /// Lesson number outside the course
    LessonOutOfRange = 8002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Network error
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

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "Unknown error",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field missing",
            ErrorCode::ValueOutOfRange => "Value out of range",

            // User
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::UserEmailExists => "Email already registered",
            ErrorCode::UserUidExists => "User already registered",

            // Permission
            ErrorCode::NotAuthenticated => "Authentication required",
            ErrorCode::AdminRequired => "Admin access required",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderFailed => "Order has already failed",

            // Payment
            ErrorCode::ConfirmationInvalid => "Payment confirmation is invalid",
            ErrorCode::GatewayError => "Payment gateway error",
            ErrorCode::GatewayTimeout => "Payment gateway timed out",

            // Course
            ErrorCode::CourseNotFound => "Course not found",
            ErrorCode::CourseSlugExists => "Course slug already exists",
            ErrorCode::CourseInvalidPrice => "Course has invalid price",
            ErrorCode::CourseContentOrderExists => "Course content position already taken",
            ErrorCode::RecommendationUnavailable => "No course matches these answers",

            // Referral
            ErrorCode::ReferralNotFound => "Referral code not found",
            ErrorCode::ReferralCodeExhausted => "Could not allocate a referral code",

            // Entitlement
            ErrorCode::EntitlementNotFound => "Entitlement not found",
            ErrorCode::LessonOutOfRange => "Lesson number out of range",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
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
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // User
            1001 => Ok(ErrorCode::UserNotFound),
            1002 => Ok(ErrorCode::UserEmailExists),
            1003 => Ok(ErrorCode::UserUidExists),

            // Permission
            2001 => Ok(ErrorCode::NotAuthenticated),
            2002 => Ok(ErrorCode::AdminRequired),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderFailed),

            // Payment
            5001 => Ok(ErrorCode::ConfirmationInvalid),
            5002 => Ok(ErrorCode::GatewayError),
            5003 => Ok(ErrorCode::GatewayTimeout),

            // Course
            6001 => Ok(ErrorCode::CourseNotFound),
            6002 => Ok(ErrorCode::CourseSlugExists),
            6003 => Ok(ErrorCode::CourseInvalidPrice),
            6004 => Ok(ErrorCode::CourseContentOrderExists),
            6101 => Ok(ErrorCode::RecommendationUnavailable),

            // Referral
            7001 => Ok(ErrorCode::ReferralNotFound),
            7002 => Ok(ErrorCode::ReferralCodeExhausted),

            // Entitlement
            8001 => Ok(ErrorCode::EntitlementNotFound),
            8002 => Ok(ErrorCode::LessonOutOfRange),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success.code(), 0);
        assert_eq!(ErrorCode::ValidationFailed.code(), 2);
        assert_eq!(ErrorCode::NotFound.code(), 3);

        assert_eq!(ErrorCode::UserNotFound.code(), 1001);
        assert_eq!(ErrorCode::OrderNotFound.code(), 4001);
        assert_eq!(ErrorCode::ConfirmationInvalid.code(), 5001);
        assert_eq!(ErrorCode::CourseNotFound.code(), 6001);
        assert_eq!(ErrorCode::ReferralNotFound.code(), 7001);
        assert_eq!(ErrorCode::EntitlementNotFound.code(), 8001);
        assert_eq!(ErrorCode::DatabaseError.code(), 9002);
    }

    #[test]
    fn test_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::Unknown.is_success());
        assert!(!ErrorCode::ConfirmationInvalid.is_success());
    }

    #[test]
    fn test_try_from_covers_every_variant() {
        let all = [
            ErrorCode::Success,
            ErrorCode::Unknown,
            ErrorCode::ValidationFailed,
            ErrorCode::NotFound,
            ErrorCode::AlreadyExists,
            ErrorCode::InvalidRequest,
            ErrorCode::RequiredField,
            ErrorCode::ValueOutOfRange,
            ErrorCode::UserNotFound,
            ErrorCode::UserEmailExists,
            ErrorCode::UserUidExists,
            ErrorCode::NotAuthenticated,
            ErrorCode::AdminRequired,
            ErrorCode::OrderNotFound,
            ErrorCode::OrderFailed,
            ErrorCode::ConfirmationInvalid,
            ErrorCode::GatewayError,
            ErrorCode::GatewayTimeout,
            ErrorCode::CourseNotFound,
            ErrorCode::CourseSlugExists,
            ErrorCode::CourseInvalidPrice,
            ErrorCode::CourseContentOrderExists,
            ErrorCode::RecommendationUnavailable,
            ErrorCode::ReferralNotFound,
            ErrorCode::ReferralCodeExhausted,
            ErrorCode::EntitlementNotFound,
            ErrorCode::LessonOutOfRange,
            ErrorCode::InternalError,
            ErrorCode::DatabaseError,
            ErrorCode::NetworkError,
            ErrorCode::TimeoutError,
            ErrorCode::ConfigError,
        ];
        for code in all {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
    }

    #[test]
    fn test_try_from_invalid() {
        assert_eq!(ErrorCode::try_from(999), Err(InvalidErrorCode(999)));
        assert_eq!(ErrorCode::try_from(3001), Err(InvalidErrorCode(3001)));
        assert_eq!(ErrorCode::try_from(10000), Err(InvalidErrorCode(10000)));
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&ErrorCode::ConfirmationInvalid).unwrap();
        assert_eq!(json, "5001");

        let code: ErrorCode = serde_json::from_str("4001").unwrap();
        assert_eq!(code, ErrorCode::OrderNotFound);

        let result: Result<ErrorCode, _> = serde_json::from_str("999");
        assert!(result.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ErrorCode::Success), "0");
        assert_eq!(format!("{}", ErrorCode::OrderNotFound), "4001");
        assert_eq!(
            format!("{}", InvalidErrorCode(999)),
            "invalid error code: 999"
        );
    }

    #[test]
    fn test_message() {
        assert_eq!(ErrorCode::OrderNotFound.message(), "Order not found");
        assert_eq!(
            ErrorCode::ConfirmationInvalid.message(),
            "Payment confirmation is invalid"
        );
    }
}
