//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::UserNotFound
            | Self::OrderNotFound
            | Self::CourseNotFound
            | Self::RecommendationUnavailable
            | Self::ReferralNotFound
            | Self::EntitlementNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::UserEmailExists
            | Self::UserUidExists
            | Self::CourseSlugExists
            | Self::CourseContentOrderExists
            | Self::OrderFailed
            | Self::ConfirmationInvalid => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated | Self::AdminRequired => StatusCode::UNAUTHORIZED,

            // 502 / 504 upstream gateway
            Self::GatewayError => StatusCode::BAD_GATEWAY,
            Self::GatewayTimeout => StatusCode::GATEWAY_TIMEOUT,

            // 503 Service Unavailable (transient errors, client can retry)
            Self::NetworkError | Self::TimeoutError => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::Unknown
            | Self::InternalError
            | Self::DatabaseError
            | Self::ConfigError
            | Self::ReferralCodeExhausted => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (default for validation errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
