//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// Categories are determined by the leading digit of the error code.
/// 3xxx is unassigned and falls into `General`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// User errors (1xxx)
    User,
    /// Permission errors (2xxx)
    Permission,
    /// Order errors (4xxx)
    Order,
    /// Payment errors (5xxx)
    Payment,
    /// Course errors (6xxx)
    Course,
    /// Referral errors (7xxx)
    Referral,
    /// Entitlement errors (8xxx)
    Entitlement,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            1000..2000 => Self::User,
            2000..3000 => Self::Permission,
            4000..5000 => Self::Order,
            5000..6000 => Self::Payment,
            6000..7000 => Self::Course,
            7000..8000 => Self::Referral,
            8000..9000 => Self::Entitlement,
            9000.. => Self::System,
            _ => Self::General,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::User => "user",
            Self::Permission => "permission",
            Self::Order => "order",
            Self::Payment => "payment",
            Self::Course => "course",
            Self::Referral => "referral",
            Self::Entitlement => "entitlement",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(999), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(3001), ErrorCategory::General);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::User);
        assert_eq!(ErrorCategory::from_code(2001), ErrorCategory::Permission);
        assert_eq!(ErrorCategory::from_code(4001), ErrorCategory::Order);
        assert_eq!(ErrorCategory::from_code(5001), ErrorCategory::Payment);
        assert_eq!(ErrorCategory::from_code(6101), ErrorCategory::Course);
        assert_eq!(ErrorCategory::from_code(7001), ErrorCategory::Referral);
        assert_eq!(ErrorCategory::from_code(8001), ErrorCategory::Entitlement);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(10000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(
            ErrorCode::ConfirmationInvalid.category(),
            ErrorCategory::Payment
        );
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
        assert_eq!(
            ErrorCode::EntitlementNotFound.category(),
            ErrorCategory::Entitlement
        );
    }

    #[test]
    fn test_category_serialize() {
        let json = serde_json::to_string(&ErrorCategory::Referral).unwrap();
        assert_eq!(json, "\"referral\"");
        assert_eq!(ErrorCategory::Referral.name(), "referral");
    }
}
