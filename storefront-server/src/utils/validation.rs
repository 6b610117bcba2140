//! Input validation helpers
//!
//! Request DTOs arrive with optional fields; handlers turn them into typed
//! commands here, failing with a 400 that names the offending field.

use shared::error::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Names, titles, usernames
pub const MAX_NAME_LEN: usize = 200;

/// Course descriptions
pub const MAX_DESCRIPTION_LEN: usize = 5000;

/// Short identifiers: slug, uid, referral code, gateway ids, category
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

/// Lesson bodies: video URL, markdown text or quiz definition
pub const MAX_CONTENT_LEN: usize = 50_000;

// ── Validation helpers ──────────────────────────────────────────────

/// Unwrap a required field or fail with `RequiredField`
pub fn require<T>(value: Option<T>, field: &str) -> Result<T, AppError> {
    value.ok_or_else(|| AppError::required(field))
}

/// Required text: present, non-blank, within the length limit. Returns it trimmed.
pub fn require_text(value: Option<String>, field: &str, max_len: usize) -> Result<String, AppError> {
    let value = require(value, field)?;
    validate_required_text(&value, field, max_len)?;
    Ok(value.trim().to_string())
}

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::required(field));
    }
    validate_max_len(value, field, max_len)
}

/// Length limit in characters, not bytes
pub fn validate_max_len(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    let chars = value.chars().count();
    if chars > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({chars} chars, max {max_len})"
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    match value {
        Some(v) => validate_max_len(v, field, max_len),
        None => Ok(()),
    }
}

/// Optional text with blanks treated as absent
pub fn optional_text(
    value: Option<String>,
    field: &str,
    max_len: usize,
) -> Result<Option<String>, AppError> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    validate_optional_text(&value, field, max_len)?;
    Ok(value)
}

/// Minimal shape check; delivery is the identity provider's concern
pub fn validate_email(email: &str) -> Result<(), AppError> {
    validate_required_text(email, "email", MAX_EMAIL_LEN)?;
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(AppError::validation("email is not a valid address").with_detail("field", "email")),
    }
}

/// Prices are non-negative minor currency units
pub fn validate_price(value: i64, field: &str) -> Result<(), AppError> {
    if value < 0 {
        return Err(
            AppError::with_message(ErrorCode::CourseInvalidPrice, format!("{field} must not be negative"))
                .with_detail("field", field),
        );
    }
    Ok(())
}

/// A course has at least one lesson
pub fn validate_lessons(lessons: u32) -> Result<(), AppError> {
    if lessons == 0 {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            "lessons must be at least 1",
        )
        .with_detail("field", "lessons"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text() {
        assert_eq!(
            require_text(Some("  alice ".into()), "username", MAX_NAME_LEN).unwrap(),
            "alice"
        );
        let err = require_text(None, "username", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        let err = require_text(Some("   ".into()), "username", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        let err = require_text(Some("x".repeat(201)), "username", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_optional_text_blank_is_none() {
        assert_eq!(optional_text(Some(" ".into()), "code", 10).unwrap(), None);
        assert_eq!(
            optional_text(Some(" 1-2-ab ".into()), "code", 10).unwrap(),
            Some("1-2-ab".into())
        );
        assert!(optional_text(Some("x".repeat(11)), "code", 10).is_err());
    }

    #[test]
    fn test_length_limit_counts_characters() {
        // 5 characters, 15 bytes
        let hindi = "नमस्ते".chars().take(5).collect::<String>();
        assert!(hindi.len() > 5);
        assert!(validate_max_len(&hindi, "title", 5).is_ok());

        let err = validate_max_len(&"é".repeat(6), "title", 5).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert!(err.message.contains("6 chars"));
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("a@example.com").is_ok());
        assert!(validate_email("example.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("a@localhost").is_err());
    }

    #[test]
    fn test_validate_price_and_lessons() {
        assert!(validate_price(0, "price").is_ok());
        assert_eq!(
            validate_price(-1, "price").unwrap_err().code,
            ErrorCode::CourseInvalidPrice
        );
        assert!(validate_lessons(1).is_ok());
        assert_eq!(validate_lessons(0).unwrap_err().code, ErrorCode::ValueOutOfRange);
    }
}
