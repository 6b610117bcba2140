use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Email already registered: {0}")]
    EmailTaken(String),

    #[error("Identity already registered: {0}")]
    UidTaken(String),

    #[error("Course slug already exists: {0}")]
    SlugTaken(String),

    #[error("Course {course_id} already has content at position {order}")]
    ContentOrderTaken { course_id: i64, order: u32 },

    #[error("Content position {order} out of range 1..={lessons}")]
    ContentOrderOutOfRange { order: u32, lessons: u32 },

    #[error("Course {course_id} has content up to lesson {max_order}, cannot shrink to {lessons}")]
    LessonsBelowContent { course_id: i64, lessons: u32, max_order: u32 },

    #[error("Referral code already exists: {0}")]
    ReferralCodeTaken(String),

    #[error("User not found: {0}")]
    UserNotFound(i64),

    #[error("Course not found: {0}")]
    CourseNotFound(i64),

    #[error("Entitlement not found: {0}")]
    EntitlementNotFound(i64),
}

pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::EmailTaken(email) => {
                AppError::new(ErrorCode::UserEmailExists).with_detail("email", email)
            }
            StorageError::UidTaken(uid) => {
                AppError::new(ErrorCode::UserUidExists).with_detail("uid", uid)
            }
            StorageError::SlugTaken(slug) => {
                AppError::new(ErrorCode::CourseSlugExists).with_detail("slug", slug)
            }
            StorageError::ContentOrderTaken { course_id, order } => {
                AppError::new(ErrorCode::CourseContentOrderExists)
                    .with_detail("courseId", course_id)
                    .with_detail("order", order)
            }
            StorageError::ContentOrderOutOfRange { order, lessons } => AppError::with_message(
                ErrorCode::ValueOutOfRange,
                format!("order must be between 1 and {lessons}"),
            )
            .with_detail("field", "order")
            .with_detail("value", order),
            StorageError::LessonsBelowContent {
                course_id,
                lessons,
                max_order,
            } => AppError::with_message(
                ErrorCode::ValueOutOfRange,
                format!("lessons must be at least {max_order}, the highest content position"),
            )
            .with_detail("courseId", course_id)
            .with_detail("field", "lessons")
            .with_detail("value", lessons),
            StorageError::ReferralCodeTaken(code) => {
                AppError::new(ErrorCode::AlreadyExists).with_detail("code", code)
            }
            StorageError::UserNotFound(id) => {
                AppError::new(ErrorCode::UserNotFound).with_detail("id", id)
            }
            StorageError::CourseNotFound(id) => {
                AppError::new(ErrorCode::CourseNotFound).with_detail("id", id)
            }
            StorageError::EntitlementNotFound(id) => {
                AppError::new(ErrorCode::EntitlementNotFound).with_detail("id", id)
            }
            other => {
                tracing::error!(error = %other, "Storage failure");
                AppError::database(other.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_conflicts_map_to_409() {
        let err: AppError = StorageError::EmailTaken("a@b.c".into()).into();
        assert_eq!(err.code, ErrorCode::UserEmailExists);
        assert_eq!(err.http_status(), StatusCode::CONFLICT);

        let err: AppError = StorageError::SlugTaken("ai".into()).into();
        assert_eq!(err.code, ErrorCode::CourseSlugExists);

        let err: AppError = StorageError::ContentOrderTaken { course_id: 7, order: 2 }.into();
        assert_eq!(err.code, ErrorCode::CourseContentOrderExists);
        assert_eq!(err.http_status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_serialization_maps_to_storage_failure() {
        let json_err = serde_json::from_str::<i64>("nope").unwrap_err();
        let err: AppError = StorageError::from(json_err).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
