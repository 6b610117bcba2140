use super::gateway::GatewayError;
use crate::store::StorageError;
use shared::error::{AppError, ErrorCode};
use std::time::Duration;
use thiserror::Error;

/// Checkout errors (order creation and payment verification)
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("User not found: {0}")]
    UserNotFound(i64),

    #[error("Course not found: {0}")]
    CourseNotFound(i64),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Order has already failed: {0}")]
    OrderFailed(String),

    #[error("Confirmation does not match order {0}")]
    ConfirmationInvalid(String),

    #[error("Payment gateway timed out after {0:?}")]
    GatewayTimeout(Duration),

    #[error("Payment gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type CheckoutResult<T> = Result<T, CheckoutError>;

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::UserNotFound(id) => {
                AppError::new(ErrorCode::UserNotFound).with_detail("userId", id)
            }
            CheckoutError::CourseNotFound(id) => {
                AppError::new(ErrorCode::CourseNotFound).with_detail("courseId", id)
            }
            CheckoutError::OrderNotFound(order_ref) => {
                AppError::new(ErrorCode::OrderNotFound).with_detail("orderRef", order_ref)
            }
            CheckoutError::OrderFailed(order_ref) => {
                AppError::new(ErrorCode::OrderFailed).with_detail("orderRef", order_ref)
            }
            CheckoutError::ConfirmationInvalid(order_ref) => {
                AppError::new(ErrorCode::ConfirmationInvalid).with_detail("orderRef", order_ref)
            }
            CheckoutError::GatewayTimeout(after) => AppError::new(ErrorCode::GatewayTimeout)
                .with_detail("timeoutMs", after.as_millis() as u64),
            CheckoutError::Gateway(e) => {
                tracing::error!(error = %e, "Payment gateway call failed");
                AppError::with_message(ErrorCode::GatewayError, e.to_string())
            }
            CheckoutError::Storage(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (CheckoutError::UserNotFound(1), StatusCode::NOT_FOUND),
            (CheckoutError::CourseNotFound(1), StatusCode::NOT_FOUND),
            (CheckoutError::OrderNotFound("x".into()), StatusCode::NOT_FOUND),
            (CheckoutError::OrderFailed("x".into()), StatusCode::CONFLICT),
            (
                CheckoutError::ConfirmationInvalid("x".into()),
                StatusCode::CONFLICT,
            ),
            (
                CheckoutError::GatewayTimeout(Duration::from_secs(1)),
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (
                CheckoutError::Gateway(GatewayError::InvalidResponse("{}".into())),
                StatusCode::BAD_GATEWAY,
            ),
            (
                CheckoutError::Storage(StorageError::UserNotFound(1)),
                StatusCode::NOT_FOUND,
            ),
        ];
        for (err, status) in cases {
            let app: AppError = err.into();
            assert_eq!(app.http_status(), status, "{}", app.message);
        }
    }
}
