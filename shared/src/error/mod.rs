//! Unified error system for the storefront
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Error body format
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: User errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors
//! - 5xxx: Payment errors
//! - 6xxx: Course errors
//! - 7xxx: Referral errors
//! - 8xxx: Entitlement errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::new(ErrorCode::OrderNotFound);
//!
//! let err = AppError::required("orderRef");
//!
//! let err = AppError::validation("lessons must be positive")
//!     .with_detail("field", "lessons");
//!
//! let response = ApiResponse::error(&err);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
