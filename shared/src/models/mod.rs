//! Data models
//!
//! Shared between storefront-server and its clients (via API).
//! All IDs are `i64`, timestamps are Unix milliseconds, money is integer
//! minor currency units. Wire names are camelCase.

pub mod course;
pub mod course_content;
pub mod entitlement;
pub mod order;
pub mod recommendation;
pub mod referral;
pub mod user;

// Re-exports
pub use course::*;
pub use course_content::*;
pub use entitlement::*;
pub use order::*;
pub use recommendation::*;
pub use referral::*;
pub use user::*;
