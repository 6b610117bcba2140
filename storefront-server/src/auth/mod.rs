//! 管理接口认证
//!
//! 课程管理接口 (`/admin/*`) 要求 `Authorization: Bearer <ADMIN_API_KEY>`。
//! 其余接口公开。

mod middleware;

pub use middleware::require_admin_key;
