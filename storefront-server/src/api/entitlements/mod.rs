//! Entitlement API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /users/{user_id}/entitlements | GET | 已购课程 (含课程摘要) |
//! | /entitlements/{id}/progress | POST | 记录完成的课时 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/users/{user_id}/entitlements", get(handler::list_for_user))
        .route("/entitlements/{id}/progress", post(handler::record_progress))
}
