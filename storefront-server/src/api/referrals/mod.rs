//! Referral API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /referrals | POST | 生成推荐码 |
//! | /referrals/{code} | GET | 查询推荐码 |
//! | /users/{user_id}/referrals | GET | 用户的推荐码 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/referrals", post(handler::issue))
        .route("/referrals/{code}", get(handler::get_by_code))
        .route("/users/{user_id}/referrals", get(handler::list_for_user))
}
