//! User API 模块
//!
//! 用户身份由外部身份服务 (uid) 提供，这里只保存资料。
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /users | POST | 注册资料 |
//! | /users/{user_id} | GET | 查询 |
//! | /users/{user_id} | PUT | 更新 |
//! | /users/by-uid/{uid} | GET | 按外部身份查询 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/users", post(handler::create))
        .route("/users/by-uid/{uid}", get(handler::get_by_uid))
        .route("/users/{user_id}", get(handler::get_by_id).put(handler::update))
}
