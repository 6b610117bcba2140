//! Order API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /orders | POST | 创建待支付订单 |
//! | /orders/verify | POST | 校验支付确认并授权课程 |
//! | /orders/{order_ref} | GET | 查询订单 |
//! | /users/{user_id}/orders | GET | 用户支付记录 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/orders", post(handler::create))
        .route("/orders/verify", post(handler::verify))
        .route("/orders/{order_ref}", get(handler::get_by_ref))
        .route("/users/{user_id}/orders", get(handler::list_for_user))
}
