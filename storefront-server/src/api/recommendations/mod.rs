//! Recommendation API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /recommendations | POST | 根据问卷答案推荐课程 |

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/recommendations", post(handler::recommend))
}
